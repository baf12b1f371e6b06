use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ColNum, ExcelDateTime, Format, RowNum, Workbook, Worksheet};
use tracing::info;

use super::{FIELD_NAMES, ReportRow};
use crate::error::{Error, Result};

const SHEET_NAME: &str = "Time report";
const DURATION_FORMAT: &str = "[h]:mm:ss;@";
const DATE_FORMAT: &str = "yyyy-mm-dd";
const SECONDS_PER_DAY: f64 = 86_400.0;

/// 1シートのワークブックを作成する
///
/// 時間は日単位の小数（`[h]:mm:ss` 表示）、日付はExcelの日付値として書き込む。
/// 値が無いセルは空のままにする。
pub fn build_workbook(rows: &[ReportRow<'_>]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let duration_format = Format::new().set_num_format(DURATION_FORMAT);
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in FIELD_NAMES.iter().enumerate() {
        worksheet.write_string(0, col as ColNum, *name)?;
    }

    for (index, ReportRow { work_log, issue }) in rows.iter().enumerate() {
        let row = index as RowNum + 1;

        worksheet.write_string(row, 0, &work_log.author)?;
        write_date(worksheet, row, 1, Some(work_log.started), &date_format)?;
        worksheet.write_string(row, 2, &work_log.issue_key)?;
        write_duration(worksheet, row, 3, Some(work_log.time_spent), &duration_format)?;
        write_duration(worksheet, row, 4, issue.original_estimate, &duration_format)?;
        write_duration(worksheet, row, 5, issue.time_spent, &duration_format)?;
        write_date(worksheet, row, 6, issue.start_date, &date_format)?;
        write_date(worksheet, row, 7, issue.end_date, &date_format)?;
        worksheet.write_string(row, 8, &issue.summary)?;
        if let Some(parent_key) = &issue.parent_key {
            worksheet.write_string(row, 9, parent_key)?;
        }
        if let Some(parent_summary) = &issue.parent_summary {
            worksheet.write_string(row, 10, parent_summary)?;
        }
    }

    Ok(workbook)
}

pub fn write_excel_file(path: &Path, rows: &[ReportRow<'_>]) -> Result<()> {
    let mut workbook = build_workbook(rows)?;
    workbook.save(path)?;
    info!(path = %path.display(), rows = rows.len(), "wrote Excel report");
    Ok(())
}

fn write_duration(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    seconds: Option<i64>,
    format: &Format,
) -> Result<()> {
    if let Some(seconds) = seconds {
        worksheet.write_number_with_format(row, col, seconds as f64 / SECONDS_PER_DAY, format)?;
    }
    Ok(())
}

fn write_date(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    date: Option<NaiveDate>,
    format: &Format,
) -> Result<()> {
    if let Some(date) = date {
        worksheet.write_datetime_with_format(row, col, &to_excel_date(date)?, format)?;
    }
    Ok(())
}

fn to_excel_date(date: NaiveDate) -> Result<ExcelDateTime> {
    let year = u16::try_from(date.year())
        .map_err(|_| Error::InvalidData(format!("date {} cannot be written to Excel", date)))?;
    // 月・日は常に u8 に収まる
    let date = ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)?;
    Ok(date)
}
