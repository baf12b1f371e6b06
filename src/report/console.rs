use std::io::Write;

use super::{ReportRow, format_duration, format_optional_date, format_optional_duration};
use crate::error::Result;
use crate::period::format_jira_date;

/// 見出し2行に続けて、1作業ログ1行のセミコロン区切りで出力する
pub fn write_console<W: Write>(mut writer: W, rows: &[ReportRow<'_>]) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "The Jira time report")?;
    writeln!(writer, "====================")?;

    for row in rows {
        writeln!(writer, "{}", format_line(row))?;
    }

    writer.flush()?;
    Ok(())
}

fn format_line(row: &ReportRow<'_>) -> String {
    let ReportRow { work_log, issue } = row;
    [
        work_log.author.clone(),
        format_jira_date(work_log.started),
        work_log.issue_key.clone(),
        format_duration(work_log.time_spent),
        format_optional_duration(issue.original_estimate),
        format_optional_duration(issue.time_spent),
        format_optional_date(issue.start_date),
        format_optional_date(issue.end_date),
        issue.summary.clone(),
        issue.parent_key.clone().unwrap_or_default(),
        issue.parent_summary.clone().unwrap_or_default(),
    ]
    .join(";")
}
