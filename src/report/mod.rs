pub mod console;
pub mod csv_writer;
pub mod excel_writer;

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::entity::{Issue, WorkLog};
use crate::error::{Error, Result};
use crate::period::format_jira_date;

pub const DEFAULT_CSV_FILE_NAME: &str = "jira-time-report.csv";
pub const DEFAULT_EXCEL_FILE_NAME: &str = "jira-time-report.xlsx";

/// CSV・Excelの列見出し（この順に出力する）
pub const FIELD_NAMES: [&str; 11] = [
    "author",
    "date",
    "issue",
    "time_spent",
    "original_estimate",
    "total_time_spent",
    "issue_start_date",
    "issue_end_date",
    "summary",
    "parent",
    "parent summary",
];

/// レポートの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Console,
    Csv,
    Excel,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Console => write!(f, "console"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
        }
    }
}

/// ファイル出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub csv_path: PathBuf,
    pub excel_path: PathBuf,
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_FILE_NAME),
            excel_path: PathBuf::from(DEFAULT_EXCEL_FILE_NAME),
        }
    }
}

/// 作業ログ1件とその課題を結合したレポートの1行
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    pub work_log: &'a WorkLog,
    pub issue: &'a Issue,
}

/// 作業ログを (作成者, 日付, 課題キー) の昇順に並べ、課題と結合する
///
/// 課題はキーの線形探索で最初に一致したものを使う。見つからない場合は
/// 課題と作業ログのリストが不整合なのでエラーにする。
pub fn build_rows<'a>(issues: &'a [Issue], work_logs: &'a [WorkLog]) -> Result<Vec<ReportRow<'a>>> {
    let mut sorted: Vec<&WorkLog> = work_logs.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.author, a.started, &a.issue_key).cmp(&(&b.author, b.started, &b.issue_key))
    });

    sorted
        .into_iter()
        .map(|work_log| {
            issues
                .iter()
                .find(|issue| issue.key == work_log.issue_key)
                .map(|issue| ReportRow { work_log, issue })
                .ok_or_else(|| {
                    Error::InvalidData(format!("no issue found for work log on {}", work_log.issue_key))
                })
        })
        .collect()
}

/// 秒数を `H:MM:SS` に整形する。時間は24で折り返さない
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        seconds / 3600,
        seconds % 3600 / 60,
        seconds % 60
    )
}

pub fn format_optional_duration(seconds: Option<i64>) -> String {
    seconds.map(format_duration).unwrap_or_default()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_jira_date).unwrap_or_default()
}

/// 指定された形式でレポートを出力し、ファイルに書いた場合はそのパスを返す
pub fn write_report<W: Write>(
    format: OutputFormat,
    rows: &[ReportRow<'_>],
    target: &OutputTarget,
    console_out: W,
) -> Result<Option<PathBuf>> {
    match format {
        OutputFormat::Console => {
            console::write_console(console_out, rows)?;
            Ok(None)
        }
        OutputFormat::Csv => {
            csv_writer::write_csv_file(&target.csv_path, rows)?;
            Ok(Some(target.csv_path.clone()))
        }
        OutputFormat::Excel => {
            excel_writer::write_excel_file(&target.excel_path, rows)?;
            Ok(Some(target.excel_path.clone()))
        }
    }
}
