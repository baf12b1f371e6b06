use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use super::{FIELD_NAMES, ReportRow, format_optional_date};
use crate::error::Result;
use crate::period::format_jira_date;

/// UNIX方言（全フィールドを引用符で囲み、改行は `\n`）でCSVを書き出す
///
/// 時間の列は整形せず秒数のまま出力する。
pub fn write_csv<W: Write>(writer: W, rows: &[ReportRow<'_>]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(FIELD_NAMES)?;

    for ReportRow { work_log, issue } in rows {
        writer.write_record([
            work_log.author.clone(),
            format_jira_date(work_log.started),
            work_log.issue_key.clone(),
            work_log.time_spent.to_string(),
            optional_seconds(issue.original_estimate),
            optional_seconds(issue.time_spent),
            format_optional_date(issue.start_date),
            format_optional_date(issue.end_date),
            issue.summary.clone(),
            issue.parent_key.clone().unwrap_or_default(),
            issue.parent_summary.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, rows: &[ReportRow<'_>]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "wrote CSV report");
    Ok(())
}

fn optional_seconds(seconds: Option<i64>) -> String {
    seconds.map(|s| s.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_rows;
    use crate::report::tests::sample_data;

    #[test]
    fn test_write_csv() {
        // Given: 親課題あり・なしの作業ログ
        let (issues, work_logs) = sample_data();
        let rows = build_rows(&issues, &work_logs).unwrap();
        let mut out = Vec::new();

        // When: CSV形式で出力
        write_csv(&mut out, &rows).unwrap();

        // Then: 見出し行と秒数のままの時間列
        let expected = "\
\"author\",\"date\",\"issue\",\"time_spent\",\"original_estimate\",\"total_time_spent\",\"issue_start_date\",\"issue_end_date\",\"summary\",\"parent\",\"parent summary\"
\"John Doe\",\"2020-01-12\",\"MYB-5\",\"3600\",\"3600\",\"900\",\"2020-01-10\",\"2020-01-15\",\"Summary of issue MYB-5\",\"MYB-3\",\"Summary of the parent issue of MYB-5\"
\"John Doe\",\"2020-01-18\",\"MYB-5\",\"3600\",\"3600\",\"900\",\"2020-01-10\",\"2020-01-15\",\"Summary of issue MYB-5\",\"MYB-3\",\"Summary of the parent issue of MYB-5\"
\"John Doe\",\"2020-01-18\",\"MYB-5\",\"5400\",\"3600\",\"900\",\"2020-01-10\",\"2020-01-15\",\"Summary of issue MYB-5\",\"MYB-3\",\"Summary of the parent issue of MYB-5\"
\"René Doe\",\"2020-01-20\",\"MYB-7\",\"3600\",\"\",\"\",\"\",\"\",\"Summary of issue MYB-7\",\"\",\"\"
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_write_csv_escapes_quotes() {
        let issues = vec![crate::Issue::new(1, "MYB-1", "Fix \"quoted\" text; and more")];
        let work_logs = vec![crate::WorkLog::new(
            "MYB-1",
            crate::report::tests::date(2020, 1, 12),
            60,
            "John Doe",
        )];
        let rows = build_rows(&issues, &work_logs).unwrap();
        let mut out = Vec::new();

        write_csv(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Fix \"\"quoted\"\" text; and more\""));
    }

    #[test]
    fn test_write_csv_file() {
        let (issues, work_logs) = sample_data();
        let rows = build_rows(&issues, &work_logs).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jira-time-report.csv");

        write_csv_file(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 5);
        assert!(content.starts_with("\"author\",\"date\""));
    }

    #[test]
    fn test_write_csv_file_invalid_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");

        let result = write_csv_file(&path, &[]);

        assert!(matches!(result, Err(crate::Error::IoError(_))));
    }
}
