use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::client::{JiraClient, JiraConfig};
use crate::entity::{Issue, WorkLog};
use crate::error::Result;
use crate::issue_retriever::fetch_issues;
use crate::period::ReportPeriod;
use crate::report::{OutputFormat, OutputTarget, build_rows, write_report};
use crate::worklog_retriever::fetch_work_logs;

/// タイムレポート1回分の実行条件
#[derive(Debug, Clone)]
pub struct TimeReportRequest {
    pub config: JiraConfig,
    pub project: String,
    pub period: ReportPeriod,
    pub format: OutputFormat,
    pub output: OutputTarget,
}

/// 実行結果の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub issue_count: usize,
    pub work_log_count: usize,
    /// 期間内の作業時間の合計（秒）
    pub total_seconds: i64,
    /// ファイルに出力した場合のパス
    pub written_to: Option<PathBuf>,
}

/// 課題と作業ログを取得し、期間内の作業ログと開始日を補完した課題を返す
pub async fn collect(client: &JiraClient, project: &str, period: &ReportPeriod) -> Result<(Vec<WorkLog>, Vec<Issue>)> {
    let issues = fetch_issues(client, project, period).await?;
    fetch_work_logs(client, period, issues).await
}

/// 取得から出力までを順番に実行する
pub async fn run<W: Write>(request: &TimeReportRequest, console_out: W) -> Result<ReportSummary> {
    let client = JiraClient::new(request.config.clone())?;
    let (work_logs, issues) = collect(&client, &request.project, &request.period).await?;

    let rows = build_rows(&issues, &work_logs)?;
    let written_to = write_report(request.format, &rows, &request.output, console_out)?;

    let summary = ReportSummary {
        issue_count: issues.len(),
        work_log_count: work_logs.len(),
        total_seconds: work_logs.iter().map(|work_log| work_log.time_spent).sum(),
        written_to,
    };
    info!(
        issues = summary.issue_count,
        work_logs = summary.work_log_count,
        total_seconds = summary.total_seconds,
        format = %request.format,
        "time report finished"
    );
    Ok(summary)
}
