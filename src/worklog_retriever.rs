use tracing::{debug, info};

use crate::client::JiraClient;
use crate::entity::{Issue, WorkLog};
use crate::error::Result;
use crate::models::JiraWorklog;
use crate::pagination::fetch_all_pages;
use crate::period::{ReportPeriod, parse_jira_date};

/// 各課題の作業ログを取得し、期間内のものだけを返す
///
/// 課題は入力順に1件ずつ処理する。戻り値の課題リストには `start_date`
/// （APIが返した最初の作業ログの日付）が設定される。最初の作業ログが
/// 期間外であっても開始日として採用する。
pub async fn fetch_work_logs(
    client: &JiraClient,
    period: &ReportPeriod,
    issues: Vec<Issue>,
) -> Result<(Vec<WorkLog>, Vec<Issue>)> {
    let mut work_logs = Vec::new();
    let mut updated_issues = Vec::with_capacity(issues.len());

    for issue in issues {
        let key = issue.key.as_str();
        let entries = fetch_all_pages(move |start_at| client.get_worklogs(key, start_at)).await?;
        debug!(issue = %issue.key, entries = entries.len(), "retrieved work log entries");

        let (issue, mut matching) = apply_worklogs(issue, entries, period)?;
        work_logs.append(&mut matching);
        updated_issues.push(issue);
    }

    info!(count = work_logs.len(), "retrieved work logs within period");
    Ok((work_logs, updated_issues))
}

/// 1課題分の作業ログを処理し、開始日を補完した課題と期間内の作業ログを返す
fn apply_worklogs(
    mut issue: Issue,
    entries: Vec<JiraWorklog>,
    period: &ReportPeriod,
) -> Result<(Issue, Vec<WorkLog>)> {
    let mut matching = Vec::new();

    for entry in entries {
        let started = parse_jira_date(&entry.started)?;

        // 期間フィルタより先に判定する
        if issue.start_date.is_none() {
            issue.start_date = Some(started);
        }

        if period.contains(started) {
            matching.push(WorkLog::new(
                issue.key.clone(),
                started,
                entry.time_spent_seconds,
                entry.update_author.display_name,
            ));
        }
    }

    Ok((issue, matching))
}
