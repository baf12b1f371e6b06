use tracing::{debug, info};

use crate::client::JiraClient;
use crate::entity::Issue;
use crate::error::Result;
use crate::models::SearchParams;
use crate::pagination::fetch_all_pages;
use crate::period::ReportPeriod;

/// 検索時に要求するフィールド
pub const ISSUE_FIELDS: [&str; 7] = [
    "id",
    "key",
    "summary",
    "parent",
    "timeoriginalestimate",
    "timespent",
    "resolutiondate",
];

/// 期間内に作業ログがあるプロジェクトの課題を検索するJQLを生成
pub fn build_jql(project: &str, period: &ReportPeriod) -> String {
    format!(
        "project = \"{}\" and timeSpent is not null and {}",
        escape_jql_string(project),
        period.to_jql_condition()
    )
}

fn escape_jql_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// 対象期間に作業ログが記録された課題をすべて取得
pub async fn fetch_issues(
    client: &JiraClient,
    project: &str,
    period: &ReportPeriod,
) -> Result<Vec<Issue>> {
    let base_params = SearchParams::new(build_jql(project, period))
        .fields(ISSUE_FIELDS.iter().map(|field| field.to_string()).collect());
    debug!(jql = %base_params.jql, "searching issues");

    let raw_issues = fetch_all_pages(|start_at| {
        let params = base_params.clone().start_at(start_at);
        async move { client.search_issues(&params).await }
    })
    .await?;

    let issues = raw_issues
        .into_iter()
        .map(Issue::try_from)
        .collect::<Result<Vec<_>>>()?;

    info!(project, count = issues.len(), "retrieved issues");
    Ok(issues)
}
