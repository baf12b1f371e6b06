use super::User;
use serde::Deserialize;

/// 課題の作業ログ一覧（1ページ分）
#[derive(Debug, Clone, Deserialize)]
pub struct WorklogPage {
    #[serde(rename = "maxResults")]
    pub max_results: u32,

    pub total: u32,

    pub worklogs: Vec<JiraWorklog>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraWorklog {
    #[serde(rename = "updateAuthor")]
    pub update_author: User,
    /// 例: "2020-01-18T09:00:00.000+0100"
    pub started: String,
    #[serde(rename = "timeSpentSeconds")]
    pub time_spent_seconds: i64,
}
