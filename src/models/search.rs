use super::JiraIssue;
use serde::Deserialize;

/// 課題検索の条件（GETのクエリパラメータとして送る）
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub jql: String,
    pub start_at: u32,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "maxResults")]
    pub max_results: u32,

    pub total: u32,

    pub issues: Vec<JiraIssue>,
}

impl SearchParams {
    pub fn new(jql: impl Into<String>) -> Self {
        Self {
            jql: jql.into(),
            ..Self::default()
        }
    }

    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// GETリクエスト用のクエリパラメータに変換
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("jql", self.jql.clone())];
        if !self.fields.is_empty() {
            query.push(("fields", self.fields.join(",")));
        }
        query.push(("startAt", self.start_at.to_string()));
        query
    }
}
