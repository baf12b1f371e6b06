use serde::Deserialize;

/// 検索APIが返す課題（要求したフィールドのみ）
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueFields {
    pub summary: String,
    #[serde(default)]
    pub parent: Option<ParentIssue>,
    #[serde(rename = "timeoriginalestimate")]
    #[serde(default)]
    pub time_original_estimate: Option<i64>,
    #[serde(rename = "timespent")]
    #[serde(default)]
    pub time_spent: Option<i64>,
    // タイムゾーン付きの文字列のまま保持し、日付部分のみ使う
    #[serde(rename = "resolutiondate")]
    #[serde(default)]
    pub resolution_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentIssue {
    pub key: String,
    pub fields: ParentFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentFields {
    pub summary: String,
}
