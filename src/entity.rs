use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::JiraIssue;
use crate::period::parse_jira_date;

/// レポート用に必要なフィールドだけを持つ課題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: u64,
    pub key: String,
    pub summary: String,
    pub parent_key: Option<String>,
    pub parent_summary: Option<String>,
    /// 初期見積もり（秒）
    pub original_estimate: Option<i64>,
    /// 合計作業時間（秒）
    pub time_spent: Option<i64>,
    /// 最初に見つかった作業ログの日付（作業ログ取得時に設定される）
    pub start_date: Option<NaiveDate>,
    /// 解決日
    pub end_date: Option<NaiveDate>,
}

impl Issue {
    pub fn new(id: u64, key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            summary: summary.into(),
            parent_key: None,
            parent_summary: None,
            original_estimate: None,
            time_spent: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn parent(mut self, key: impl Into<String>, summary: impl Into<String>) -> Self {
        self.parent_key = Some(key.into());
        self.parent_summary = Some(summary.into());
        self
    }

    pub fn original_estimate(mut self, seconds: i64) -> Self {
        self.original_estimate = Some(seconds);
        self
    }

    pub fn time_spent(mut self, seconds: i64) -> Self {
        self.time_spent = Some(seconds);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }
}

impl TryFrom<JiraIssue> for Issue {
    type Error = Error;

    fn try_from(raw: JiraIssue) -> Result<Self> {
        let id = raw
            .id
            .parse::<u64>()
            .map_err(|_| Error::InvalidData(format!("issue {} has a non-numeric id '{}'", raw.key, raw.id)))?;

        let fields = raw.fields;
        let (parent_key, parent_summary) = match fields.parent {
            Some(parent) => (Some(parent.key), Some(parent.fields.summary)),
            None => (None, None),
        };
        let end_date = fields
            .resolution_date
            .as_deref()
            .map(parse_jira_date)
            .transpose()?;

        Ok(Self {
            id,
            key: raw.key,
            summary: fields.summary,
            parent_key,
            parent_summary,
            original_estimate: fields.time_original_estimate,
            time_spent: fields.time_spent,
            start_date: None,
            end_date,
        })
    }
}

/// 1件の作業記録。課題とはキーで関連付ける
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLog {
    pub issue_key: String,
    pub started: NaiveDate,
    /// 作業時間（秒）
    pub time_spent: i64,
    /// 作業ログを最後に更新したユーザーの表示名
    pub author: String,
}

impl WorkLog {
    pub fn new(
        issue_key: impl Into<String>,
        started: NaiveDate,
        time_spent: i64,
        author: impl Into<String>,
    ) -> Self {
        Self {
            issue_key: issue_key.into(),
            started,
            time_spent,
            author: author.into(),
        }
    }
}
