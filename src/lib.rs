pub mod client;
pub mod entity;
pub mod error;
pub mod issue_retriever;
pub mod models;
pub mod pagination;
pub mod period;
pub mod report;
pub mod time_report;
pub mod worklog_retriever;

pub use client::{Auth, JiraClient, JiraConfig};
pub use entity::{Issue, WorkLog};
pub use error::{Error, Result};
pub use models::*;

// Retrieval re-exports
pub use issue_retriever::{ISSUE_FIELDS, build_jql, fetch_issues};
pub use pagination::{Page, fetch_all_pages};
pub use period::{ReportPeriod, format_jira_date, parse_jira_date};
pub use worklog_retriever::fetch_work_logs;

// Report re-exports
pub use report::{
    FIELD_NAMES, OutputFormat, OutputTarget, ReportRow, build_rows, format_duration, write_report,
};

pub use time_report::{ReportSummary, TimeReportRequest, collect, run};
