use chrono::{Days, Local, NaiveDate};

use crate::error::{Error, Result};

const JIRA_DATE_FORMAT: &str = "%Y-%m-%d";

/// レポート対象期間 `[from, to_exclusive)`
///
/// 終了日は「その日を含む」指定なので、内部では翌日0時を排他的上限として保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    /// 開始日（この日を含む）
    pub from: NaiveDate,
    /// 終了日の翌日（この日を含まない）
    pub to_exclusive: NaiveDate,
}

impl ReportPeriod {
    /// 開始日と終了日（省略時は今日）から期間を作成
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Result<Self> {
        let to = to.unwrap_or_else(|| Local::now().date_naive());

        if from > to {
            return Err(Error::InvalidInput(format!(
                "from date {} is after to date {}",
                format_jira_date(from),
                format_jira_date(to)
            )));
        }

        let to_exclusive = to
            .checked_add_days(Days::new(1))
            .ok_or_else(|| Error::InvalidInput(format!("to date {} is out of range", to)))?;

        Ok(Self { from, to_exclusive })
    }

    /// `YYYY-MM-DD` 形式の文字列から期間を作成
    pub fn parse(from: &str, to: Option<&str>) -> Result<Self> {
        let from = parse_input_date(from)?;
        let to = to.map(parse_input_date).transpose()?;
        Self::new(from, to)
    }

    /// 日付が期間内かどうか
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to_exclusive
    }

    /// JQLクエリの作業ログ日付条件を生成
    pub fn to_jql_condition(&self) -> String {
        format!(
            "worklogDate >= \"{}\" and worklogDate < \"{}\"",
            format_jira_date(self.from),
            format_jira_date(self.to_exclusive)
        )
    }
}

fn parse_input_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, JIRA_DATE_FORMAT)
        .map_err(|_| Error::InvalidInput(format!("invalid date '{}', expected yyyy-mm-dd", s)))
}

/// NaiveDateをJIRA用の日付文字列にフォーマット
pub fn format_jira_date(date: NaiveDate) -> String {
    date.format(JIRA_DATE_FORMAT).to_string()
}

/// JIRAのタイムスタンプから日付部分（先頭10文字）のみを取り出す
///
/// 時刻とタイムゾーンは捨てるため、比較はすべて日付単位になる。
pub fn parse_jira_date(timestamp: &str) -> Result<NaiveDate> {
    timestamp
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, JIRA_DATE_FORMAT).ok())
        .ok_or_else(|| Error::InvalidData(format!("invalid Jira timestamp '{}'", timestamp)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_parse() {
        // Given/When: 開始日と終了日を文字列で指定
        let period = ReportPeriod::parse("2020-01-10", Some("2020-01-20")).unwrap();

        // Then: 終了日の翌日が排他的上限になる
        assert_eq!(period.from, date(2020, 1, 10));
        assert_eq!(period.to_exclusive, date(2020, 1, 21));
    }

    #[test]
    fn test_period_contains_is_half_open() {
        let period = ReportPeriod::parse("2020-01-10", Some("2020-01-20")).unwrap();

        assert!(!period.contains(date(2020, 1, 9)));
        assert!(period.contains(date(2020, 1, 10)));
        assert!(period.contains(date(2020, 1, 20)));
        assert!(!period.contains(date(2020, 1, 21)));
    }

    #[test]
    fn test_period_without_to_date_ends_tomorrow() {
        // Given: 終了日を省略
        let today = Local::now().date_naive();

        // When: 期間を作成
        let period = ReportPeriod::new(date(2020, 1, 10), None).unwrap();

        // Then: 今日を含む
        assert!(period.contains(today));
        assert_eq!(period.to_exclusive, today.succ_opt().unwrap());
    }

    #[test]
    fn test_period_single_day() {
        let period = ReportPeriod::parse("2020-02-29", Some("2020-02-29")).unwrap();

        assert_eq!(period.to_exclusive, date(2020, 3, 1));
        assert!(period.contains(date(2020, 2, 29)));
    }

    #[test]
    fn test_period_from_after_to() {
        let result = ReportPeriod::parse("2020-01-21", Some("2020-01-20"));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_period_invalid_date() {
        let result = ReportPeriod::parse("10-01-2020", None);

        match result.unwrap_err() {
            Error::InvalidInput(msg) => assert!(msg.contains("10-01-2020")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_to_jql_condition() {
        let period = ReportPeriod::parse("2020-01-10", Some("2020-01-20")).unwrap();

        assert_eq!(
            period.to_jql_condition(),
            "worklogDate >= \"2020-01-10\" and worklogDate < \"2020-01-21\""
        );
    }

    #[test]
    fn test_parse_jira_date() {
        // 時刻とタイムゾーンは無視される
        assert_eq!(
            parse_jira_date("2020-01-18T23:30:00.000+0100").unwrap(),
            date(2020, 1, 18)
        );
        assert_eq!(parse_jira_date("2020-01-20").unwrap(), date(2020, 1, 20));
    }

    #[test]
    fn test_parse_jira_date_invalid() {
        assert!(matches!(parse_jira_date("2020-01"), Err(Error::InvalidData(_))));
        assert!(matches!(parse_jira_date("not-a-date-at-all"), Err(Error::InvalidData(_))));
        assert!(matches!(parse_jira_date(""), Err(Error::InvalidData(_))));
    }
}
