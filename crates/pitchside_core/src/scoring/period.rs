//! Time-window filtering of score records.
//!
//! Bounds are turned into `YYYY-MM-DD` strings and compared lexically
//! against each record's session day, inclusive on both ends.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ScoreRecord, SESSION_DATE_FORMAT};

/// Custom window picked in the UI: a single day or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    /// `None` means the single day `start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: None }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end: Some(end) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PeriodFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "thisYear")]
    ThisYear,
    /// No date selected behaves like `All`.
    #[serde(rename = "custom")]
    Custom {
        #[serde(default)]
        range: Option<DateRange>,
    },
}

impl PeriodFilter {
    /// Inclusive `(from, to)` day bounds, or `None` when nothing is filtered.
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            PeriodFilter::All | PeriodFilter::Custom { range: None } => None,
            PeriodFilter::Today => Some((today, today)),
            PeriodFilter::Last7Days => Some((today - Duration::days(7), today)),
            PeriodFilter::Last30Days => Some((today - Duration::days(30), today)),
            PeriodFilter::ThisYear => {
                let year = today.year();
                let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
                Some((first, last))
            }
            PeriodFilter::Custom { range: Some(range) } => {
                Some((range.start, range.end.unwrap_or(range.start)))
            }
        }
    }

    pub fn matches(&self, record: &ScoreRecord, today: NaiveDate) -> bool {
        match self.bounds(today) {
            None => true,
            Some((from, to)) => {
                let from = from.format(SESSION_DATE_FORMAT).to_string();
                let to = to.format(SESSION_DATE_FORMAT).to_string();
                in_bounds(record.session_day(), &from, &to)
            }
        }
    }
}

fn in_bounds(day: &str, from: &str, to: &str) -> bool {
    day >= from && day <= to
}

/// Records inside the window, in their original order.
pub fn filter_by_period(records: &[ScoreRecord], period: &PeriodFilter, today: NaiveDate) -> Vec<ScoreRecord> {
    let Some((from, to)) = period.bounds(today) else {
        return records.to_vec();
    };
    let from = from.format(SESSION_DATE_FORMAT).to_string();
    let to = to.format(SESSION_DATE_FORMAT).to_string();

    records.iter().filter(|r| in_bounds(r.session_day(), &from, &to)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeGroup, SessionRef};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_on(date: &str) -> ScoreRecord {
        ScoreRecord::manual(
            "s1",
            SessionRef { session_id: None, date: date.to_string() },
            AttributeGroup::from_pairs([("passing", 5.0)]),
            AttributeGroup::new(),
            None,
        )
    }

    fn dates(records: &[ScoreRecord]) -> Vec<&str> {
        records.iter().map(|r| r.session.date.as_str()).collect()
    }

    #[test]
    fn test_all_returns_input_unchanged() {
        let records = vec![record_on("2025-05-01"), record_on("2023-01-01"), record_on("")];
        let filtered = filter_by_period(&records, &PeriodFilter::All, day(2025, 5, 2));
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_last7days_inclusive_bounds() {
        let today = day(2025, 5, 10);
        let records = vec![
            record_on("2025-05-02"),
            record_on("2025-05-03"),
            record_on("2025-05-10"),
            record_on("2025-05-11"),
        ];
        let filtered = filter_by_period(&records, &PeriodFilter::Last7Days, today);
        assert_eq!(dates(&filtered), vec!["2025-05-03", "2025-05-10"]);
    }

    #[test]
    fn test_last30days_inclusive_bounds() {
        let today = day(2025, 5, 31);
        let records = vec![
            record_on("2025-04-30"),
            record_on("2025-05-01"),
            record_on("2025-05-31"),
            record_on("2025-06-01"),
        ];
        let filtered = filter_by_period(&records, &PeriodFilter::Last30Days, today);
        assert_eq!(dates(&filtered), vec!["2025-05-01", "2025-05-31"]);
    }

    #[test]
    fn test_this_year_and_today() {
        let today = day(2025, 6, 15);
        let records = vec![record_on("2024-12-31"), record_on("2025-01-01"), record_on("2025-06-15T09:00:00")];

        let year = filter_by_period(&records, &PeriodFilter::ThisYear, today);
        assert_eq!(year.len(), 2);

        let only_today = filter_by_period(&records, &PeriodFilter::Today, today);
        assert_eq!(dates(&only_today), vec!["2025-06-15T09:00:00"]);
    }

    #[test]
    fn test_custom_without_date_is_all() {
        let records = vec![record_on("2020-01-01"), record_on("2025-01-01")];
        let filtered = filter_by_period(&records, &PeriodFilter::Custom { range: None }, day(2025, 1, 1));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_custom_single_day_and_range() {
        let records = vec![record_on("2025-03-01"), record_on("2025-03-05"), record_on("2025-03-09")];
        let today = day(2025, 4, 1);

        let single = PeriodFilter::Custom { range: Some(DateRange::single(day(2025, 3, 5))) };
        assert_eq!(dates(&filter_by_period(&records, &single, today)), vec!["2025-03-05"]);

        let range = PeriodFilter::Custom { range: Some(DateRange::between(day(2025, 3, 1), day(2025, 3, 5))) };
        assert_eq!(dates(&filter_by_period(&records, &range, today)), vec!["2025-03-01", "2025-03-05"]);
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let records = vec![record_on("2025-03-03")];
        let reversed = PeriodFilter::Custom { range: Some(DateRange::between(day(2025, 3, 5), day(2025, 3, 1))) };
        assert!(filter_by_period(&records, &reversed, day(2025, 4, 1)).is_empty());
    }

    #[test]
    fn test_serde_tags() {
        let period: PeriodFilter = serde_json::from_str(r#"{"kind":"last30days"}"#).unwrap();
        assert_eq!(period, PeriodFilter::Last30Days);

        let custom: PeriodFilter = serde_json::from_str(r#"{"kind":"custom"}"#).unwrap();
        assert_eq!(custom, PeriodFilter::Custom { range: None });

        let json = serde_json::to_string(&PeriodFilter::ThisYear).unwrap();
        assert_eq!(json, r#"{"kind":"thisYear"}"#);
    }

    #[test]
    fn test_matches_agrees_with_filter() {
        let today = day(2025, 5, 10);
        let record = record_on("2025-05-01");
        assert!(PeriodFilter::Last30Days.matches(&record, today));
        assert!(!PeriodFilter::Last7Days.matches(&record, today));
    }
}
