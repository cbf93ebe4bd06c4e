//! Viewing windows for instance expansion.

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::DEFAULT_VIEW_DAYS;
use crate::error::{RotaError, RotaResult};

/// Inclusive window of local (floating) instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl Default for DateRange {
    /// Default range: today through +DEFAULT_VIEW_DAYS
    fn default() -> Self {
        DateRange::upcoming(Local::now().date_naive(), DEFAULT_VIEW_DAYS)
    }
}

impl DateRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        DateRange { from, to }
    }

    /// Whole days, from the start of `first` to the end of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        DateRange {
            from: start_of_day(first),
            to: end_of_day(last),
        }
    }

    /// `today` plus the following `days` days.
    pub fn upcoming(today: NaiveDate, days: i64) -> Self {
        DateRange::days(today, today + Duration::days(days))
    }

    /// Monday 00:00 through Sunday 23:59:59 of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        DateRange::days(monday, monday + Duration::days(6))
    }

    /// First through last day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        DateRange::days(first, last)
    }

    /// Parse CLI-style bounds.
    /// - `from`: YYYY-MM-DD, defaults to today
    /// - `to`: YYYY-MM-DD, defaults to `from` + `default_days`
    pub fn from_args(from: Option<&str>, to: Option<&str>, default_days: i64) -> RotaResult<Self> {
        let first = match from {
            Some(s) => parse_date(s)?,
            None => Local::now().date_naive(),
        };

        let last = match to {
            Some(s) => parse_date(s)?,
            None => first + Duration::days(default_days),
        };

        Ok(DateRange::days(first, last))
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.from && instant <= self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> RotaResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| RotaError::InvalidDate(s.to_string()))
}

/// Parse a floating local date and time: `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM`
pub fn parse_datetime(s: &str) -> RotaResult<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| RotaError::InvalidDate(s.to_string()))
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| start_of_day(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_of_starts_on_monday() {
        // 2025-02-16 is a Sunday
        let range = DateRange::week_of(date(2025, 2, 16));
        assert_eq!(range.from, date(2025, 2, 10).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.to, date(2025, 2, 16).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_month_of_handles_short_months() {
        let range = DateRange::month_of(date(2024, 2, 14));
        assert_eq!(range.from.date(), date(2024, 2, 1));
        assert_eq!(range.to.date(), date(2024, 2, 29));

        let range = DateRange::month_of(date(2025, 12, 31));
        assert_eq!(range.to.date(), date(2025, 12, 31));
    }

    #[test]
    fn test_from_args_parses_bounds_inclusively() {
        let range = DateRange::from_args(Some("2025-03-01"), Some("2025-03-31"), 90).unwrap();
        assert!(range.contains(date(2025, 3, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(range.contains(date(2025, 3, 31).and_hms_opt(23, 0, 0).unwrap()));
        assert!(!range.contains(date(2025, 4, 1).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_from_args_defaults_end_from_start() {
        let range = DateRange::from_args(Some("2025-03-01"), None, 10).unwrap();
        assert_eq!(range.to.date(), date(2025, 3, 11));
    }

    #[test]
    fn test_parse_datetime_accepts_both_separators() {
        let expected = date(2025, 2, 16).and_hms_opt(11, 0, 0).unwrap();
        assert_eq!(parse_datetime("2025-02-16T11:00").unwrap(), expected);
        assert_eq!(parse_datetime("2025-02-16 11:00").unwrap(), expected);
        assert!(matches!(parse_datetime("2025-02-16"), Err(RotaError::InvalidDate(_))));
    }

    #[test]
    fn test_from_args_rejects_bad_dates() {
        assert!(DateRange::from_args(Some("03/01/2025"), None, 10).is_err());
        assert!(DateRange::from_args(None, Some("2025-02-30"), 10).is_err());
    }
}
