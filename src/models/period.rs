//! Calendar month periods
//!
//! Every projection and report works at calendar-month granularity. A
//! [`MonthPeriod`] is a `(year, month)` pair with the date arithmetic the
//! occurrence rules need: first/last day, days in month, navigation and
//! elapsed whole months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g., "2025-01")
///
/// Only months whose first day is a representable calendar date can be
/// built, so the date accessors never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "MonthFields", try_from = "MonthFields")]
pub struct MonthPeriod {
    first_day: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct MonthFields {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a month period
    ///
    /// Returns `None` when `month` is outside 1..=12 or the year is beyond
    /// the supported calendar range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Get the current month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of this month
    pub fn start_date(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of this month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| self.first_day.with_day(day))
            .unwrap_or(self.first_day)
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> u32 {
        self.end_date().day()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Get the next month, if representable
    pub fn next(&self) -> Option<Self> {
        self.checked_offset(1)
    }

    /// Get the previous month, if representable
    pub fn prev(&self) -> Option<Self> {
        self.checked_offset(-1)
    }

    /// Shift by a signed number of months; `None` past the calendar range
    pub fn checked_offset(&self, months: i32) -> Option<Self> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month)
    }

    /// Whole calendar months from `earlier` to `self` (negative if `self` is before)
    pub fn months_since(&self, earlier: &MonthPeriod) -> i32 {
        (self.year() - earlier.year()) * 12 + (self.month() as i32 - earlier.month() as i32)
    }

    /// The `count` months that follow this one, in order
    ///
    /// Stops early at the end of the calendar range.
    pub fn following(self, count: u32) -> impl Iterator<Item = MonthPeriod> {
        (1..=count).map_while(move |i| self.checked_offset(i32::try_from(i).ok()?))
    }

    /// The `count` months ending with this one (inclusive), oldest first
    ///
    /// Starts late when the window reaches before the calendar range.
    pub fn trailing(self, count: u32) -> impl Iterator<Item = MonthPeriod> {
        let back = i32::try_from(count).unwrap_or(i32::MAX);
        (0..back)
            .rev()
            .filter_map(move |i| self.checked_offset(-i))
    }

    /// Every month touched by the inclusive date range, in order
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Vec<MonthPeriod> {
        let first = Self::of(start);
        let last = Self::of(end);
        let span = last.months_since(&first);
        if span < 0 {
            return Vec::new();
        }
        (0..=span).filter_map(|i| first.checked_offset(i)).collect()
    }

    /// Parse a period string in `YYYY-MM` form
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(PeriodParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = parts[0]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Self::new(year, month).ok_or(PeriodParseError::YearOutOfRange(year))
    }
}

impl From<MonthPeriod> for MonthFields {
    fn from(period: MonthPeriod) -> Self {
        Self {
            year: period.year(),
            month: period.month(),
        }
    }
}

impl TryFrom<MonthFields> for MonthPeriod {
    type Error = PeriodParseError;

    fn try_from(fields: MonthFields) -> Result<Self, Self::Error> {
        if !(1..=12).contains(&fields.month) {
            return Err(PeriodParseError::InvalidMonth(fields.month));
        }
        Self::new(fields.year, fields.month).ok_or(PeriodParseError::YearOutOfRange(fields.year))
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period format: {} (expected YYYY-MM)", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> MonthPeriod {
        MonthPeriod::new(year, month).unwrap()
    }

    #[test]
    fn test_bounds() {
        let jan = month(2025, 1);
        assert_eq!(jan.start_date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(jan.end_date(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!((jan.year(), jan.month()), (2025, 1));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(month(2024, 2).days_in_month(), 29);
        assert_eq!(month(2025, 2).days_in_month(), 28);
        assert_eq!(month(2024, 6).days_in_month(), 30);
        assert_eq!(month(2024, 12).days_in_month(), 31);
    }

    #[test]
    fn test_navigation_across_years() {
        assert_eq!(month(2024, 12).next(), Some(month(2025, 1)));
        assert_eq!(month(2025, 1).prev(), Some(month(2024, 12)));
        assert_eq!(month(2024, 11).checked_offset(14), Some(month(2026, 1)));
        assert_eq!(month(2024, 2).checked_offset(-14), Some(month(2022, 12)));
    }

    #[test]
    fn test_months_since() {
        assert_eq!(month(2024, 5).months_since(&month(2024, 2)), 3);
        assert_eq!(month(2025, 2).months_since(&month(2024, 11)), 3);
        assert_eq!(month(2024, 1).months_since(&month(2024, 2)), -1);
    }

    #[test]
    fn test_following_and_trailing() {
        let base = month(2024, 11);
        assert_eq!(
            base.following(3).collect::<Vec<_>>(),
            vec![month(2024, 12), month(2025, 1), month(2025, 2)]
        );
        assert_eq!(
            base.trailing(3).collect::<Vec<_>>(),
            vec![month(2024, 9), month(2024, 10), month(2024, 11)]
        );
        assert_eq!(base.following(0).count(), 0);
    }

    #[test]
    fn test_windows_are_lazy() {
        let base = month(2024, 11);
        let far: Vec<_> = base.following(u32::MAX).take(2).collect();
        assert_eq!(far, vec![month(2024, 12), month(2025, 1)]);
    }

    #[test]
    fn test_spanning() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(
            MonthPeriod::spanning(start, end),
            vec![month(2024, 1), month(2024, 2), month(2024, 3)]
        );
        assert!(MonthPeriod::spanning(end, start).is_empty());
    }

    #[test]
    fn test_contains() {
        let jan = month(2025, 1);
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(MonthPeriod::parse("2025-01").unwrap(), month(2025, 1));
        assert_eq!(month(2025, 1).to_string(), "2025-01");
        assert_eq!(
            MonthPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(MonthPeriod::parse("January").is_err());
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(MonthPeriod::new(2025, 0).is_none());
        assert!(MonthPeriod::new(2025, 13).is_none());
    }

    #[test]
    fn test_unrepresentable_year_rejected() {
        assert!(MonthPeriod::new(300000, 1).is_none());
        assert!(MonthPeriod::new(-300000, 1).is_none());
        assert_eq!(
            MonthPeriod::parse("300000-01"),
            Err(PeriodParseError::YearOutOfRange(300000))
        );
    }

    #[test]
    fn test_calendar_edges_do_not_panic() {
        let last = MonthPeriod::of(NaiveDate::MAX);
        assert_eq!(last.end_date(), NaiveDate::MAX);
        assert!(last.next().is_none());
        assert_eq!(last.following(5).count(), 0);

        let first = MonthPeriod::of(NaiveDate::MIN);
        assert!(first.prev().is_none());
        assert_eq!(first.trailing(3).collect::<Vec<_>>(), vec![first]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&month(2024, 6)).unwrap();
        assert_eq!(json, r#"{"year":2024,"month":6}"#);
        let parsed: MonthPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, month(2024, 6));
        assert!(serde_json::from_str::<MonthPeriod>(r#"{"year":300000,"month":1}"#).is_err());
    }
}
