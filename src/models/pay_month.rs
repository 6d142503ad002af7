//! Calendar month used as the salary period.
//!
//! This module contains the [`PayMonth`] type. Salary records, monthly
//! aggregation and late check-in reports are all keyed by a calendar month
//! written as `YYYY-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar month (year and month number).
///
/// # Example
///
/// ```
/// use attendance_payroll::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let month: PayMonth = "2026-01".parse().unwrap();
/// assert!(month.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
/// assert!(!month.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// assert_eq!(month.to_string(), "2026-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayMonth {
    year: i32,
    month: u32,
}

impl PayMonth {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Builds a month from its parts, returning `None` for month numbers
    /// outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::of)
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let next_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next_first
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks if a date falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for PayMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayMonth> for String {
    fn from(month: PayMonth) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let month: PayMonth = "2026-03".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 3);
    }

    #[test]
    fn test_parse_invalid_months() {
        for value in ["2026-13", "2026-00", "2026-3", "2026", "March 2026", "2026-ab"] {
            assert_eq!(
                value.parse::<PayMonth>(),
                Err(EngineError::InvalidMonth {
                    value: value.to_string()
                }),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_of_date_ignores_day() {
        assert_eq!(PayMonth::of(date(2026, 2, 17)), PayMonth::new(2026, 2).unwrap());
    }

    #[test]
    fn test_first_and_last_day() {
        let february = PayMonth::new(2028, 2).unwrap();
        assert_eq!(february.first_day(), date(2028, 2, 1));
        assert_eq!(february.last_day(), date(2028, 2, 29));

        let december = PayMonth::new(2026, 12).unwrap();
        assert_eq!(december.last_day(), date(2026, 12, 31));
    }

    #[test]
    fn test_contains_date_requires_same_year() {
        let month = PayMonth::new(2026, 1).unwrap();
        assert!(month.contains_date(date(2026, 1, 1)));
        assert!(!month.contains_date(date(2025, 1, 15)));
    }

    #[test]
    fn test_serde_as_string() {
        let month = PayMonth::new(2026, 7).unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2026-07\"");
        let parsed: PayMonth = serde_json::from_str("\"2026-07\"").unwrap();
        assert_eq!(parsed, month);
        assert!(serde_json::from_str::<PayMonth>("\"2026-7x\"").is_err());
    }
}
