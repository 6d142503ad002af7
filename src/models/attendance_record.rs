//! Attendance record model.
//!
//! This module defines the [`AttendanceRecord`] struct: one employee's
//! check-in/check-out pair for one organizational calendar date, together
//! with the late, early-leave and overtime hours derived from it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{hours_from_millis, ZERO_HOURS};

/// One employee's attendance on one calendar date.
///
/// Created by the first matched scan of the day and completed by the second.
/// The derived hour fields stay zero until both timestamps are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The organizational calendar date of the check-in.
    pub date: NaiveDate,
    /// First scan of the day.
    pub check_in: Option<DateTime<FixedOffset>>,
    /// Second scan of the day; strictly after `check_in` when present.
    pub check_out: Option<DateTime<FixedOffset>>,
    /// Hours between the standard work start and a later check-in.
    #[serde(default)]
    pub late_hours: Decimal,
    /// Hours between an earlier check-out and the standard work end.
    #[serde(default)]
    pub early_leave_hours: Decimal,
    /// Hours between the standard work end and a later check-out.
    #[serde(default)]
    pub overtime_hours: Decimal,
}

impl AttendanceRecord {
    /// Opens a record for the date of `timestamp` with only a check-in.
    ///
    /// `timestamp` must already be expressed in the organizational timezone;
    /// its local date becomes the record's date.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::AttendanceRecord;
    /// use chrono::DateTime;
    ///
    /// let ts = DateTime::parse_from_rfc3339("2026-01-15T09:30:00+05:30").unwrap();
    /// let record = AttendanceRecord::checked_in("EMP0001", ts);
    /// assert_eq!(record.date.to_string(), "2026-01-15");
    /// assert!(!record.is_complete());
    /// ```
    pub fn checked_in(employee_id: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            employee_id: employee_id.into(),
            date: timestamp.date_naive(),
            check_in: Some(timestamp),
            check_out: None,
            late_hours: ZERO_HOURS,
            early_leave_hours: ZERO_HOURS,
            overtime_hours: ZERO_HOURS,
        }
    }

    /// Returns true once both check-in and check-out are recorded.
    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    /// Returns true if the check-in wall-clock time is after `work_start`.
    pub fn is_late_check_in(&self, work_start: NaiveTime) -> bool {
        self.check_in.is_some_and(|t| t.time() > work_start)
    }

    /// Elapsed hours between check-in and check-out, rounded to 2 dp.
    ///
    /// Incomplete days have zero worked hours.
    pub fn worked_hours(&self) -> Decimal {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                hours_from_millis((check_out - check_in).num_milliseconds())
            }
            _ => ZERO_HOURS,
        }
    }
}
