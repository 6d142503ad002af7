//! Late, early-leave and overtime duration computation.
//!
//! This module converts one day's check-in/check-out pair into fractional
//! hours by comparing wall-clock times of day against the standard workday
//! boundaries in [`TimeWindowRules`].
//!
//! Only times of day are compared. Events are dated by their local calendar
//! day, so a scan after midnight opens a new record for the next date and
//! the earlier day stays without a check-out.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{hours_from_millis, ZERO_HOURS};
use crate::config::TimeWindowRules;
use crate::models::AttendanceRecord;

/// Hours derived from one completed day.
///
/// At most one of `early_leave_hours` and `overtime_hours` is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDurations {
    /// Check-in time after the standard start.
    pub late_hours: Decimal,
    /// Check-out time before the standard end.
    pub early_leave_hours: Decimal,
    /// Check-out time after the standard end.
    pub overtime_hours: Decimal,
}

impl Default for DayDurations {
    fn default() -> Self {
        Self {
            late_hours: ZERO_HOURS,
            early_leave_hours: ZERO_HOURS,
            overtime_hours: ZERO_HOURS,
        }
    }
}

/// Hours from `earlier` to `later` within one day, rounded to 2 dp.
///
/// Returns zero when `later` is not after `earlier`.
pub fn hours_between(earlier: NaiveTime, later: NaiveTime) -> Decimal {
    if later <= earlier {
        return ZERO_HOURS;
    }
    hours_from_millis((later - earlier).num_milliseconds())
}

/// Computes the durations for a check-in and check-out time of day.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::day_durations;
/// use attendance_payroll::config::TimeWindowRules;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = TimeWindowRules {
///     work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     hours_per_day: Decimal::new(8, 0),
///     hourly_rate: Decimal::ZERO,
///     late_deduction_rate_per_hour: Decimal::new(10, 0),
///     early_leave_deduction_rate_per_hour: Decimal::new(10, 0),
///     overtime_rate_per_hour: Decimal::new(15, 0),
/// };
///
/// let durations = day_durations(
///     NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     &rules,
/// );
/// assert_eq!(durations.late_hours, Decimal::from_str("0.50").unwrap());
/// assert_eq!(durations.early_leave_hours, Decimal::ZERO);
/// assert_eq!(durations.overtime_hours, Decimal::from_str("1.00").unwrap());
/// ```
pub fn day_durations(
    check_in: NaiveTime,
    check_out: NaiveTime,
    rules: &TimeWindowRules,
) -> DayDurations {
    let late_hours = if check_in > rules.work_start {
        hours_between(rules.work_start, check_in)
    } else {
        ZERO_HOURS
    };

    let early_leave_hours = if check_out < rules.work_end {
        hours_between(check_out, rules.work_end)
    } else {
        ZERO_HOURS
    };

    let overtime_hours = if check_out > rules.work_end {
        hours_between(rules.work_end, check_out)
    } else {
        ZERO_HOURS
    };

    DayDurations {
        late_hours,
        early_leave_hours,
        overtime_hours,
    }
}

/// Returns a copy of `record` with its derived hours computed.
///
/// Pure and idempotent: the derived fields depend only on the two timestamps
/// and the rules, and every field is overwritten. Records missing either
/// timestamp are returned unchanged.
pub fn compute_durations(record: &AttendanceRecord, rules: &TimeWindowRules) -> AttendanceRecord {
    let mut computed = record.clone();
    let (Some(check_in), Some(check_out)) = (record.check_in, record.check_out) else {
        return computed;
    };

    let durations = day_durations(check_in.time(), check_out.time(), rules);
    computed.late_hours = durations.late_hours;
    computed.early_leave_hours = durations.early_leave_hours;
    computed.overtime_hours = durations.overtime_hours;
    computed
}
