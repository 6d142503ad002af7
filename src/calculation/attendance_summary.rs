//! Attendance statistics over a date range.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::calculation::round_2dp;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceSummary, PayMonth};

/// Summarises one employee's attendance between `start` and `end` inclusive.
///
/// Any record in the range counts as a present day, whether or not it has a
/// check-out. Only completed days contribute to `total_hours`.
///
/// # Errors
///
/// Returns `InvalidDateRange` when `end` is before `start`.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::summarize_attendance;
/// use attendance_payroll::models::AttendanceRecord;
/// use chrono::{DateTime, NaiveDate};
///
/// let mut record = AttendanceRecord::checked_in(
///     "EMP0001",
///     DateTime::parse_from_rfc3339("2026-01-05T09:00:00+00:00").unwrap(),
/// );
/// record.check_out = Some(DateTime::parse_from_rfc3339("2026-01-05T17:00:00+00:00").unwrap());
///
/// let summary = summarize_attendance(
///     "EMP0001",
///     &[record],
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(summary.total_days, 10);
/// assert_eq!(summary.present_days, 1);
/// assert_eq!(summary.attendance_percentage.to_string(), "10.00");
/// ```
pub fn summarize_attendance(
    employee_id: &str,
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<AttendanceSummary> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let total_days = u32::try_from((end - start).num_days() + 1).map_err(|_| {
        EngineError::InvalidDateRange { start, end }
    })?;

    let in_range = || {
        records
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
    };

    let present_days = in_range().count() as u32;
    let total_hours: Decimal = in_range().map(AttendanceRecord::worked_hours).sum();
    let attendance_percentage = round_2dp(
        Decimal::from(present_days) / Decimal::from(total_days) * Decimal::ONE_HUNDRED,
    );

    Ok(AttendanceSummary {
        employee_id: employee_id.to_string(),
        start_date: start,
        end_date: end,
        total_days,
        present_days,
        absent_days: total_days.saturating_sub(present_days),
        total_hours: round_2dp(total_hours),
        attendance_percentage,
    })
}

/// Returns the employee's records in `month` whose check-in is after
/// `work_start`, ordered by date.
pub fn late_check_ins(
    records: &[AttendanceRecord],
    employee_id: &str,
    month: PayMonth,
    work_start: NaiveTime,
) -> Vec<AttendanceRecord> {
    let mut late: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee_id && month.contains_date(r.date))
        .filter(|r| r.is_late_check_in(work_start))
        .cloned()
        .collect();
    late.sort_by_key(|r| r.date);
    late
}
