//! Attendance reporting models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AttendanceRecord;

/// Attendance statistics for one employee over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee summarised.
    pub employee_id: String,
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
    /// Calendar days in the range.
    pub total_days: u32,
    /// Days with an attendance record, complete or not.
    pub present_days: u32,
    /// `total_days - present_days`.
    pub absent_days: u32,
    /// Hours between check-in and check-out over completed days.
    pub total_hours: Decimal,
    /// `present_days / total_days * 100`, rounded to 2 dp.
    pub attendance_percentage: Decimal,
}

/// Employees currently on site for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// The date inspected.
    pub date: NaiveDate,
    /// Records with a check-in and no check-out yet.
    pub present: Vec<AttendanceRecord>,
    /// Active employees in the roster.
    pub active_employees: usize,
}
