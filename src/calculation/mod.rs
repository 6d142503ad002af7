//! Calculation logic for the attendance and payroll engine.
//!
//! This module contains the pure functions that turn attendance records into
//! money: per-day late, early-leave and overtime durations, monthly
//! aggregation of those hours, the monthly salary formula, and attendance
//! summaries over date ranges.

mod attendance_summary;
mod durations;
mod monthly_aggregate;
mod rounding;
mod salary;

pub use attendance_summary::{late_check_ins, summarize_attendance};
pub use durations::{DayDurations, compute_durations, day_durations, hours_between};
pub use monthly_aggregate::aggregate_month;
pub use rounding::{MILLIS_PER_HOUR, ZERO_HOURS, hours_from_millis, round_2dp};
pub use salary::calculate_salary;
