//! Core data models for the attendance and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance_record;
mod attendance_summary;
mod employee;
mod event;
mod pay_month;
mod salary_record;

pub use attendance_record::AttendanceRecord;
pub use attendance_summary::{AttendanceSummary, PresenceSnapshot};
pub use employee::{Employee, Roster};
pub use event::{EventOutcome, Rejection, RejectionReason};
pub use pay_month::PayMonth;
pub use salary_record::{MonthTotals, MonthlySalaryRecord, SalaryOutcome, SalaryReportEntry};
