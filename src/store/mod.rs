//! Storage of attendance records and cached salary records.
//!
//! The engine owns no persistence of its own. It talks to storage through
//! the [`AttendanceStore`] trait, which guarantees one attendance record per
//! (employee, date) and one salary record per (employee, month).
//! [`MemoryStore`] is the in-process implementation used by the server and
//! the tests.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, MonthlySalaryRecord, PayMonth};

/// Storage collaborator for attendance and salary state.
pub trait AttendanceStore: Send + Sync {
    // Attendance records

    /// Runs `update` against the record slot for (`employee_id`, `date`)
    /// as a single atomic step.
    ///
    /// The slot holds the current record, if any. Whatever the slot holds
    /// when `update` returns is stored. No other `update_day` call for the
    /// same employee can interleave with this one.
    fn update_day<T, F>(&self, employee_id: &str, date: NaiveDate, update: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Option<AttendanceRecord>) -> T;

    /// The record for (`employee_id`, `date`), if one exists.
    fn get_day(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>>;

    /// One employee's records with `start <= date <= end`, ordered by date.
    fn records_for_employee(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Every employee's records with `start <= date <= end`.
    fn records_between(&self, start: NaiveDate, end: NaiveDate)
    -> EngineResult<Vec<AttendanceRecord>>;

    // Salary cache

    /// Stores `record`, replacing any record for the same employee and month.
    fn put_salary(&self, record: MonthlySalaryRecord) -> EngineResult<()>;

    /// The cached salary for (`employee_id`, `month`), if computed before.
    fn get_salary(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<Option<MonthlySalaryRecord>>;
}
