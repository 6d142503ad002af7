//! Monthly salary models.
//!
//! This module contains [`MonthTotals`] (the summed hours for one employee and
//! month), [`MonthlySalaryRecord`] (the cached salary computed from them) and
//! the per-employee entries of a batch salary report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayMonth;
use crate::error::EngineError;

/// Hours summed over one employee's attendance records for a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Total late hours.
    pub total_late_hours: Decimal,
    /// Total early-leave hours.
    pub total_early_leave_hours: Decimal,
    /// Total overtime hours.
    pub total_overtime_hours: Decimal,
}

/// The salary for one employee and month.
///
/// A cache over the month's attendance records: it can be recomputed at any
/// time and every recomputation replaces the whole record.
///
/// `final_salary == base_salary - late_deductions - early_leave_deductions + overtime_additions`
/// holds exactly for every record produced by the salary calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySalaryRecord {
    /// The employee this salary belongs to.
    pub employee_id: String,
    /// The salary month.
    pub month: PayMonth,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Total late hours for the month.
    pub total_late_hours: Decimal,
    /// Total early-leave hours for the month.
    pub total_early_leave_hours: Decimal,
    /// Total overtime hours for the month.
    pub total_overtime_hours: Decimal,
    /// Amount deducted for late arrival.
    pub late_deductions: Decimal,
    /// Amount deducted for leaving early.
    pub early_leave_deductions: Decimal,
    /// Amount added for overtime.
    pub overtime_additions: Decimal,
    /// Base salary after deductions and additions. May be negative.
    pub final_salary: Decimal,
}

/// Outcome of one employee's salary calculation inside a batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SalaryOutcome {
    /// The salary was computed.
    Success {
        /// The computed record.
        record: MonthlySalaryRecord,
    },
    /// The salary could not be computed for this employee.
    Failure {
        /// Machine-readable failure kind.
        code: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl From<EngineError> for SalaryOutcome {
    fn from(error: EngineError) -> Self {
        SalaryOutcome::Failure {
            code: error.code().to_string(),
            reason: error.to_string(),
        }
    }
}

/// One line of a batch salary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReportEntry {
    /// The employee the line is for.
    pub employee_id: String,
    /// Success or failure for this employee.
    #[serde(flatten)]
    pub outcome: SalaryOutcome,
}

impl SalaryReportEntry {
    /// Returns true if the salary was computed.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SalaryOutcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_outcome_from_error() {
        let outcome: SalaryOutcome = EngineError::MissingConfiguration {
            context: "salary for EMP0001 in 2026-01".to_string(),
        }
        .into();

        match outcome {
            SalaryOutcome::Failure { code, reason } => {
                assert_eq!(code, "MISSING_CONFIGURATION");
                assert!(reason.contains("EMP0001"));
            }
            _ => panic!("Expected Failure"),
        }
    }

    #[test]
    fn test_report_entry_serialization_is_flat() {
        let entry = SalaryReportEntry {
            employee_id: "EMP0002".to_string(),
            outcome: SalaryOutcome::Failure {
                code: "EMPLOYEE_NOT_FOUND".to_string(),
                reason: "Employee not found: EMP0002".to_string(),
            },
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["employee_id"], "EMP0002");
        assert_eq!(json["status"], "failure");
        assert_eq!(json["code"], "EMPLOYEE_NOT_FOUND");
        assert!(!entry.is_success());
    }

    #[test]
    fn test_month_totals_default_is_zero() {
        let totals = MonthTotals::default();
        assert_eq!(totals.total_late_hours, Decimal::ZERO);
        assert_eq!(totals.total_early_leave_hours, Decimal::ZERO);
        assert_eq!(totals.total_overtime_hours, Decimal::ZERO);
    }
}
