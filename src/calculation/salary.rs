//! Monthly salary calculation.
//!
//! The salary for a month is the employee's base salary adjusted by the
//! month's late, early-leave and overtime hours at the configured rates:
//!
//! ```text
//! late_deductions        = total_late_hours        * late_deduction_rate_per_hour
//! early_leave_deductions = total_early_leave_hours * early_leave_deduction_rate_per_hour
//! overtime_additions     = total_overtime_hours    * overtime_rate_per_hour
//! final_salary           = base - late_deductions - early_leave_deductions + overtime_additions
//! ```
//!
//! Each component is rounded to 2 dp before `final_salary` is formed, so the
//! identity holds exactly on the stored values. The result is not clamped and
//! may be negative.

use crate::calculation::round_2dp;
use crate::config::TimeWindowRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, MonthTotals, MonthlySalaryRecord, PayMonth};

/// Computes one employee's salary for `month` from the summed hours.
///
/// # Errors
///
/// Returns `MissingConfiguration` when `rules` is `None`. No partial record
/// is produced in that case.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::calculate_salary;
/// use attendance_payroll::config::TimeWindowRules;
/// use attendance_payroll::models::{Employee, MonthTotals, PayMonth};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let rules = TimeWindowRules {
///     work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     hours_per_day: Decimal::new(8, 0),
///     hourly_rate: Decimal::new(20, 0),
///     late_deduction_rate_per_hour: Decimal::new(10, 0),
///     early_leave_deduction_rate_per_hour: Decimal::new(10, 0),
///     overtime_rate_per_hour: Decimal::new(15, 0),
/// };
/// let employee = Employee {
///     id: "EMP0001".to_string(),
///     name: "Priya Raman".to_string(),
///     designation: String::new(),
///     date_joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     base_salary: Decimal::new(3000, 0),
///     is_active: true,
/// };
/// let totals = MonthTotals {
///     total_late_hours: Decimal::new(2, 0),
///     ..MonthTotals::default()
/// };
///
/// let month: PayMonth = "2026-01".parse().unwrap();
/// let record = calculate_salary(&employee, month, &totals, Some(&rules)).unwrap();
/// assert_eq!(record.late_deductions, Decimal::new(2000, 2));
/// assert_eq!(record.final_salary, Decimal::new(298000, 2));
/// ```
pub fn calculate_salary(
    employee: &Employee,
    month: PayMonth,
    totals: &MonthTotals,
    rules: Option<&TimeWindowRules>,
) -> EngineResult<MonthlySalaryRecord> {
    let rules = rules.ok_or_else(|| EngineError::MissingConfiguration {
        context: format!("salary for {} in {}", employee.id, month),
    })?;

    let base_salary = round_2dp(employee.base_salary);
    let late_deductions = round_2dp(totals.total_late_hours * rules.late_deduction_rate_per_hour);
    let early_leave_deductions =
        round_2dp(totals.total_early_leave_hours * rules.early_leave_deduction_rate_per_hour);
    let overtime_additions =
        round_2dp(totals.total_overtime_hours * rules.overtime_rate_per_hour);

    let final_salary = base_salary - late_deductions - early_leave_deductions + overtime_additions;

    Ok(MonthlySalaryRecord {
        employee_id: employee.id.clone(),
        month,
        base_salary,
        total_late_hours: round_2dp(totals.total_late_hours),
        total_early_leave_hours: round_2dp(totals.total_early_leave_hours),
        total_overtime_hours: round_2dp(totals.total_overtime_hours),
        late_deductions,
        early_leave_deductions,
        overtime_additions,
        final_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rules() -> TimeWindowRules {
        TimeWindowRules {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            hours_per_day: dec("8"),
            hourly_rate: dec("20"),
            late_deduction_rate_per_hour: dec("10"),
            early_leave_deduction_rate_per_hour: dec("10"),
            overtime_rate_per_hour: dec("15"),
        }
    }

    fn employee(base_salary: &str) -> Employee {
        Employee {
            id: "EMP0001".to_string(),
            name: "Priya Raman".to_string(),
            designation: "Technician".to_string(),
            date_joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            base_salary: dec(base_salary),
            is_active: true,
        }
    }

    fn totals(late: &str, early: &str, overtime: &str) -> MonthTotals {
        MonthTotals {
            total_late_hours: dec(late),
            total_early_leave_hours: dec(early),
            total_overtime_hours: dec(overtime),
        }
    }

    fn january() -> PayMonth {
        "2026-01".parse().unwrap()
    }

    /// SAL-001: two late hours at 10 per hour
    #[test]
    fn test_sal_001_late_deduction() {
        let record =
            calculate_salary(&employee("3000"), january(), &totals("2", "0", "0"), Some(&rules()))
                .unwrap();

        assert_eq!(record.late_deductions, dec("20.00"));
        assert_eq!(record.early_leave_deductions, dec("0.00"));
        assert_eq!(record.overtime_additions, dec("0.00"));
        assert_eq!(record.final_salary, dec("2980.00"));
    }

    /// SAL-002: one half-hour late day and one hour of overtime
    #[test]
    fn test_sal_002_late_and_overtime() {
        let record = calculate_salary(
            &employee("3000"),
            january(),
            &totals("0.50", "0", "1.00"),
            Some(&rules()),
        )
        .unwrap();

        assert_eq!(record.late_deductions, dec("5.00"));
        assert_eq!(record.overtime_additions, dec("15.00"));
        assert_eq!(record.final_salary, dec("3010.00"));
    }

    /// SAL-003: no attendance leaves the base salary unchanged
    #[test]
    fn test_sal_003_no_attendance() {
        let record = calculate_salary(
            &employee("2500"),
            january(),
            &MonthTotals::default(),
            Some(&rules()),
        )
        .unwrap();

        assert_eq!(record.final_salary, dec("2500.00"));
        assert_eq!(record.total_late_hours, dec("0.00"));
    }

    /// SAL-004: deductions larger than the base produce a negative salary
    #[test]
    fn test_sal_004_negative_final_salary() {
        let record = calculate_salary(
            &employee("100"),
            january(),
            &totals("8", "8", "0"),
            Some(&rules()),
        )
        .unwrap();

        assert_eq!(record.final_salary, dec("-60.00"));
    }

    /// SAL-005: missing rules fail before any computation
    #[test]
    fn test_sal_005_missing_rules() {
        let result = calculate_salary(&employee("3000"), january(), &totals("1", "0", "0"), None);

        match result {
            Err(EngineError::MissingConfiguration { context }) => {
                assert!(context.contains("EMP0001"));
                assert!(context.contains("2026-01"));
            }
            other => panic!("Expected MissingConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_components_rounded_before_final() {
        let mut rules = rules();
        rules.late_deduction_rate_per_hour = dec("12.345");
        let record = calculate_salary(
            &employee("1000"),
            january(),
            &totals("0.33", "0", "0"),
            Some(&rules),
        )
        .unwrap();

        // 0.33 * 12.345 = 4.07385
        assert_eq!(record.late_deductions, dec("4.07"));
        assert_eq!(
            record.final_salary,
            record.base_salary - record.late_deductions - record.early_leave_deductions
                + record.overtime_additions
        );
    }

    #[test]
    fn test_record_carries_month_and_employee() {
        let record =
            calculate_salary(&employee("3000"), january(), &totals("0", "0", "0"), Some(&rules()))
                .unwrap();
        assert_eq!(record.employee_id, "EMP0001");
        assert_eq!(record.month, january());
        assert_eq!(record.base_salary.to_string(), "3000.00");
    }
}
