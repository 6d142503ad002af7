//! Employee model and the roster of employees known to the engine.
//!
//! This module defines the [`Employee`] struct and the [`Roster`] lookup
//! used by the payroll service to resolve ids to base salaries.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

static EMPLOYEE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EMP\d{4}$").expect("employee id pattern is valid"));

/// Represents an employee whose attendance is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier in the form `EMP1234`.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Job title.
    #[serde(default)]
    pub designation: String,
    /// The date the employee joined.
    pub date_joined: NaiveDate,
    /// Monthly base salary before deductions and additions.
    #[serde(default)]
    pub base_salary: Decimal,
    /// Inactive employees are excluded from batch salary reports.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Checks the id format and that the base salary is non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_payroll::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "EMP0001".to_string(),
    ///     name: "Ada Lovelace".to_string(),
    ///     designation: "Engineer".to_string(),
    ///     date_joined: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///     base_salary: Decimal::new(3000, 0),
    ///     is_active: true,
    /// };
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if !EMPLOYEE_ID_PATTERN.is_match(&self.id) {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: format!("'{}' must be EMP followed by four digits", self.id),
            });
        }
        if self.base_salary < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "base_salary".to_string(),
                message: format!("{} must not be negative", self.base_salary),
            });
        }
        Ok(())
    }
}

/// The set of employees, keyed and ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    employees: BTreeMap<String, Employee>,
}

impl Roster {
    /// Builds a roster, validating every employee and rejecting duplicate ids.
    pub fn new(employees: Vec<Employee>) -> EngineResult<Self> {
        let mut by_id = BTreeMap::new();
        for employee in employees {
            employee.validate()?;
            if by_id.contains_key(&employee.id) {
                return Err(EngineError::InvalidEmployee {
                    field: "id".to_string(),
                    message: format!("duplicate employee id '{}'", employee.id),
                });
            }
            by_id.insert(employee.id.clone(), employee);
        }
        Ok(Self { employees: by_id })
    }

    /// Looks up an employee by id.
    pub fn get(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Active employees in id order.
    pub fn active(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values().filter(|e| e.is_active)
    }

    /// Number of employees in the roster.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the roster has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Gives every employee with a zero base salary the supplied amount.
    ///
    /// Returns the number of employees updated.
    pub fn apply_default_base_salary(&mut self, amount: Decimal) -> EngineResult<usize> {
        if amount < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "base_salary".to_string(),
                message: format!("default {} must not be negative", amount),
            });
        }

        let mut updated = 0;
        for employee in self.employees.values_mut() {
            if employee.base_salary.is_zero() {
                employee.base_salary = amount;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
