//! Configuration types for attendance and payroll.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{FixedOffset, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Roster};

/// The organization's standard workday and rate configuration.
///
/// A single set of rules applies to every employee. It is read-only during
/// computation and is passed explicitly into every calculation.
///
/// # Example
///
/// ```
/// use attendance_payroll::config::TimeWindowRules;
/// use chrono::NaiveTime;
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
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindowRules {
    /// Standard start of the workday.
    pub work_start: NaiveTime,
    /// Standard end of the workday.
    pub work_end: NaiveTime,
    /// Standard working hours per day.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Deducted per hour of lateness.
    pub late_deduction_rate_per_hour: Decimal,
    /// Deducted per hour of leaving early.
    pub early_leave_deduction_rate_per_hour: Decimal,
    /// Added per hour of overtime.
    pub overtime_rate_per_hour: Decimal,
}

fn default_hours_per_day() -> Decimal {
    Decimal::new(8, 0)
}

impl TimeWindowRules {
    /// Checks `work_start < work_end`, a positive working day and
    /// non-negative rates.
    pub fn validate(&self) -> EngineResult<()> {
        if self.work_start >= self.work_end {
            return Err(EngineError::InvalidRules {
                field: "work_start".to_string(),
                message: format!(
                    "{} must be before work_end {}",
                    self.work_start, self.work_end
                ),
            });
        }

        if self.hours_per_day <= Decimal::ZERO {
            return Err(EngineError::InvalidRules {
                field: "hours_per_day".to_string(),
                message: format!("{} must be positive", self.hours_per_day),
            });
        }

        let rates = [
            ("hourly_rate", self.hourly_rate),
            ("late_deduction_rate_per_hour", self.late_deduction_rate_per_hour),
            (
                "early_leave_deduction_rate_per_hour",
                self.early_leave_deduction_rate_per_hour,
            ),
            ("overtime_rate_per_hour", self.overtime_rate_per_hour),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO {
                return Err(EngineError::InvalidRules {
                    field: field.to_string(),
                    message: format!("{} must not be negative", rate),
                });
            }
        }

        Ok(())
    }
}

/// Which biometric matcher backend to start with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatcherConfig {
    /// No scanner attached; scans fail with `ScannerUnavailable`.
    #[default]
    Disabled,
    /// Replays a fixed sequence of scan results. `~` entries are no-match.
    Scripted {
        /// Employee ids to return, in order.
        #[serde(default)]
        outcomes: Vec<Option<String>>,
    },
}

/// Organization settings from organization.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    /// The organization's name.
    pub name: String,
    /// Offset of the organizational timezone from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Address the HTTP server listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Scanner backend.
    #[serde(default)]
    pub matcher: MatcherConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

impl OrganizationConfig {
    /// The fixed organizational timezone.
    pub fn timezone(&self) -> EngineResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            EngineError::ConfigParseError {
                path: "organization.yaml".to_string(),
                message: format!(
                    "utc_offset_minutes {} is outside -1439..=1439",
                    self.utc_offset_minutes
                ),
            }
        })
    }
}

/// Employees configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// Employees in the roster.
    pub employees: Vec<Employee>,
    /// Given to every employee whose base salary is zero.
    #[serde(default)]
    pub default_base_salary: Option<Decimal>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    organization: OrganizationConfig,
    timezone: FixedOffset,
    roster: Roster,
    rules: Option<TimeWindowRules>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig, validating the timezone and rules.
    pub fn new(
        organization: OrganizationConfig,
        roster: Roster,
        rules: Option<TimeWindowRules>,
    ) -> EngineResult<Self> {
        let timezone = organization.timezone()?;
        if let Some(rules) = &rules {
            rules.validate()?;
        }
        Ok(Self {
            organization,
            timezone,
            roster,
            rules,
        })
    }

    /// Returns the organization settings.
    pub fn organization(&self) -> &OrganizationConfig {
        &self.organization
    }

    /// Returns the fixed organizational timezone.
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Returns the employee roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the time window rules, if configured.
    pub fn rules(&self) -> Option<&TimeWindowRules> {
        self.rules.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn valid_rules() -> TimeWindowRules {
        TimeWindowRules {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            hours_per_day: dec("8.00"),
            hourly_rate: dec("20.00"),
            late_deduction_rate_per_hour: dec("10.00"),
            early_leave_deduction_rate_per_hour: dec("10.00"),
            overtime_rate_per_hour: dec("15.00"),
        }
    }

    fn organization(offset: i32) -> OrganizationConfig {
        OrganizationConfig {
            name: "Acme".to_string(),
            utc_offset_minutes: offset,
            bind_address: default_bind_address(),
            matcher: MatcherConfig::Disabled,
        }
    }

    #[test]
    fn test_valid_rules() {
        assert!(valid_rules().validate().is_ok());
    }

    #[test]
    fn test_work_start_must_precede_work_end() {
        let mut rules = valid_rules();
        rules.work_end = rules.work_start;
        match rules.validate() {
            Err(EngineError::InvalidRules { field, .. }) => assert_eq!(field, "work_start"),
            other => panic!("Expected InvalidRules, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut rules = valid_rules();
        rules.overtime_rate_per_hour = dec("-1");
        match rules.validate() {
            Err(EngineError::InvalidRules { field, .. }) => {
                assert_eq!(field, "overtime_rate_per_hour")
            }
            other => panic!("Expected InvalidRules, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rates_allowed() {
        let mut rules = valid_rules();
        rules.late_deduction_rate_per_hour = Decimal::ZERO;
        rules.hourly_rate = Decimal::ZERO;
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_non_positive_hours_per_day_rejected() {
        let mut rules = valid_rules();
        rules.hours_per_day = Decimal::ZERO;
        assert!(matches!(
            rules.validate(),
            Err(EngineError::InvalidRules { .. })
        ));
    }

    #[test]
    fn test_deserialize_rules_yaml() {
        let yaml = r#"
work_start: "09:00:00"
work_end: "17:00:00"
hourly_rate: "20.00"
late_deduction_rate_per_hour: "10.00"
early_leave_deduction_rate_per_hour: "10.00"
overtime_rate_per_hour: "15.00"
"#;
        let rules: TimeWindowRules = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules, valid_rules());
    }

    #[test]
    fn test_deserialize_scripted_matcher() {
        let yaml = r#"
kind: scripted
outcomes: ["EMP0001", ~]
"#;
        let matcher: MatcherConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            matcher,
            MatcherConfig::Scripted {
                outcomes: vec![Some("EMP0001".to_string()), None]
            }
        );
    }

    #[test]
    fn test_timezone_offset() {
        let tz = organization(330).timezone().unwrap();
        assert_eq!(tz.local_minus_utc(), 330 * 60);
        assert!(organization(24 * 60).timezone().is_err());
    }

    #[test]
    fn test_payroll_config_validates_rules() {
        let mut rules = valid_rules();
        rules.work_start = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        let result = PayrollConfig::new(organization(0), Roster::default(), Some(rules));
        assert!(matches!(result, Err(EngineError::InvalidRules { .. })));
    }

    #[test]
    fn test_payroll_config_without_rules() {
        let config = PayrollConfig::new(organization(0), Roster::default(), None).unwrap();
        assert!(config.rules().is_none());
        assert_eq!(config.timezone().local_minus_utc(), 0);
    }
}
