//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::Roster;

use super::types::{EmployeesConfig, OrganizationConfig, PayrollConfig, TimeWindowRules};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── organization.yaml   # Name, timezone, bind address, scanner backend
/// ├── employees.yaml      # Employee roster
/// └── rules.yaml          # Time window rules (optional until salaries are needed)
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll")?;
/// println!("Loaded {} employees", loader.config().roster().len());
/// # Ok::<(), attendance_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - organization.yaml or employees.yaml is missing
    /// - Any file contains invalid YAML
    /// - An employee or the rules violate their invariants
    ///
    /// A missing rules.yaml is not an error; calculations that need the rules
    /// fail later with `MissingConfiguration`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization = Self::load_yaml::<OrganizationConfig>(&path.join("organization.yaml"))?;

        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;
        let mut roster = Roster::new(employees.employees)?;
        if let Some(amount) = employees.default_base_salary {
            let updated = roster.apply_default_base_salary(amount)?;
            info!(updated, default_base_salary = %amount, "Applied default base salary");
        }

        let rules_path = path.join("rules.yaml");
        let rules = if rules_path.exists() {
            Some(Self::load_yaml::<TimeWindowRules>(&rules_path)?)
        } else {
            warn!(path = %rules_path.display(), "No time window rules configured");
            None
        };

        let config = PayrollConfig::new(organization, roster, rules)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
