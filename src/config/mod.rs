//! Configuration loading and management for the attendance and payroll engine.
//!
//! This module provides functionality to load configuration from YAML files:
//! organization settings, the employee roster, and the time window rules.
//!
//! # Example
//!
//! ```no_run
//! use attendance_payroll::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Loaded organization: {}", loader.config().organization().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeesConfig, MatcherConfig, OrganizationConfig, PayrollConfig, TimeWindowRules};
