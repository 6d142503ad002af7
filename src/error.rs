//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording attendance and
//! computing salaries.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance and payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No time window rules are configured, so the requested calculation
    /// cannot run. An administrator must configure the rules first.
    #[error("Time window rules are not configured ({context})")]
    MissingConfiguration {
        /// What was being computed when the rules were needed.
        context: String,
    },

    /// The configured time window rules violate an invariant.
    #[error("Invalid time window rule '{field}': {message}")]
    InvalidRules {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The employee id is not in the roster.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee id.
        employee_id: String,
    },

    /// The employee already checked in and out on this date.
    #[error("Employee '{employee_id}' has already checked out on {date}")]
    AlreadyCheckedOut {
        /// The employee that scanned.
        employee_id: String,
        /// The organizational calendar date of the scan.
        date: NaiveDate,
    },

    /// A check-out scan was not strictly later than the day's check-in.
    #[error("Check-out for employee '{employee_id}' on {date} is not after check-in")]
    CheckOutNotAfterCheckIn {
        /// The employee that scanned.
        employee_id: String,
        /// The organizational calendar date of the scan.
        date: NaiveDate,
    },

    /// A second read of the same finger arrived within a second of the
    /// check-in and was not taken as a check-out.
    #[error("Duplicate scan for employee '{employee_id}' on {date} ignored")]
    DuplicateScan {
        /// The employee that scanned.
        employee_id: String,
        /// The organizational calendar date of the scan.
        date: NaiveDate,
    },

    /// The biometric matcher did not resolve an employee.
    #[error("No matching fingerprint found")]
    NoMatch,

    /// The biometric matcher could not be used.
    #[error("Fingerprint scanner unavailable: {message}")]
    ScannerUnavailable {
        /// A description of the scanner failure.
        message: String,
    },

    /// A date range ended before it started.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// The first day of the range.
        start: NaiveDate,
        /// The last day of the range.
        end: NaiveDate,
    },

    /// A month string could not be parsed.
    #[error("Invalid month '{value}', expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// The storage collaborator failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::MissingConfiguration { .. } => "MISSING_CONFIGURATION",
            EngineError::InvalidRules { .. } => "INVALID_RULES",
            EngineError::InvalidEmployee { .. } => "INVALID_EMPLOYEE",
            EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
            EngineError::AlreadyCheckedOut { .. } => "ALREADY_CHECKED_OUT",
            EngineError::CheckOutNotAfterCheckIn { .. } => "CHECK_OUT_NOT_AFTER_CHECK_IN",
            EngineError::DuplicateScan { .. } => "DUPLICATE_SCAN",
            EngineError::NoMatch => "NO_MATCH",
            EngineError::ScannerUnavailable { .. } => "SCANNER_UNAVAILABLE",
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::InvalidMonth { .. } => "INVALID_MONTH",
            EngineError::Storage { .. } => "STORAGE_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
