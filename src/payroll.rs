//! The payroll service: the engine's exposed interface.
//!
//! [`PayrollService`] ties the roster and rules from configuration to an
//! [`AttendanceStore`]. It records scans through the
//! [`AttendanceEventProcessor`] and answers the salary and attendance
//! queries used by the HTTP layer.
//!
//! The time window rules start from configuration and can be replaced at
//! runtime with [`PayrollService::set_rules`]. Each operation reads the rules
//! once, so an event or salary in progress finishes with the rules it
//! started with.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use attendance_payroll::config::ConfigLoader;
//! use attendance_payroll::payroll::PayrollService;
//! use attendance_payroll::store::MemoryStore;
//! use chrono::Utc;
//!
//! let config = ConfigLoader::load("./config/payroll")?.into_config();
//! let service = PayrollService::new(config, Arc::new(MemoryStore::new()));
//!
//! let outcome = service.record_event("EMP0001", Utc::now())?;
//! println!("{:?}", outcome);
//! # Ok::<(), attendance_payroll::error::EngineError>(())
//! ```

use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::{debug, info, warn};

use crate::biometric::{BiometricMatcher, MatchOutcome};
use crate::calculation::{aggregate_month, calculate_salary, late_check_ins, summarize_attendance};
use crate::config::{PayrollConfig, TimeWindowRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceSummary, EventOutcome, MonthlySalaryRecord, PayMonth,
    PresenceSnapshot, SalaryOutcome, SalaryReportEntry,
};
use crate::processor::AttendanceEventProcessor;
use crate::store::AttendanceStore;

/// Attendance recording and salary reporting over one store.
#[derive(Debug)]
pub struct PayrollService<S> {
    config: Arc<PayrollConfig>,
    rules: Arc<RwLock<Option<Arc<TimeWindowRules>>>>,
    store: Arc<S>,
    processor: AttendanceEventProcessor<S>,
}

impl<S> Clone for PayrollService<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            rules: Arc::clone(&self.rules),
            store: Arc::clone(&self.store),
            processor: self.processor.clone(),
        }
    }
}

impl<S: AttendanceStore> PayrollService<S> {
    /// Creates a service over `store` using the roster, rules and timezone
    /// from `config`.
    pub fn new(config: PayrollConfig, store: Arc<S>) -> Self {
        let processor = AttendanceEventProcessor::new(Arc::clone(&store), config.timezone());
        let rules = config.rules().cloned().map(Arc::new);
        Self {
            config: Arc::new(config),
            rules: Arc::new(RwLock::new(rules)),
            store,
            processor,
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The rules in effect now, if any are configured.
    pub fn current_rules(&self) -> EngineResult<Option<Arc<TimeWindowRules>>> {
        let rules = self.rules.read().map_err(|_| EngineError::Storage {
            message: "time window rules lock poisoned".to_string(),
        })?;
        Ok(rules.clone())
    }

    /// Validates `rules` and makes them the rules for every later operation.
    ///
    /// # Errors
    ///
    /// `InvalidRules` if validation fails; the previous rules stay in effect.
    pub fn set_rules(&self, rules: TimeWindowRules) -> EngineResult<Arc<TimeWindowRules>> {
        rules.validate()?;
        let rules = Arc::new(rules);
        let mut slot = self.rules.write().map_err(|_| EngineError::Storage {
            message: "time window rules lock poisoned".to_string(),
        })?;
        let replaced = slot.replace(Arc::clone(&rules)).is_some();
        info!(
            work_start = %rules.work_start,
            work_end = %rules.work_end,
            replaced,
            "Time window rules updated"
        );
        Ok(rules)
    }

    fn rules(&self, context: impl FnOnce() -> String) -> EngineResult<Arc<TimeWindowRules>> {
        self.current_rules()?
            .ok_or_else(|| EngineError::MissingConfiguration { context: context() })
    }

    /// Records a scan for a known employee.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the id is not in the roster.
    /// - `MissingConfiguration` if no rules are configured. The store is not
    ///   touched in that case.
    ///
    /// Business rejections come back as `Ok(EventOutcome::Rejected { .. })`.
    pub fn record_event<Tz: TimeZone>(
        &self,
        employee_id: &str,
        timestamp: DateTime<Tz>,
    ) -> EngineResult<EventOutcome> {
        self.config.roster().get(employee_id)?;
        let rules = self.rules(|| format!("attendance event for {}", employee_id))?;
        self.processor.process(employee_id, timestamp, &rules)
    }

    /// Takes one scan from `matcher` and records it at `now`.
    ///
    /// # Errors
    ///
    /// `NoMatch` when the fingerprint is not recognised; nothing is recorded.
    /// Scanner failures are passed through unchanged.
    pub fn scan_and_record<Tz: TimeZone>(
        &self,
        matcher: &dyn BiometricMatcher,
        now: DateTime<Tz>,
    ) -> EngineResult<EventOutcome> {
        match matcher.scan_for_match()? {
            MatchOutcome::Matched(employee_id) => {
                debug!(employee_id = %employee_id, "Fingerprint matched");
                self.record_event(&employee_id, now)
            }
            MatchOutcome::NoMatch => {
                warn!("Fingerprint scan did not match any employee");
                Err(EngineError::NoMatch)
            }
        }
    }

    /// Computes and caches one employee's salary for `month`.
    ///
    /// The result replaces any cached record for the same employee and
    /// month.
    pub fn monthly_salary(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<MonthlySalaryRecord> {
        let employee = self.config.roster().get(employee_id)?;
        let rules = self.rules(|| format!("salary for {} in {}", employee_id, month))?;

        let records =
            self.store
                .records_for_employee(employee_id, month.first_day(), month.last_day())?;
        let totals = aggregate_month(&records, employee_id, month);
        let record = calculate_salary(employee, month, &totals, Some(rules.as_ref()))?;

        self.store.put_salary(record.clone())?;
        info!(
            employee_id,
            month = %month,
            final_salary = %record.final_salary,
            "Monthly salary calculated"
        );
        Ok(record)
    }

    /// The salary last cached for (`employee_id`, `month`), if any.
    pub fn cached_salary(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<Option<MonthlySalaryRecord>> {
        self.config.roster().get(employee_id)?;
        self.store.get_salary(employee_id, month)
    }

    /// Computes salaries for every active employee.
    ///
    /// One employee's failure is reported in that employee's entry and does
    /// not stop the rest of the batch.
    pub fn all_monthly_salaries(&self, month: PayMonth) -> Vec<SalaryReportEntry> {
        let entries: Vec<SalaryReportEntry> = self
            .config
            .roster()
            .active()
            .map(|employee| {
                let outcome = match self.monthly_salary(&employee.id, month) {
                    Ok(record) => SalaryOutcome::Success { record },
                    Err(error) => {
                        warn!(employee_id = %employee.id, month = %month, error = %error, "Salary calculation failed");
                        error.into()
                    }
                };
                SalaryReportEntry {
                    employee_id: employee.id.clone(),
                    outcome,
                }
            })
            .collect();

        let failures = entries.iter().filter(|e| !e.is_success()).count();
        info!(month = %month, employees = entries.len(), failures, "Salary report generated");
        entries
    }

    /// Attendance statistics for one employee between `start` and `end`
    /// inclusive.
    pub fn attendance_summary(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<AttendanceSummary> {
        self.config.roster().get(employee_id)?;
        if end < start {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        let records = self.store.records_for_employee(employee_id, start, end)?;
        summarize_attendance(employee_id, &records, start, end)
    }

    /// The employee's days in `month` with a check-in after the configured
    /// work start, ordered by date.
    pub fn late_check_ins(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        self.config.roster().get(employee_id)?;
        let rules = self.rules(|| format!("late check-ins for {} in {}", employee_id, month))?;
        let records =
            self.store
                .records_for_employee(employee_id, month.first_day(), month.last_day())?;
        Ok(late_check_ins(&records, employee_id, month, rules.work_start))
    }

    /// Records between `start` and `end` inclusive, newest date first.
    ///
    /// Restricted to one employee when `employee_id` is given. Records on
    /// the same date are ordered by employee id.
    pub fn attendance_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        if end < start {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        let mut records = match employee_id {
            Some(employee_id) => {
                self.config.roster().get(employee_id)?;
                self.store.records_for_employee(employee_id, start, end)?
            }
            None => self.store.records_between(start, end)?,
        };
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(records)
    }

    /// Employees checked in but not yet checked out on `date`.
    pub fn present_employees(&self, date: NaiveDate) -> EngineResult<PresenceSnapshot> {
        let mut present: Vec<AttendanceRecord> = self
            .store
            .records_between(date, date)?
            .into_iter()
            .filter(|r| r.check_in.is_some() && r.check_out.is_none())
            .collect();
        present.sort_by(|a, b| a.check_in.cmp(&b.check_in));

        Ok(PresenceSnapshot {
            date,
            present,
            active_employees: self.config.roster().active().count(),
        })
    }
}
