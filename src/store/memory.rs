//! In-memory attendance store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use chrono::NaiveDate;

use super::AttendanceStore;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, MonthlySalaryRecord, PayMonth};

type EmployeeDays = Arc<Mutex<BTreeMap<NaiveDate, AttendanceRecord>>>;

/// An [`AttendanceStore`] held entirely in process memory.
///
/// Each employee's records sit behind their own mutex. Events for the same
/// employee are serialized; events for different employees never contend.
/// The outer map is only write-locked the first time an employee is seen.
#[derive(Debug, Default)]
pub struct MemoryStore {
    days: RwLock<HashMap<String, EmployeeDays>>,
    salaries: RwLock<HashMap<(String, PayMonth), MonthlySalaryRecord>>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::Storage {
        message: "attendance store lock poisoned".to_string(),
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the employee's day map, creating it on first use.
    fn employee_days(&self, employee_id: &str) -> EngineResult<EmployeeDays> {
        if let Some(days) = self.days.read().map_err(poisoned)?.get(employee_id) {
            return Ok(Arc::clone(days));
        }

        let mut all = self.days.write().map_err(poisoned)?;
        Ok(Arc::clone(all.entry(employee_id.to_string()).or_default()))
    }

    /// Snapshot of the per-employee maps, so readers never hold the outer lock
    /// while waiting on an employee.
    fn all_employee_days(&self) -> EngineResult<Vec<EmployeeDays>> {
        Ok(self.days.read().map_err(poisoned)?.values().cloned().collect())
    }
}

impl AttendanceStore for MemoryStore {
    fn update_day<T, F>(&self, employee_id: &str, date: NaiveDate, update: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Option<AttendanceRecord>) -> T,
    {
        let days = self.employee_days(employee_id)?;
        let mut days = days.lock().map_err(poisoned)?;

        let mut slot = days.get(&date).cloned();
        let result = update(&mut slot);
        match slot {
            Some(record) => {
                days.insert(date, record);
            }
            None => {
                days.remove(&date);
            }
        }
        Ok(result)
    }

    fn get_day(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>> {
        let Some(days) = self.days.read().map_err(poisoned)?.get(employee_id).cloned() else {
            return Ok(None);
        };
        let days = days.lock().map_err(poisoned)?;
        Ok(days.get(&date).cloned())
    }

    fn records_for_employee(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        if end < start {
            return Ok(Vec::new());
        }
        let Some(days) = self.days.read().map_err(poisoned)?.get(employee_id).cloned() else {
            return Ok(Vec::new());
        };
        let days = days.lock().map_err(poisoned)?;
        Ok(days.range(start..=end).map(|(_, r)| r.clone()).collect())
    }

    fn records_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        if end < start {
            return Ok(Vec::new());
        }
        let mut records = Vec::new();
        for days in self.all_employee_days()? {
            let days = days.lock().map_err(poisoned)?;
            records.extend(days.range(start..=end).map(|(_, r)| r.clone()));
        }
        Ok(records)
    }

    fn put_salary(&self, record: MonthlySalaryRecord) -> EngineResult<()> {
        let key = (record.employee_id.clone(), record.month);
        self.salaries.write().map_err(poisoned)?.insert(key, record);
        Ok(())
    }

    fn get_salary(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<Option<MonthlySalaryRecord>> {
        let salaries = self.salaries.read().map_err(poisoned)?;
        Ok(salaries.get(&(employee_id.to_string(), month)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use rust_decimal::Decimal;
    use std::thread;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn open_day(store: &MemoryStore, employee_id: &str, check_in: &str) {
        let record = AttendanceRecord::checked_in(employee_id, ts(check_in));
        let date = record.date;
        store
            .update_day(employee_id, date, |slot| *slot = Some(record))
            .unwrap();
    }

    fn salary(employee_id: &str, month: &str, final_salary: i64) -> MonthlySalaryRecord {
        MonthlySalaryRecord {
            employee_id: employee_id.to_string(),
            month: month.parse().unwrap(),
            base_salary: Decimal::new(final_salary, 0),
            total_late_hours: Decimal::ZERO,
            total_early_leave_hours: Decimal::ZERO,
            total_overtime_hours: Decimal::ZERO,
            late_deductions: Decimal::ZERO,
            early_leave_deductions: Decimal::ZERO,
            overtime_additions: Decimal::ZERO,
            final_salary: Decimal::new(final_salary, 0),
        }
    }

    #[test]
    fn test_update_day_sees_existing_record() {
        let store = MemoryStore::new();
        open_day(&store, "EMP0001", "2026-01-05T09:00:00+00:00");

        let existed = store
            .update_day("EMP0001", date("2026-01-05"), |slot| slot.is_some())
            .unwrap();
        assert!(existed);
    }

    #[test]
    fn test_update_day_without_write_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store
            .update_day("EMP0001", date("2026-01-05"), |_| ())
            .unwrap();

        assert_eq!(store.get_day("EMP0001", date("2026-01-05")).unwrap(), None);
    }

    #[test]
    fn test_records_for_employee_range_is_inclusive_and_ordered() {
        let store = MemoryStore::new();
        open_day(&store, "EMP0001", "2026-01-07T09:00:00+00:00");
        open_day(&store, "EMP0001", "2026-01-05T09:00:00+00:00");
        open_day(&store, "EMP0001", "2026-01-09T09:00:00+00:00");
        open_day(&store, "EMP0002", "2026-01-06T09:00:00+00:00");

        let records = store
            .records_for_employee("EMP0001", date("2026-01-05"), date("2026-01-07"))
            .unwrap();
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2026-01-05"), date("2026-01-07")]);
    }

    #[test]
    fn test_records_between_spans_employees() {
        let store = MemoryStore::new();
        open_day(&store, "EMP0001", "2026-01-05T09:00:00+00:00");
        open_day(&store, "EMP0002", "2026-01-05T09:10:00+00:00");
        open_day(&store, "EMP0003", "2026-02-05T09:10:00+00:00");

        let records = store
            .records_between(date("2026-01-01"), date("2026-01-31"))
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unknown_employee_has_no_records() {
        let store = MemoryStore::new();
        assert!(store
            .records_for_employee("EMP0009", date("2026-01-01"), date("2026-01-31"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_put_salary_replaces_previous() {
        let store = MemoryStore::new();
        let month: PayMonth = "2026-01".parse().unwrap();
        store.put_salary(salary("EMP0001", "2026-01", 3000)).unwrap();
        store.put_salary(salary("EMP0001", "2026-01", 2980)).unwrap();
        store.put_salary(salary("EMP0001", "2026-02", 3100)).unwrap();

        let cached = store.get_salary("EMP0001", month).unwrap().unwrap();
        assert_eq!(cached.final_salary, Decimal::new(2980, 0));
        assert_eq!(store.get_salary("EMP0002", month).unwrap(), None);
    }

    #[test]
    fn test_concurrent_updates_same_day_are_serialized() {
        let store = Arc::new(MemoryStore::new());
        let day = date("2026-01-05");

        // Each thread opens the day only if it is still empty
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .update_day("EMP0001", day, |slot| {
                            if slot.is_some() {
                                return false;
                            }
                            let at = ts(&format!("2026-01-05T09:00:0{}+00:00", i));
                            *slot = Some(AttendanceRecord::checked_in("EMP0001", at));
                            true
                        })
                        .unwrap()
                })
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|created| *created)
            .count();
        assert_eq!(created, 1);
    }
}
