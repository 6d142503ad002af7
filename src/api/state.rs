//! Application state for the attendance and payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::biometric::{build_matcher, BiometricMatcher};
use crate::config::PayrollConfig;
use crate::payroll::PayrollService;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the payroll service over the in-memory store and the biometric
/// matcher used by `POST /scan`.
#[derive(Clone)]
pub struct AppState {
    service: PayrollService<MemoryStore>,
    matcher: Arc<dyn BiometricMatcher>,
}

impl AppState {
    /// Creates the state from configuration, with an empty store and the
    /// matcher selected in organization.yaml.
    pub fn new(config: PayrollConfig) -> Self {
        let matcher: Arc<dyn BiometricMatcher> =
            Arc::from(build_matcher(&config.organization().matcher));
        Self::with_matcher(config, matcher)
    }

    /// Creates the state with an explicit matcher.
    pub fn with_matcher(config: PayrollConfig, matcher: Arc<dyn BiometricMatcher>) -> Self {
        Self {
            service: PayrollService::new(config, Arc::new(MemoryStore::new())),
            matcher,
        }
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService<MemoryStore> {
        &self.service
    }

    /// Returns the biometric matcher.
    pub fn matcher(&self) -> &dyn BiometricMatcher {
        self.matcher.as_ref()
    }
}
