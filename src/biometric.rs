//! Biometric identity resolution.
//!
//! The engine does not read fingerprints itself. A [`BiometricMatcher`]
//! turns one scan into either an employee id or a no-match; everything about
//! sensors, templates and timeouts lives behind that call.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::MatcherConfig;
use crate::error::{EngineError, EngineResult};

/// The result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "employee_id", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The fingerprint matched a registered employee.
    Matched(String),
    /// No registered fingerprint matched.
    NoMatch,
}

/// Resolves a fingerprint scan to an employee identity.
pub trait BiometricMatcher: Send + Sync {
    /// Waits for one scan and matches it.
    ///
    /// Errors are reserved for the scanner itself being unusable; an
    /// unrecognised finger is `Ok(MatchOutcome::NoMatch)`.
    fn scan_for_match(&self) -> EngineResult<MatchOutcome>;
}

/// Replays a fixed queue of outcomes, one per scan.
///
/// Used for kiosk demos and tests. Once the queue is empty every scan is a
/// no-match.
#[derive(Debug, Default)]
pub struct ScriptedMatcher {
    outcomes: Mutex<VecDeque<MatchOutcome>>,
}

impl ScriptedMatcher {
    /// Creates a matcher that returns `outcomes` in order.
    pub fn new(outcomes: impl IntoIterator<Item = MatchOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    /// Outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.lock().map(|q| q.len()).unwrap_or(0)
    }
}

impl BiometricMatcher for ScriptedMatcher {
    fn scan_for_match(&self) -> EngineResult<MatchOutcome> {
        let mut outcomes = self.outcomes.lock().map_err(|_| EngineError::ScannerUnavailable {
            message: "scripted matcher lock poisoned".to_string(),
        })?;
        Ok(outcomes.pop_front().unwrap_or(MatchOutcome::NoMatch))
    }
}

/// Used when no scanner is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMatcher;

impl BiometricMatcher for DisabledMatcher {
    fn scan_for_match(&self) -> EngineResult<MatchOutcome> {
        Err(EngineError::ScannerUnavailable {
            message: "no biometric scanner is configured".to_string(),
        })
    }
}

/// Builds the matcher selected in organization.yaml.
pub fn build_matcher(config: &MatcherConfig) -> Box<dyn BiometricMatcher> {
    match config {
        MatcherConfig::Disabled => Box::new(DisabledMatcher),
        MatcherConfig::Scripted { outcomes } => Box::new(ScriptedMatcher::new(
            outcomes.iter().map(|outcome| match outcome {
                Some(employee_id) => MatchOutcome::Matched(employee_id.clone()),
                None => MatchOutcome::NoMatch,
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_matcher_replays_in_order() {
        let matcher = ScriptedMatcher::new([
            MatchOutcome::Matched("EMP0001".to_string()),
            MatchOutcome::NoMatch,
            MatchOutcome::Matched("EMP0002".to_string()),
        ]);

        assert_eq!(
            matcher.scan_for_match().unwrap(),
            MatchOutcome::Matched("EMP0001".to_string())
        );
        assert_eq!(matcher.scan_for_match().unwrap(), MatchOutcome::NoMatch);
        assert_eq!(matcher.remaining(), 1);
    }

    #[test]
    fn test_exhausted_script_is_no_match() {
        let matcher = ScriptedMatcher::default();
        assert_eq!(matcher.scan_for_match().unwrap(), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_disabled_matcher_is_unavailable() {
        assert!(matches!(
            DisabledMatcher.scan_for_match(),
            Err(EngineError::ScannerUnavailable { .. })
        ));
    }

    #[test]
    fn test_build_matcher_from_config() {
        let config = MatcherConfig::Scripted {
            outcomes: vec![Some("EMP0003".to_string()), None],
        };
        let matcher = build_matcher(&config);

        assert_eq!(
            matcher.scan_for_match().unwrap(),
            MatchOutcome::Matched("EMP0003".to_string())
        );
        assert_eq!(matcher.scan_for_match().unwrap(), MatchOutcome::NoMatch);

        let disabled = build_matcher(&MatcherConfig::Disabled);
        assert!(disabled.scan_for_match().is_err());
    }

    #[test]
    fn test_match_outcome_serialization() {
        let json = serde_json::to_string(&MatchOutcome::Matched("EMP0001".to_string())).unwrap();
        assert_eq!(json, r#"{"match":"matched","employee_id":"EMP0001"}"#);

        let json = serde_json::to_string(&MatchOutcome::NoMatch).unwrap();
        assert_eq!(json, r#"{"match":"no_match"}"#);
    }
}
