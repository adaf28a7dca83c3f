//! Session settings.

use super::error::{ConfigError, Violation};
use crate::core::TargetCount;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable values for a session. Missing JSON fields take their defaults.
///
/// # Example
///
/// ```rust
/// use sequence_tap::config::Settings;
///
/// let settings = Settings::from_json(r#"{ "target_count": 5, "seed": 9 }"#).unwrap();
/// assert_eq!(settings.target_count, 5);
/// assert_eq!(settings.hide_delay_ms, 500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Markers placed per round. Kept signed so host input can be checked.
    pub target_count: i64,
    /// Delay between a correct click and its marker disappearing.
    pub hide_delay_ms: u64,
    /// Clock sampling period.
    pub tick_ms: u64,
    /// Seed for marker placement; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_count: i64::from(TargetCount::DEFAULT),
            hide_delay_ms: 500,
            tick_ms: 100,
            seed: None,
        }
    }
}

/// Settings that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub target: TargetCount,
    pub hide_delay: Duration,
    pub tick: Duration,
}

impl Settings {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every rule, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<Resolved, ConfigError> {
        let mut violations = Vec::new();

        let target = TargetCount::new(self.target_count);
        violations.extend(Violation::for_count(self.target_count));
        if self.hide_delay_ms == 0 {
            violations.push(Violation::ZeroHideDelay);
        }
        if self.tick_ms == 0 {
            violations.push(Violation::ZeroTickPeriod);
        }

        match target {
            Some(target) if violations.is_empty() => Ok(Resolved {
                target,
                hide_delay: Duration::from_millis(self.hide_delay_ms),
                tick: Duration::from_millis(self.tick_ms),
            }),
            _ => Err(ConfigError::Invalid(violations)),
        }
    }
}
