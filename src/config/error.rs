//! Configuration errors.

use crate::core::TargetCount;
use thiserror::Error;

/// A single rule broken by a configuration value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("Target count must be a positive integer (got {value})")]
    NonPositiveCount { value: i64 },

    #[error("Target count must be at most {max} (got {value})")]
    TooManyMarkers { value: i64, max: u32 },

    #[error("Hide delay must be greater than zero")]
    ZeroHideDelay,

    #[error("Tick period must be greater than zero")]
    ZeroTickPeriod,
}

/// Errors that can occur when loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Every violation found, not just the first.
    #[error("Invalid configuration: {}", joined(.0))]
    Invalid(Vec<Violation>),

    #[error("Settings could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Violation {
    /// Why `value` is not a usable marker count, if it isn't.
    pub fn for_count(value: i64) -> Option<Self> {
        if value <= 0 {
            Some(Self::NonPositiveCount { value })
        } else if value > i64::from(TargetCount::MAX) {
            Some(Self::TooManyMarkers {
                value,
                max: TargetCount::MAX,
            })
        } else {
            None
        }
    }
}

impl ConfigError {
    /// Violations carried by an `Invalid` error; empty for parse failures.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid(violations) => violations,
            Self::Parse(_) => &[],
        }
    }
}

fn joined(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_violation() {
        let error = ConfigError::Invalid(vec![
            Violation::NonPositiveCount { value: -2 },
            Violation::ZeroTickPeriod,
        ]);

        assert_eq!(
            error.to_string(),
            "Invalid configuration: Target count must be a positive integer (got -2); \
             Tick period must be greater than zero"
        );
        assert_eq!(error.violations().len(), 2);
    }

    #[test]
    fn count_violations_distinguish_too_small_from_too_large() {
        assert_eq!(
            Violation::for_count(0),
            Some(Violation::NonPositiveCount { value: 0 })
        );
        assert_eq!(
            Violation::for_count(4_000_000_000),
            Some(Violation::TooManyMarkers {
                value: 4_000_000_000,
                max: TargetCount::MAX
            })
        );
        assert_eq!(Violation::for_count(1), None);
        assert_eq!(Violation::for_count(i64::from(TargetCount::MAX)), None);
        assert!(Violation::for_count(20_000)
            .unwrap()
            .to_string()
            .starts_with("Target count must be at most"));
    }

    #[test]
    fn parse_errors_carry_no_violations() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let error = ConfigError::from(source);
        assert!(error.violations().is_empty());
        assert!(error.to_string().starts_with("Settings could not be parsed"));
    }
}
