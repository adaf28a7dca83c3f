//! Round status history.
//!
//! Every status change within a round is recorded with its timestamp and the
//! score at that moment. The clock zeroes its display when a round ends, so
//! the history is where the final play time survives.

use super::status::RoundStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single status change.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StatusTransition {
    /// The status being left
    pub from: RoundStatus,
    /// The status being entered
    pub to: RoundStatus,
    /// Score when the change happened
    pub score: u32,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

impl StatusTransition {
    /// Transition stamped with the current time.
    pub fn now(from: RoundStatus, to: RoundStatus, score: u32) -> Self {
        Self {
            from,
            to,
            score,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, immutable history of status changes.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use sequence_tap::core::{RoundHistory, RoundStatus, StatusTransition};
///
/// let history = RoundHistory::new()
///     .record(StatusTransition::now(RoundStatus::Idle, RoundStatus::Playing, 0))
///     .record(StatusTransition::now(RoundStatus::Playing, RoundStatus::GameOver, 2));
///
/// assert_eq!(
///     history.path(),
///     vec![RoundStatus::Idle, RoundStatus::Playing, RoundStatus::GameOver]
/// );
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct RoundHistory {
    transitions: Vec<StatusTransition>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StatusTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Statuses visited, starting with the first `from`.
    pub fn path(&self) -> Vec<RoundStatus> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Wall time between the first and the last recorded transition.
    ///
    /// `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// The terminal transition, if the round has ended.
    pub fn outcome(&self) -> Option<&StatusTransition> {
        self.transitions.last().filter(|t| t.to.is_final())
    }

    pub fn transitions(&self) -> &[StatusTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
