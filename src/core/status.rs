//! Round lifecycle status.
//!
//! A round moves through `Idle → Playing → AllCleared | GameOver`. The two
//! terminal statuses are one-way; only a full reset returns to `Idle`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a round.
///
/// `Idle` covers both "never started" and "reset": no markers are on the
/// board and clicks are not accepted.
///
/// # Example
///
/// ```rust
/// use sequence_tap::core::RoundStatus;
///
/// assert!(RoundStatus::Playing.accepts_clicks());
/// assert!(RoundStatus::GameOver.is_final());
/// assert_eq!(RoundStatus::AllCleared.banner(), "All Cleared!");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    Idle,
    Playing,
    AllCleared,
    GameOver,
}

impl RoundStatus {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Playing => "Playing",
            Self::AllCleared => "AllCleared",
            Self::GameOver => "GameOver",
        }
    }

    /// Terminal statuses end the round until the next reset.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::AllCleared | Self::GameOver)
    }

    /// `GameOver` is the only losing outcome.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::GameOver)
    }

    /// Only a round in progress accepts clicks.
    pub fn accepts_clicks(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Headline text a host shows for this status.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Idle | Self::Playing => "Let's play",
            Self::AllCleared => "All Cleared!",
            Self::GameOver => "Game Over",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
