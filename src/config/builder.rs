//! Builder for constructing sessions.

use super::error::ConfigError;
use super::settings::Settings;
use crate::session::Session;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Builder for constructing sessions with a fluent API.
///
/// Values are validated together in [`SessionBuilder::build`].
///
/// # Example
///
/// ```rust
/// use sequence_tap::config::SessionBuilder;
/// use std::time::Duration;
///
/// let session = SessionBuilder::new()
///     .target_count(5)
///     .hide_delay(Duration::from_millis(500))
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(session.round().target_count().get(), 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionBuilder {
    settings: Settings,
}

impl SessionBuilder {
    /// Create a builder holding the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a full settings value.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the number of markers per round.
    pub fn target_count(mut self, count: i64) -> Self {
        self.settings.target_count = count;
        self
    }

    /// Set the delay before an acknowledged marker disappears.
    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.settings.hide_delay_ms = millis(delay);
        self
    }

    /// Set the clock sampling period.
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.settings.tick_ms = millis(period);
        self
    }

    /// Make marker placement reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    /// Build the session.
    /// Returns every violation if the settings are invalid.
    pub fn build(self) -> Result<Session<ChaCha8Rng>, ConfigError> {
        let rng = match self.settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Session::with_rng(self.settings, rng)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
