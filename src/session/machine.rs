//! Session that drives a round, its clock and the delayed marker hides.

use super::snapshot::Snapshot;
use crate::clock::Clock;
use crate::config::{ConfigError, Settings, Violation};
use crate::core::{ClickOutcome, MarkerId, PendingHide, Round, RoundId, RoundStatus, TargetCount};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Host-facing game session.
///
/// Owns one [`Round`] and one [`Clock`]. The clock is started with the round
/// and stopped when the round ends or resets. Each correct click spawns a
/// detached hide task. Fired tickets are applied at the start of every
/// `&mut self` call, including [`Session::snapshot`], so a host that only
/// renders snapshots still sees markers disappear.
///
/// Construction spawns nothing. `start`, `click` and `play_or_restart`
/// spawn tokio tasks and must run inside a tokio runtime.
pub struct Session<R = ChaCha8Rng> {
    round: Round,
    clock: Clock,
    rng: R,
    hide_delay: Duration,
    hides_tx: mpsc::UnboundedSender<PendingHide>,
    hides_rx: mpsc::UnboundedReceiver<PendingHide>,
}

impl<R: Rng> Session<R> {
    /// Create an idle session with an injected placement RNG.
    ///
    /// `settings.seed` is ignored here; the RNG is used as given.
    pub fn with_rng(settings: Settings, rng: R) -> Result<Self, ConfigError> {
        let resolved = settings.resolve()?;
        let (hides_tx, hides_rx) = mpsc::unbounded_channel();

        Ok(Self {
            round: Round::new(resolved.target),
            clock: Clock::new(resolved.tick),
            rng,
            hide_delay: resolved.hide_delay,
            hides_tx,
            hides_rx,
        })
    }

    /// Apply a new marker count. The session is reset first.
    ///
    /// Non-positive or oversized counts are rejected and the previous count
    /// is kept.
    #[instrument(skip(self))]
    pub fn configure(&mut self, count: i64) -> Result<(), ConfigError> {
        self.settle_hides();
        let Some(target) = TargetCount::new(count) else {
            let violation = Violation::for_count(count)
                .unwrap_or(Violation::NonPositiveCount { value: count });
            warn!(kept = %self.round.target_count(), %violation, "rejected target count");
            return Err(ConfigError::Invalid(vec![violation]));
        };

        self.clock.stop();
        self.round.configure(target);
        info!(%target, "target count configured");
        Ok(())
    }

    /// The Play/Restart control: starts from idle, otherwise resets.
    pub fn play_or_restart(&mut self) -> RoundStatus {
        if self.round.status() == RoundStatus::Idle {
            self.start();
        } else {
            self.reset();
        }
        self.round.status()
    }

    /// Place a new board and start the clock.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> RoundId {
        self.settle_hides();
        let id = self.round.start(&mut self.rng);
        self.clock.start();
        info!(round = %id, target = %self.round.target_count(), "round started");
        id
    }

    /// Forward a click to the round and carry out its effects.
    #[instrument(skip(self))]
    pub fn click(&mut self, id: MarkerId) -> ClickOutcome {
        self.settle_hides();
        let outcome = self.round.click(id);

        match outcome {
            ClickOutcome::Ignored(reason) => {
                debug!(?reason, "click ignored");
            }
            ClickOutcome::Advanced { hide } => {
                debug!(score = self.round.score(), "marker acknowledged");
                self.schedule_hide(hide);
            }
            ClickOutcome::Cleared { hide } => {
                self.schedule_hide(hide);
                self.clock.stop();
                info!(score = self.round.score(), "all cleared");
            }
            ClickOutcome::Missed { expected, clicked } => {
                self.clock.stop();
                info!(expected, clicked, score = self.round.score(), "game over");
            }
        }

        outcome
    }

    /// Back to idle with the clock stopped and zeroed. Idempotent.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.settle_hides();
        self.round.reset();
        self.clock.stop();
        debug!("session reset");
    }

    /// Apply every hide ticket that has already fired.
    ///
    /// Returns how many markers were actually hidden.
    pub fn settle_hides(&mut self) -> usize {
        let mut hidden = 0;
        while let Ok(ticket) = self.hides_rx.try_recv() {
            if self.apply_hide(ticket) {
                hidden += 1;
            }
        }
        hidden
    }

    /// Wait for the next fired ticket that hides a marker and apply it.
    ///
    /// Stale tickets are consumed silently. Pending forever if no hide is
    /// outstanding, so hosts await this inside `select!`.
    pub async fn next_hide(&mut self) -> Option<MarkerId> {
        loop {
            let ticket = self.hides_rx.recv().await?;
            if self.apply_hide(ticket) {
                return Some(ticket.marker);
            }
        }
    }

    fn schedule_hide(&self, ticket: PendingHide) {
        let hides = self.hides_tx.clone();
        let delay = self.hide_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            // Closed channel means the session is gone.
            let _ = hides.send(ticket);
        });
    }

    fn apply_hide(&mut self, ticket: PendingHide) -> bool {
        let hidden = self.round.hide(ticket);
        if hidden {
            debug!(marker = ticket.marker, "marker hidden");
        } else {
            debug!(marker = ticket.marker, round = %ticket.round, "stale hide dropped");
        }
        hidden
    }

    /// Everything a host needs to render the current frame.
    ///
    /// Applies fired hides first.
    pub fn snapshot(&mut self) -> Snapshot {
        self.settle_hides();
        Snapshot::capture(&self.round, self.clock.elapsed())
    }

    /// Get the round (pure). Fired hides not yet applied are not reflected.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Get current status (pure)
    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    /// Current score (pure)
    pub fn score(&self) -> u32 {
        self.round.score()
    }

    /// Clock display value, in seconds with one decimal.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Whether the clock is sampling
    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Receiver for every clock sample.
    pub fn subscribe_elapsed(&self) -> watch::Receiver<f64> {
        self.clock.subscribe()
    }

    /// Delay between a correct click and its marker disappearing
    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }
}
