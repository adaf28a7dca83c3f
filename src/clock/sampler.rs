//! Repeating elapsed-time sampler.

use super::elapsed::round_tenths;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::{debug, instrument};

/// Sampling period used unless configured otherwise.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Stopwatch that republishes elapsed seconds on a fixed cadence.
///
/// At most one sampling task exists at a time. `stop` also zeroes the
/// published value; there is no stop-without-reset. `start` spawns the
/// sampling task and must run inside a tokio runtime.
///
/// # Example
///
/// ```rust
/// use sequence_tap::clock::Clock;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut clock = Clock::new(Duration::from_millis(100));
/// clock.start();
/// assert!(clock.is_running());
///
/// clock.stop();
/// assert_eq!(clock.elapsed(), 0.0);
/// # }
/// ```
#[derive(Debug)]
pub struct Clock {
    period: Duration,
    published: Arc<watch::Sender<f64>>,
    generation: Arc<AtomicU64>,
    started_at: Option<Instant>,
    sampler: Option<JoinHandle<()>>,
}

impl Clock {
    /// Create a stopped clock sampling every `period`.
    pub fn new(period: Duration) -> Self {
        let (published, _) = watch::channel(0.0);
        Self {
            period,
            published: Arc::new(published),
            generation: Arc::new(AtomicU64::new(0)),
            started_at: None,
            sampler: None,
        }
    }

    /// Record a reference instant and begin sampling.
    ///
    /// A cadence that is already running is torn down first.
    #[instrument(skip(self), fields(period_ms = self.period.as_millis() as u64))]
    pub fn start(&mut self) {
        self.halt();

        let started_at = Instant::now();
        let generation = self.generation.load(Ordering::SeqCst);
        let live = Arc::clone(&self.generation);
        let published = Arc::clone(&self.published);
        let period = self.period;

        self.published.send_replace(0.0);
        self.started_at = Some(started_at);
        self.sampler = Some(tokio::spawn(async move {
            let mut ticks = interval_at(started_at + period, period);
            loop {
                ticks.tick().await;
                let seconds = round_tenths(started_at.elapsed());
                // A sample racing an abort must not overwrite the zero.
                published.send_if_modified(|current| {
                    if live.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    *current = seconds;
                    true
                });
            }
        }));
        debug!("clock started");
    }

    /// Halt sampling, zero the published value and forget the reference instant.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        let was_running = self.sampler.is_some();
        self.halt();
        self.started_at = None;
        self.published.send_replace(0.0);
        if was_running {
            debug!("clock stopped");
        }
    }

    fn halt(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.sampler.take() {
            task.abort();
        }
    }

    /// Whether a sampling task is live
    pub fn is_running(&self) -> bool {
        self.sampler.is_some()
    }

    /// Most recently published value, in seconds.
    pub fn elapsed(&self) -> f64 {
        *self.published.borrow()
    }

    /// Receiver that sees every published sample.
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.published.subscribe()
    }

    /// Reference instant of the current run; `None` while stopped
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Sampling period
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.halt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn publishes_elapsed_tenths() {
        let mut clock = Clock::default();
        clock.start();

        sleep(Duration::from_millis(350)).await;
        assert!((clock.elapsed() - 0.3).abs() < 1e-9);
        assert!(clock.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_published_before_first_period() {
        let mut clock = Clock::default();
        clock.start();

        sleep(Duration::from_millis(60)).await;
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_zeroes_and_halts() {
        let mut clock = Clock::default();
        clock.start();
        sleep(Duration::from_millis(500)).await;
        assert!(clock.elapsed() > 0.0);

        clock.stop();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_running());
        assert!(clock.started_at().is_none());

        sleep(Duration::from_millis(500)).await;
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let mut clock = Clock::default();
        clock.stop();
        clock.stop();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_cadence() {
        let mut clock = Clock::default();
        clock.start();
        sleep(Duration::from_millis(250)).await;

        clock.start();
        assert_eq!(clock.elapsed(), 0.0);
        sleep(Duration::from_millis(150)).await;
        assert!((clock.elapsed() - 0.1).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn samples_are_monotonic() {
        let mut clock = Clock::default();
        clock.start();
        let mut samples = clock.subscribe();

        let mut previous = 0.0;
        for tick in 1..=20u32 {
            samples.changed().await.unwrap();
            let current = *samples.borrow_and_update();
            assert!(current >= previous);
            assert!((current - f64::from(tick) / 10.0).abs() < 1e-9);
            previous = current;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn drop_tears_down_sampler() {
        let mut clock = Clock::default();
        clock.start();
        let mut samples = clock.subscribe();

        drop(clock);
        assert!(samples.changed().await.is_err());
    }
}
