//! The round state machine.
//!
//! `Round` owns the target count, the marker set, the score and the status.
//! It is pure: randomness is injected and the delayed hide is handed back to
//! the caller as a [`PendingHide`] ticket instead of being scheduled here.

use super::history::{RoundHistory, StatusTransition};
use super::marker::{scatter, Marker, MarkerId};
use super::status::RoundStatus;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use uuid::Uuid;

/// Number of markers placed when a round starts. Always positive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct TargetCount(NonZeroU32);

impl TargetCount {
    /// Count used before the host configures anything.
    pub const DEFAULT: u32 = 10;

    /// Largest board a round will place.
    pub const MAX: u32 = 10_000;

    /// `None` for zero, negative or values above [`TargetCount::MAX`].
    pub fn new(value: i64) -> Option<Self> {
        u32::try_from(value)
            .ok()
            .filter(|count| *count <= Self::MAX)
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    /// The count as a plain integer
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for TargetCount {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(Self::DEFAULT - 1))
    }
}

impl TryFrom<i64> for TargetCount {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            if value > i64::from(Self::MAX) {
                format!("target count must be at most {}, got {value}", Self::MAX)
            } else {
                format!("target count must be positive, got {value}")
            }
        })
    }
}

impl From<TargetCount> for u32 {
    fn from(count: TargetCount) -> Self {
        count.get()
    }
}

impl fmt::Display for TargetCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one play-through, fresh on every start.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket for hiding an acknowledged marker once the hide delay elapses.
///
/// Redeem it with [`Round::hide`]. Tickets from an earlier round are inert.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingHide {
    pub round: RoundId,
    pub marker: MarkerId,
}

/// Why a click left the round untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IgnoreReason {
    /// No round in progress, or the round already ended.
    NotPlaying,
    /// The id does not belong to the generated marker set.
    OutOfRange,
}

/// Result of a click.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// Correct marker, more remain.
    Advanced { hide: PendingHide },
    /// Correct marker, and it was the last one.
    Cleared { hide: PendingHide },
    /// Wrong marker; the round is over.
    Missed {
        expected: MarkerId,
        clicked: MarkerId,
    },
}

impl ClickOutcome {
    /// Hide ticket carried by a correct click.
    pub fn hide(&self) -> Option<PendingHide> {
        match self {
            Self::Advanced { hide } | Self::Cleared { hide } => Some(*hide),
            _ => None,
        }
    }

    /// True when this click moved the round into a terminal status.
    pub fn ends_round(&self) -> bool {
        matches!(self, Self::Cleared { .. } | Self::Missed { .. })
    }
}

/// Game state for one board.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use sequence_tap::core::{ClickOutcome, Round, RoundStatus, TargetCount};
///
/// let mut round = Round::new(TargetCount::new(3).unwrap());
/// round.start(&mut ChaCha8Rng::seed_from_u64(1));
///
/// for id in 1..=3 {
///     let outcome = round.click(id);
///     assert!(outcome.hide().is_some());
/// }
///
/// assert_eq!(round.status(), RoundStatus::AllCleared);
/// assert_eq!(round.score(), 3);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Round {
    target: TargetCount,
    round_id: Option<RoundId>,
    status: RoundStatus,
    score: u32,
    expected_next: MarkerId,
    markers: Vec<Marker>,
    history: RoundHistory,
}

impl Default for Round {
    fn default() -> Self {
        Self::new(TargetCount::default())
    }
}

impl Round {
    /// An idle round with no markers.
    pub fn new(target: TargetCount) -> Self {
        Self {
            target,
            round_id: None,
            status: RoundStatus::Idle,
            score: 0,
            expected_next: 1,
            markers: Vec::new(),
            history: RoundHistory::new(),
        }
    }

    /// Reset, then store the count used by the next `start`.
    pub fn configure(&mut self, target: TargetCount) {
        self.reset();
        self.target = target;
    }

    /// Place a fresh board and begin play.
    ///
    /// Starting over a round in progress discards it.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RoundId {
        let from = self.status;
        let id = RoundId::new();

        self.round_id = Some(id);
        self.markers = scatter(self.target.get(), rng);
        self.score = 0;
        self.expected_next = 1;
        self.status = RoundStatus::Playing;
        self.history =
            RoundHistory::new().record(StatusTransition::now(from, RoundStatus::Playing, 0));

        id
    }

    /// Process a click on marker `id`.
    pub fn click(&mut self, id: MarkerId) -> ClickOutcome {
        if !self.status.accepts_clicks() {
            return ClickOutcome::Ignored(IgnoreReason::NotPlaying);
        }
        if id == 0 || id > self.target.get() {
            return ClickOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        let Some(round) = self.round_id else {
            return ClickOutcome::Ignored(IgnoreReason::NotPlaying);
        };

        if id != self.expected_next {
            let expected = self.expected_next;
            self.finish(RoundStatus::GameOver);
            return ClickOutcome::Missed {
                expected,
                clicked: id,
            };
        }

        self.score += 1;
        self.expected_next += 1;
        if let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) {
            marker.acknowledged = true;
        }

        let hide = PendingHide { round, marker: id };
        if id == self.target.get() {
            self.finish(RoundStatus::AllCleared);
            ClickOutcome::Cleared { hide }
        } else {
            ClickOutcome::Advanced { hide }
        }
    }

    /// Hide the ticket's marker if it still belongs to this round and is
    /// still showing. Returns whether anything changed.
    pub fn hide(&mut self, ticket: PendingHide) -> bool {
        if self.round_id != Some(ticket.round) {
            return false;
        }
        match self
            .markers
            .iter_mut()
            .find(|m| m.id == ticket.marker && m.visible)
        {
            Some(marker) => {
                marker.visible = false;
                true
            }
            None => false,
        }
    }

    /// Back to idle: no markers, zero score, history cleared.
    pub fn reset(&mut self) {
        self.round_id = None;
        self.status = RoundStatus::Idle;
        self.score = 0;
        self.expected_next = 1;
        self.markers.clear();
        self.history = RoundHistory::new();
    }

    fn finish(&mut self, to: RoundStatus) {
        let from = self.status;
        self.status = to;
        self.history = self
            .history
            .record(StatusTransition::now(from, to, self.score));
    }

    /// Get current status (pure)
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Correct clicks so far this round
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The only id a correct click may carry.
    pub fn expected_next(&self) -> MarkerId {
        self.expected_next
    }

    /// Count used by the current or next board
    pub fn target_count(&self) -> TargetCount {
        self.target
    }

    /// Id of the current board; `None` while idle
    pub fn round_id(&self) -> Option<RoundId> {
        self.round_id
    }

    /// All markers of the current board, highest id first.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers not yet hidden, highest id first
    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.visible)
    }

    /// Look up a marker by id
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Status changes of the current round
    pub fn history(&self) -> &RoundHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn started(count: i64) -> Round {
        let mut round = Round::new(TargetCount::new(count).unwrap());
        round.start(&mut ChaCha8Rng::seed_from_u64(11));
        round
    }

    #[test]
    fn target_count_rejects_non_positive_values() {
        assert!(TargetCount::new(0).is_none());
        assert!(TargetCount::new(-4).is_none());
        assert!(TargetCount::new(i64::from(u32::MAX) + 1).is_none());
        assert_eq!(TargetCount::new(7).map(TargetCount::get), Some(7));
    }

    #[test]
    fn target_count_caps_board_size() {
        assert_eq!(
            TargetCount::new(i64::from(TargetCount::MAX)).map(TargetCount::get),
            Some(TargetCount::MAX)
        );
        assert!(TargetCount::new(i64::from(TargetCount::MAX) + 1).is_none());
        assert!(TargetCount::new(4_000_000_000).is_none());

        let error = serde_json::from_str::<TargetCount>("4000000000").unwrap_err();
        assert!(error.to_string().contains("at most"));
    }

    #[test]
    fn target_count_defaults_to_ten() {
        assert_eq!(TargetCount::default().get(), 10);
    }

    #[test]
    fn target_count_deserializes_through_validation() {
        let ok: TargetCount = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<TargetCount>("0").is_err());
        assert!(serde_json::from_str::<TargetCount>("-1").is_err());
    }

    #[test]
    fn new_round_is_idle() {
        let round = Round::new(TargetCount::default());
        assert_eq!(round.status(), RoundStatus::Idle);
        assert_eq!(round.score(), 0);
        assert_eq!(round.expected_next(), 1);
        assert!(round.markers().is_empty());
        assert!(round.round_id().is_none());
    }

    #[test]
    fn start_places_board_and_plays() {
        let round = started(4);
        assert_eq!(round.status(), RoundStatus::Playing);
        assert_eq!(round.markers().len(), 4);
        assert!(round.round_id().is_some());
        assert_eq!(
            round.history().path(),
            vec![RoundStatus::Idle, RoundStatus::Playing]
        );
    }

    #[test]
    fn clicks_before_start_are_ignored() {
        let mut round = Round::new(TargetCount::default());
        assert_eq!(
            round.click(1),
            ClickOutcome::Ignored(IgnoreReason::NotPlaying)
        );
        assert_eq!(round.status(), RoundStatus::Idle);
    }

    #[test]
    fn correct_click_acknowledges_without_hiding() {
        let mut round = started(3);
        let outcome = round.click(1);

        assert!(matches!(outcome, ClickOutcome::Advanced { .. }));
        let marker = round.marker(1).unwrap();
        assert!(marker.acknowledged);
        assert!(marker.visible);
        assert_eq!(round.score(), 1);
        assert_eq!(round.expected_next(), 2);
    }

    #[test]
    fn last_correct_click_clears_board() {
        let mut round = started(2);
        round.click(1);
        let outcome = round.click(2);

        assert!(matches!(outcome, ClickOutcome::Cleared { .. }));
        assert!(outcome.ends_round());
        assert_eq!(round.status(), RoundStatus::AllCleared);
        assert_eq!(round.score(), 2);
        assert_eq!(round.history().outcome().map(|t| t.score), Some(2));
    }

    #[test]
    fn wrong_click_ends_round_and_freezes_score() {
        let mut round = started(5);
        round.click(1);
        let outcome = round.click(3);

        assert_eq!(
            outcome,
            ClickOutcome::Missed {
                expected: 2,
                clicked: 3
            }
        );
        assert_eq!(round.status(), RoundStatus::GameOver);
        assert_eq!(round.score(), 1);
        assert_eq!(round.expected_next(), 2);

        assert_eq!(
            round.click(2),
            ClickOutcome::Ignored(IgnoreReason::NotPlaying)
        );
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn clicking_acknowledged_marker_again_is_a_miss() {
        let mut round = started(3);
        round.click(1);
        assert!(matches!(round.click(1), ClickOutcome::Missed { .. }));
        assert_eq!(round.status(), RoundStatus::GameOver);
    }

    #[test]
    fn clicking_hidden_marker_is_a_miss() {
        let mut round = started(3);
        let hide = round.click(1).hide().unwrap();
        assert!(round.hide(hide));
        assert!(matches!(round.click(1), ClickOutcome::Missed { .. }));
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let mut round = started(3);
        assert_eq!(
            round.click(0),
            ClickOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(
            round.click(4),
            ClickOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(round.status(), RoundStatus::Playing);
        assert_eq!(round.expected_next(), 1);
    }

    #[test]
    fn hide_applies_once() {
        let mut round = started(3);
        let hide = round.click(1).hide().unwrap();

        assert!(round.hide(hide));
        assert!(!round.hide(hide));
        assert!(!round.marker(1).unwrap().visible);
    }

    #[test]
    fn hide_still_lands_after_round_ends() {
        let mut round = started(1);
        let hide = round.click(1).hide().unwrap();
        assert_eq!(round.status(), RoundStatus::AllCleared);

        assert!(round.hide(hide));
        assert_eq!(round.visible_markers().count(), 0);
    }

    #[test]
    fn stale_hide_does_not_touch_next_round() {
        let mut round = started(3);
        let stale = round.click(1).hide().unwrap();

        round.reset();
        assert!(!round.hide(stale));

        round.start(&mut ChaCha8Rng::seed_from_u64(5));
        assert!(!round.hide(stale));
        assert!(round.marker(1).unwrap().visible);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut round = started(3);
        round.click(1);

        round.reset();
        let once = round.clone();
        round.reset();

        assert_eq!(round, once);
        assert_eq!(round.status(), RoundStatus::Idle);
        assert_eq!(round.score(), 0);
        assert_eq!(round.expected_next(), 1);
        assert!(round.markers().is_empty());
        assert!(round.history().is_empty());
    }

    #[test]
    fn configure_resets_and_applies_count() {
        let mut round = started(3);
        round.click(1);

        round.configure(TargetCount::new(6).unwrap());
        assert_eq!(round.status(), RoundStatus::Idle);
        assert!(round.markers().is_empty());

        round.start(&mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(round.markers().len(), 6);
    }

    #[test]
    fn restart_from_terminal_records_fresh_history() {
        let mut round = started(2);
        round.click(2);
        assert_eq!(round.status(), RoundStatus::GameOver);

        round.start(&mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(
            round.history().path(),
            vec![RoundStatus::GameOver, RoundStatus::Playing]
        );
        assert_eq!(round.score(), 0);
    }
}
