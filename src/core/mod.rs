//! Pure game logic.
//!
//! - Round status and its lifecycle rules
//! - Marker placement
//! - The round state machine that processes clicks
//! - Immutable status history
//!
//! Nothing in this module schedules timers or touches a clock. Randomness
//! is injected, and delayed effects are returned to the caller as values.

mod history;
mod marker;
mod round;
mod status;

pub use history::{RoundHistory, StatusTransition};
pub use marker::{scatter, Marker, MarkerId, PLACEMENT_MAX, PLACEMENT_MIN};
pub use round::{ClickOutcome, IgnoreReason, PendingHide, Round, RoundId, TargetCount};
pub use status::RoundStatus;
