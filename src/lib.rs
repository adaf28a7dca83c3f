//! Sequence Tap: game state and timing for a click-the-numbers-in-order game.
//!
//! Numbered markers are scattered over the board; the player clicks them in
//! ascending order against a running clock. A correct final click clears the
//! board, any out-of-order click ends the round.
//!
//! # Core Concepts
//!
//! - **Round**: pure state machine over `Idle → Playing → AllCleared | GameOver`
//! - **Clock**: stopwatch republishing elapsed seconds every tick
//! - **Session**: host-facing shell that coordinates both and runs the
//!   delayed marker hides
//!
//! # Example
//!
//! ```rust
//! use sequence_tap::config::SessionBuilder;
//! use sequence_tap::core::RoundStatus;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut session = SessionBuilder::new().target_count(3).seed(7).build().unwrap();
//! session.start();
//!
//! for id in 1..=3 {
//!     session.click(id);
//! }
//!
//! assert_eq!(session.status(), RoundStatus::AllCleared);
//! assert_eq!(session.snapshot().banner, "All Cleared!");
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::clock::Clock;
pub use crate::config::{ConfigError, SessionBuilder, Settings};
pub use crate::core::{ClickOutcome, Marker, Round, RoundStatus, TargetCount};
pub use crate::session::{Session, Snapshot};
