//! Elapsed-time clock.
//!
//! A free-running stopwatch that knows nothing about game rules. The session
//! starts it with a round and stops it when the round ends; in between a
//! single background task republishes the elapsed seconds every period
//! through a `watch` channel.

mod elapsed;
mod sampler;

pub use elapsed::round_tenths;
pub use sampler::{Clock, DEFAULT_TICK};
