//! Host-facing session.
//!
//! The imperative shell around the pure [`crate::core::Round`]: it owns the
//! RNG, drives the [`crate::clock::Clock`], and turns hide tickets into
//! detached timer tasks whose results are applied back on the host's turn.

mod machine;
mod snapshot;

pub use machine::Session;
pub use snapshot::{MarkerView, Snapshot};
