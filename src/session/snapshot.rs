//! Render-ready view of a session.

use crate::core::{MarkerId, Round, RoundStatus};
use serde::{Deserialize, Serialize};

/// A marker as the host should draw it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MarkerView {
    pub id: MarkerId,
    /// Left offset, percent of the board
    pub x: f64,
    /// Top offset, percent of the board
    pub y: f64,
    pub z_index: u32,
    /// Draw with the "clicked" look
    pub acknowledged: bool,
}

/// What the host shows for one frame.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: RoundStatus,
    pub banner: String,
    pub score: u32,
    pub elapsed_seconds: f64,
    pub target_count: u32,
    /// Whether clicks on the board are accepted
    pub interactive: bool,
    /// Visible markers, highest id first
    pub markers: Vec<MarkerView>,
}

impl Snapshot {
    pub fn capture(round: &Round, elapsed_seconds: f64) -> Self {
        let target_count = round.target_count().get();
        let markers = round
            .visible_markers()
            .map(|m| MarkerView {
                id: m.id,
                x: m.x,
                y: m.y,
                z_index: m.z_index(target_count),
                acknowledged: m.acknowledged,
            })
            .collect();

        Self {
            status: round.status(),
            banner: round.status().banner().to_string(),
            score: round.score(),
            elapsed_seconds,
            target_count,
            interactive: round.status().accepts_clicks(),
            markers,
        }
    }
}
