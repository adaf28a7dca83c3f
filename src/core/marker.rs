//! Numbered markers and their placement.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Marker identifier. Ids are dense: `1..=target_count`.
pub type MarkerId = u32;

/// Lower bound (inclusive) of a marker coordinate, in percent of the board.
pub const PLACEMENT_MIN: f64 = 1.0;

/// Upper bound (exclusive) of a marker coordinate, in percent of the board.
pub const PLACEMENT_MAX: f64 = 86.0;

/// A clickable numbered target.
///
/// `acknowledged` flips on the correct click; `visible` flips off only once
/// the delayed hide lands.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
    pub acknowledged: bool,
}

impl Marker {
    /// Paint priority: marker 1 sits on top of marker 2, and so on.
    pub fn z_index(&self, target_count: u32) -> u32 {
        target_count.saturating_add(1).saturating_sub(self.id)
    }
}

/// Place `count` markers uniformly at random on the board.
///
/// The result is ordered by id, highest first.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use sequence_tap::core::scatter;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let markers = scatter(3, &mut rng);
/// let ids: Vec<u32> = markers.iter().map(|m| m.id).collect();
/// assert_eq!(ids, vec![3, 2, 1]);
/// ```
pub fn scatter<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Marker> {
    let mut markers: Vec<Marker> = (1..=count)
        .map(|id| Marker {
            id,
            x: rng.gen_range(PLACEMENT_MIN..PLACEMENT_MAX),
            y: rng.gen_range(PLACEMENT_MIN..PLACEMENT_MAX),
            visible: true,
            acknowledged: false,
        })
        .collect();
    markers.sort_by(|a, b| b.id.cmp(&a.id));
    markers
}
