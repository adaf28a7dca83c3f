//! Elapsed-time rounding.

use std::time::Duration;

/// Seconds rounded half-up to one decimal place.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sequence_tap::clock::round_tenths;
///
/// assert_eq!(round_tenths(Duration::from_millis(1_249)), 1.2);
/// assert_eq!(round_tenths(Duration::from_millis(1_250)), 1.3);
/// ```
pub fn round_tenths(elapsed: Duration) -> f64 {
    let tenths = (elapsed.as_millis() + 50) / 100;
    tenths as f64 / 10.0
}
