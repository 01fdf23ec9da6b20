//! Vector helpers layered on top of `glam`.

use glam::DVec2;

use crate::config::DISTANCE_EPSILON;

/// Turns a scalar magnitude into a vector pointing from `source` toward `target`.
///
/// Overlapping points (distance below [`DISTANCE_EPSILON`]) have no direction,
/// so the result is zero rather than NaN.
pub fn resolve(magnitude: f64, source: DVec2, target: DVec2) -> DVec2 {
    let delta = target - source;
    let distance = delta.length();
    if distance < DISTANCE_EPSILON {
        return DVec2::ZERO;
    }
    delta * (magnitude / distance)
}
