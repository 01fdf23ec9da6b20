//! Pairwise force accumulation.
//!
//! Every function here is pure over a particle slice; the stepper owns all
//! mutation.

use std::sync::Arc;

use glam::DVec2;

use crate::core::particle::Particle;
use crate::dynamics::forces::{ForceContribution, ForceLaw};
use crate::error::{SimError, SimResult};
use crate::utils::math::resolve;

/// Combined force of every law on `a` due to `b`, summed in slice order.
///
/// The result points from `a` toward `b` for attraction; the reaction on `b`
/// is its exact negation.
pub fn compute_force(a: &Particle, b: &Particle, forces: &[Arc<dyn ForceLaw>]) -> DVec2 {
    let mut total = DVec2::ZERO;
    for force in forces {
        total += match force.evaluate(a, b) {
            ForceContribution::Scalar(magnitude) => resolve(magnitude, a.position, b.position),
            ForceContribution::Vector(vector) => vector,
        };
    }
    total
}

/// Number of unordered pairs visited for `count` particles.
pub fn pair_count(count: usize) -> usize {
    count * count.saturating_sub(1) / 2
}

/// Adds the pair `(i, j)` into `out` as accelerations, `+F/mi` on `i` and `-F/mj` on `j`.
#[inline]
pub(crate) fn apply_pair(
    particles: &[Particle],
    i: usize,
    j: usize,
    forces: &[Arc<dyn ForceLaw>],
    out: &mut [DVec2],
) -> SimResult<()> {
    let a = &particles[i];
    let b = &particles[j];
    let force = compute_force(a, b, forces);
    if !force.is_finite() {
        return Err(SimError::NonFiniteForce { i, j });
    }
    out[i] += force / a.mass_f64();
    out[j] -= force / b.mass_f64();
    Ok(())
}

/// Fills `out[i]` with the net acceleration on particle `i`.
///
/// O(n²) over unordered pairs `i < j`. Fails on the first pair whose combined
/// force is not finite; `out` is then partially written and must be discarded.
pub fn accumulate_accelerations(
    particles: &[Particle],
    forces: &[Arc<dyn ForceLaw>],
    out: &mut [DVec2],
) -> SimResult<()> {
    debug_assert_eq!(particles.len(), out.len());
    out.fill(DVec2::ZERO);

    let n = particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            apply_pair(particles, i, j, forces, out)?;
        }
    }
    Ok(())
}
