use std::sync::Arc;

use glam::DVec2;
use rayon::prelude::*;

use crate::core::particle::Particle;
use crate::dynamics::accumulate::apply_pair;
use crate::dynamics::forces::ForceLaw;
use crate::error::{SimError, SimResult};

/// Rayon version of [`crate::dynamics::accumulate::accumulate_accelerations`].
///
/// Each worker folds its rows into a thread-local buffer; buffers are summed
/// after the pass so no two threads ever write the same slot. Reduction order
/// depends on scheduling, so results can differ from the sequential pass in
/// the last bits.
pub fn par_accumulate_accelerations(
    particles: &[Particle],
    forces: &[Arc<dyn ForceLaw>],
    out: &mut [DVec2],
) -> SimResult<()> {
    let n = particles.len();
    debug_assert_eq!(n, out.len());

    let totals = (0..n)
        .into_par_iter()
        .try_fold(
            || vec![DVec2::ZERO; n],
            |mut local, i| {
                for j in (i + 1)..n {
                    apply_pair(particles, i, j, forces, &mut local)?;
                }
                Ok::<_, SimError>(local)
            },
        )
        .try_reduce(
            || vec![DVec2::ZERO; n],
            |mut acc, local| {
                for (slot, value) in acc.iter_mut().zip(local) {
                    *slot += value;
                }
                Ok::<_, SimError>(acc)
            },
        )?;

    out.copy_from_slice(&totals);
    Ok(())
}
