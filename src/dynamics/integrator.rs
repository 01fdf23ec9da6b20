use std::sync::Arc;
use std::time::Instant;

use glam::DVec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::FAST_FORWARD_EXTRA_SUBSTEPS;
use crate::core::particle::Particle;
use crate::core::store::ParticleStore;
use crate::dynamics::accumulate::{accumulate_accelerations, pair_count};
use crate::dynamics::forces::ForceLaw;
use crate::error::{SimError, SimResult};
use crate::utils::profiling::{ScopedTimer, StepProfiler};

/// How a single [`Stepper::step`] call advances time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepMode {
    /// One force update and one position update at `dt`.
    #[default]
    Normal,
    /// One force update at `dt * multiplier`, then
    /// `1 + FAST_FORWARD_EXTRA_SUBSTEPS` position updates at the same step.
    /// Trades force accuracy for speed: the O(n²) pass runs once per call.
    FastForward { multiplier: u32 },
}

impl StepMode {
    /// Maps a speed-control signal onto a mode; `1` is normal speed.
    pub fn from_speed_multiplier(multiplier: u32) -> SimResult<Self> {
        match multiplier {
            0 => Err(SimError::InvalidSpeedMultiplier(0)),
            1 => Ok(Self::Normal),
            multiplier => Ok(Self::FastForward { multiplier }),
        }
    }

    pub fn effective_dt(&self, dt: f64) -> f64 {
        match *self {
            Self::Normal => dt,
            Self::FastForward { multiplier } => dt * f64::from(multiplier),
        }
    }

    pub fn position_substeps(&self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::FastForward { .. } => 1 + FAST_FORWARD_EXTRA_SUBSTEPS,
        }
    }

    /// Fast-forward only exists for multipliers above 1.
    fn validate(&self) -> SimResult<()> {
        match *self {
            Self::FastForward { multiplier } if multiplier < 2 => {
                Err(SimError::InvalidSpeedMultiplier(multiplier))
            }
            _ => Ok(()),
        }
    }
}

/// Advances every particle in place: `x += v * dt`.
pub fn integrate_positions(particles: &mut [Particle], dt: f64) {
    for particle in particles.iter_mut() {
        particle.position += particle.velocity * dt;
    }
}

/// Semi-implicit Euler stepper over a [`ParticleStore`].
///
/// Velocities are updated from the accumulated forces first, then positions
/// use the updated velocities. A step is all-or-nothing: forces are gathered
/// into a scratch buffer and nothing in the store changes unless the whole
/// pass succeeds.
#[derive(Debug, Default, Clone)]
pub struct Stepper {
    parallel: bool,
    accelerations: Vec<DVec2>,
    profiler: StepProfiler,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the rayon force pass. Ignored (with a warning) when the crate
    /// is built without the `parallel` feature.
    pub fn set_parallel(&mut self, enabled: bool) {
        if enabled && !cfg!(feature = "parallel") {
            warn!("parallel force pass requested but the `parallel` feature is disabled");
            self.parallel = false;
            return;
        }
        self.parallel = enabled;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Timing for the most recent call to [`Stepper::step`].
    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    /// Advances the store by one frame.
    ///
    /// `dt` must be finite and non-negative. With `compute_forces` off only
    /// positions move, reusing the current velocities.
    pub fn step(
        &mut self,
        store: &mut ParticleStore,
        dt: f64,
        compute_forces: bool,
        mode: StepMode,
        forces: &[Arc<dyn ForceLaw>],
    ) -> SimResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimeStep(dt));
        }
        mode.validate()?;

        let start = Instant::now();
        let step_dt = mode.effective_dt(dt);
        let substeps = mode.position_substeps();

        self.profiler.reset();
        self.profiler.particle_count = store.count();
        self.profiler.position_substeps = substeps;

        if compute_forces {
            self.profiler.pair_count = pair_count(store.count());
            self.update_velocities(store.as_mut_slice(), step_dt, forces)?;
        }

        {
            let _timer = ScopedTimer::new("integrate", &mut self.profiler.integration_time);
            let particles = store.as_mut_slice();
            for _ in 0..substeps {
                integrate_positions(particles, step_dt);
            }
        }

        self.profiler.total_step_time = start.elapsed();
        Ok(())
    }

    fn update_velocities(
        &mut self,
        particles: &mut [Particle],
        dt: f64,
        forces: &[Arc<dyn ForceLaw>],
    ) -> SimResult<()> {
        self.accelerations.clear();
        self.accelerations.resize(particles.len(), DVec2::ZERO);

        {
            let _timer = ScopedTimer::new("forces", &mut self.profiler.force_time);
            accumulate(self.parallel, particles, forces, &mut self.accelerations)?;
        }

        for (particle, acceleration) in particles.iter_mut().zip(&self.accelerations) {
            particle.velocity += *acceleration * dt;
        }
        Ok(())
    }
}

#[cfg(feature = "parallel")]
fn accumulate(
    parallel: bool,
    particles: &[Particle],
    forces: &[Arc<dyn ForceLaw>],
    out: &mut [DVec2],
) -> SimResult<()> {
    if parallel {
        crate::dynamics::parallel::par_accumulate_accelerations(particles, forces, out)
    } else {
        accumulate_accelerations(particles, forces, out)
    }
}

#[cfg(not(feature = "parallel"))]
fn accumulate(
    _parallel: bool,
    particles: &[Particle],
    forces: &[Arc<dyn ForceLaw>],
    out: &mut [DVec2],
) -> SimResult<()> {
    accumulate_accelerations(particles, forces, out)
}
