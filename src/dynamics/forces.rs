use std::fmt;
use std::sync::Arc;

use glam::DVec2;
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ForceConstants, DISTANCE_EPSILON};
use crate::core::particle::Particle;

/// What a force law returns for an ordered pair of particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceContribution {
    /// Magnitude along the line from the first particle to the second.
    /// Positive attracts, negative repels.
    Scalar(f64),
    /// Force on the first particle, already resolved into components.
    Vector(DVec2),
}

impl ForceContribution {
    pub const ZERO: Self = Self::Scalar(0.0);
}

/// Interaction law between two point masses.
///
/// Implementations must be total over valid particles: coincident or nearly
/// coincident positions are explicit branches, never NaN.
pub trait ForceLaw: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, a: &Particle, b: &Particle) -> ForceContribution;
}

/// Softened gravitational attraction.
///
/// `strength * mA * mB / (d^exponent + offset)` with `1 < exponent < 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitationalPull {
    pub strength: f64,
    pub exponent: f64,
    pub offset: f64,
}

impl GravitationalPull {
    pub fn new(strength: f64, exponent: f64, offset: f64) -> Self {
        Self {
            strength,
            exponent,
            offset,
        }
    }

    pub fn from_constants(constants: &ForceConstants) -> Self {
        Self::new(
            constants.gravity_strength,
            constants.gravity_exponent,
            constants.gravity_offset,
        )
    }
}

impl Default for GravitationalPull {
    fn default() -> Self {
        Self::from_constants(&ForceConstants::default())
    }
}

impl ForceLaw for GravitationalPull {
    fn name(&self) -> &str {
        "gravitational_pull"
    }

    fn evaluate(&self, a: &Particle, b: &Particle) -> ForceContribution {
        let distance_squared = (b.position - a.position).length_squared();
        if distance_squared == 0.0 {
            return ForceContribution::ZERO;
        }
        let denominator = distance_squared.sqrt().powf(self.exponent) + self.offset;
        ForceContribution::Scalar(self.strength * a.mass_f64() * b.mass_f64() / denominator)
    }
}

/// Short-range push that keeps particles from collapsing onto each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseRepulsion {
    pub threshold: f64,
    pub exponent: f64,
}

impl CloseRepulsion {
    pub fn new(threshold: f64, exponent: f64) -> Self {
        Self {
            threshold,
            exponent,
        }
    }

    pub fn from_constants(constants: &ForceConstants) -> Self {
        Self::new(constants.repulsion_threshold, constants.repulsion_exponent)
    }
}

impl Default for CloseRepulsion {
    fn default() -> Self {
        Self::from_constants(&ForceConstants::default())
    }
}

impl ForceLaw for CloseRepulsion {
    fn name(&self) -> &str {
        "close_repulsion"
    }

    fn evaluate(&self, a: &Particle, b: &Particle) -> ForceContribution {
        let distance = (b.position - a.position).length();
        if distance >= self.threshold || distance < DISTANCE_EPSILON {
            return ForceContribution::ZERO;
        }
        ForceContribution::Scalar(-(self.threshold - distance).powf(self.exponent))
    }
}

/// Stochastic perturbation scaled by the product of the masses.
///
/// Not a physical force. Runs are only reproducible when built with
/// [`RandomJitter::seeded`].
pub struct RandomJitter {
    amplitude: f64,
    rng: Mutex<StdRng>,
}

impl RandomJitter {
    pub fn new(amplitude: f64) -> Self {
        Self::with_rng(amplitude, StdRng::from_os_rng())
    }

    pub fn seeded(amplitude: f64, seed: u64) -> Self {
        Self::with_rng(amplitude, StdRng::seed_from_u64(seed))
    }

    fn with_rng(amplitude: f64, rng: StdRng) -> Self {
        Self {
            amplitude: amplitude.abs(),
            rng: Mutex::new(rng),
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl fmt::Debug for RandomJitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomJitter")
            .field("amplitude", &self.amplitude)
            .finish_non_exhaustive()
    }
}

impl ForceLaw for RandomJitter {
    fn name(&self) -> &str {
        "random_jitter"
    }

    fn evaluate(&self, a: &Particle, b: &Particle) -> ForceContribution {
        if (b.position - a.position).length() < DISTANCE_EPSILON {
            return ForceContribution::ZERO;
        }
        // A non-finite amplitude has no sampling range; surface it as a
        // non-finite force so the stepper refuses the frame.
        if !self.amplitude.is_finite() {
            return ForceContribution::Scalar(self.amplitude);
        }
        let draw = self
            .rng
            .lock()
            .random_range(-self.amplitude..=self.amplitude);
        ForceContribution::Scalar(draw * a.mass_f64() * b.mass_f64())
    }
}

/// Adapts a closure into a named [`ForceLaw`].
pub struct FnForce<F> {
    name: String,
    func: F,
}

impl<F> FnForce<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Particle, &Particle) -> ForceContribution + Send + Sync,
    {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> ForceLaw for FnForce<F>
where
    F: Fn(&Particle, &Particle) -> ForceContribution + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, a: &Particle, b: &Particle) -> ForceContribution {
        (self.func)(a, b)
    }
}

/// Snapshot of the registered force laws, in registration order.
pub type ForceSet = Vec<Arc<dyn ForceLaw>>;

/// Ordered, append-only collection of force laws.
///
/// Registration order is the floating-point summation order, so two runs
/// registering the same laws in the same order accumulate identically.
#[derive(Default, Clone)]
pub struct ForceRegistry {
    forces: ForceSet,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    /// Registry holding gravity followed by close-range repulsion.
    pub fn with_defaults(constants: &ForceConstants) -> Self {
        Self::new()
            .with(GravitationalPull::from_constants(constants))
            .with(CloseRepulsion::from_constants(constants))
    }

    /// Builder-style [`ForceRegistry::register`].
    pub fn with<F: ForceLaw + 'static>(mut self, force: F) -> Self {
        self.register(force);
        self
    }

    pub fn register<F: ForceLaw + 'static>(&mut self, force: F) -> &mut Self {
        self.register_shared(Arc::new(force))
    }

    pub fn register_shared(&mut self, force: Arc<dyn ForceLaw>) -> &mut Self {
        debug!(
            "registered force '{}' at position {}",
            force.name(),
            self.forces.len()
        );
        self.forces.push(force);
        self
    }

    pub fn active_forces(&self) -> ForceSet {
        self.forces.clone()
    }

    pub fn names(&self) -> Vec<&str> {
        self.forces.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }
}

impl fmt::Debug for ForceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
