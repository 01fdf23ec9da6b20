use std::num::NonZeroU32;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::DISPLAY_SIZE_EXPONENT;
use crate::error::{SimError, SimResult};

/// A point mass with position and velocity.
///
/// Mass is fixed at construction and can never be zero, since every step
/// divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    mass: NonZeroU32,
}

impl Particle {
    pub fn new(position: DVec2, mass: u32, velocity: DVec2) -> SimResult<Self> {
        let mass = NonZeroU32::new(mass).ok_or(SimError::ZeroMass)?;
        Ok(Self {
            position,
            velocity,
            mass,
        })
    }

    /// Creates a particle with zero initial velocity.
    pub fn at_rest(position: DVec2, mass: u32) -> SimResult<Self> {
        Self::new(position, mass, DVec2::ZERO)
    }

    pub fn mass(&self) -> u32 {
        self.mass.get()
    }

    pub fn mass_f64(&self) -> f64 {
        f64::from(self.mass.get())
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass_f64()
    }

    /// Visual size used by renderers; grows sub-linearly with mass.
    pub fn display_size(&self) -> f64 {
        self.mass_f64().powf(DISPLAY_SIZE_EXPONENT)
    }
}
