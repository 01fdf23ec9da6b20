use std::ops::Index;

use glam::DVec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_GROWTH_INCREMENT;
use crate::core::particle::Particle;

/// Position and visual size handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub position: DVec2,
    pub size: f64,
}

/// Growable, order-preserving particle storage.
///
/// `capacity` is the number of allocated slots and `count` the number in use.
/// Growth adds a fixed number of slots at a time; particles keep their index
/// and value across growth.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    capacity: usize,
    growth_increment: usize,
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::with_growth_increment(DEFAULT_GROWTH_INCREMENT)
    }

    pub fn with_growth_increment(growth_increment: usize) -> Self {
        Self {
            particles: Vec::new(),
            capacity: 0,
            growth_increment: growth_increment.max(1),
        }
    }

    /// Appends a particle and returns its index.
    pub fn add(&mut self, particle: Particle) -> usize {
        if self.particles.len() == self.capacity {
            self.grow();
        }
        let index = self.particles.len();
        self.particles.push(particle);
        index
    }

    fn grow(&mut self) {
        self.capacity += self.growth_increment;
        self.particles
            .reserve_exact(self.capacity - self.particles.len());
        debug!(
            "particle store grown to {} slots ({} in use)",
            self.capacity,
            self.particles.len()
        );
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_increment(&self) -> usize {
        self.growth_increment
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// The active particles, `[0, count)`.
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    pub fn display_list(&self) -> Vec<DisplayPoint> {
        self.particles
            .iter()
            .map(|p| DisplayPoint {
                position: p.position,
                size: p.display_size(),
            })
            .collect()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.particles.iter().map(Particle::momentum).sum()
    }

    pub fn total_mass(&self) -> u64 {
        self.particles.iter().map(|p| u64::from(p.mass())).sum()
    }
}

impl Index<usize> for ParticleStore {
    type Output = Particle;

    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}

impl Extend<Particle> for ParticleStore {
    fn extend<I: IntoIterator<Item = Particle>>(&mut self, iter: I) {
        for particle in iter {
            self.add(particle);
        }
    }
}

impl FromIterator<Particle> for ParticleStore {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
