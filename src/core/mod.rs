//! Core types describing particles and their storage.

pub mod particle;
pub mod store;

pub use particle::Particle;
pub use store::{DisplayPoint, ParticleStore};
