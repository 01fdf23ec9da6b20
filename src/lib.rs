//! NBody Sim – brute-force 2-D N-body particle simulation.
//!
//! Point masses interact through an ordered set of pluggable force laws.
//! Every unordered pair is visited once per step, the pair force is applied
//! equal and opposite, and the state advances with semi-implicit Euler. A
//! fast-forward mode pays for the O(n²) force pass once while running several
//! position sub-steps.

pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod scenario;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use config::{ForceConstants, SimulationConfig};
pub use core::{DisplayPoint, Particle, ParticleStore};
pub use dynamics::{
    accumulate::compute_force,
    forces::{
        CloseRepulsion, FnForce, ForceContribution, ForceLaw, ForceRegistry, ForceSet,
        GravitationalPull, RandomJitter,
    },
    integrator::{StepMode, Stepper},
};
pub use error::{SimError, SimResult};
pub use scenario::{Scenario, ScenarioConfig};
pub use utils::{math::resolve, profiling::StepProfiler};
pub use world::{Simulation, SimulationBuilder};
