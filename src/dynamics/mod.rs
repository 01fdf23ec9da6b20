//! Simulation dynamics: force laws, pairwise accumulation, and integration.

pub mod accumulate;
pub mod forces;
pub mod integrator;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use accumulate::{accumulate_accelerations, compute_force};
pub use forces::{
    CloseRepulsion, FnForce, ForceContribution, ForceLaw, ForceRegistry, ForceSet,
    GravitationalPull, RandomJitter,
};
pub use integrator::{integrate_positions, StepMode, Stepper};
#[cfg(feature = "parallel")]
pub use parallel::par_accumulate_accelerations;
