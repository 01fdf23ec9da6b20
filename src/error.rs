use thiserror::Error;

/// Errors surfaced by the simulation engine.
///
/// All of these are configuration errors: the engine never tries to heal
/// invalid domain data, it refuses the frame and leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("particle mass must be non-zero")]
    ZeroMass,
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
    #[error("speed multiplier must be a positive integer, got {0}")]
    InvalidSpeedMultiplier(u32),
    #[error("force between particles {i} and {j} is not finite")]
    NonFiniteForce { i: usize, j: usize },
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;
