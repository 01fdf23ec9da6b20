//! Global configuration constants and serde-loadable settings for the simulator.
//!
//! The force constants are empirically tuned rather than derived, so every one
//! of them can be overridden through [`ForceConstants`].

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Number of slots the particle store grows by when it runs out of room.
pub const DEFAULT_GROWTH_INCREMENT: usize = 64;

/// Distances below this are treated as overlapping particles.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Scale applied to the gravitational pull.
pub const DEFAULT_GRAVITY_STRENGTH: f64 = 1.0;

/// Softened distance exponent for gravity; kept strictly between 1 and 2.
pub const DEFAULT_GRAVITY_EXPONENT: f64 = 1.5;

/// Additive offset in the gravity denominator bounding the force near zero distance.
pub const DEFAULT_GRAVITY_OFFSET: f64 = 0.1;

/// Distance past which close-range repulsion switches off.
pub const DEFAULT_REPULSION_THRESHOLD: f64 = 5.0;

/// Exponent applied to the repulsion overlap `(threshold - distance)`.
pub const DEFAULT_REPULSION_EXPONENT: f64 = 1.7;

/// Half-width of the uniform range used by random jitter.
pub const DEFAULT_JITTER_AMPLITUDE: f64 = 0.01;

/// Extra position sub-steps run by fast-forward after the regular one.
pub const FAST_FORWARD_EXTRA_SUBSTEPS: u32 = 2;

/// Sub-linear exponent mapping mass to on-screen size.
pub const DISPLAY_SIZE_EXPONENT: f64 = 0.4;

/// Frame budget used for the over-budget warning (in milliseconds).
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 16.6;

/// Tunable constants for the built-in force laws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConstants {
    pub gravity_strength: f64,
    pub gravity_exponent: f64,
    pub gravity_offset: f64,
    pub repulsion_threshold: f64,
    pub repulsion_exponent: f64,
    pub jitter_amplitude: f64,
}

impl Default for ForceConstants {
    fn default() -> Self {
        Self {
            gravity_strength: DEFAULT_GRAVITY_STRENGTH,
            gravity_exponent: DEFAULT_GRAVITY_EXPONENT,
            gravity_offset: DEFAULT_GRAVITY_OFFSET,
            repulsion_threshold: DEFAULT_REPULSION_THRESHOLD,
            repulsion_exponent: DEFAULT_REPULSION_EXPONENT,
            jitter_amplitude: DEFAULT_JITTER_AMPLITUDE,
        }
    }
}

impl ForceConstants {
    /// Rejects constants the built-in laws cannot evaluate safely.
    pub fn validate(&self) -> SimResult<()> {
        let exponent = self.gravity_exponent;
        if !(exponent > 1.0 && exponent < 2.0) {
            return Err(invalid(format!(
                "gravity exponent must lie strictly between 1 and 2, got {exponent}"
            )));
        }
        non_negative("gravity strength", self.gravity_strength)?;
        non_negative("gravity offset", self.gravity_offset)?;
        non_negative("repulsion threshold", self.repulsion_threshold)?;
        non_negative("repulsion exponent", self.repulsion_exponent)?;
        if !self.jitter_amplitude.is_finite() {
            return Err(invalid(format!(
                "jitter amplitude must be finite, got {}",
                self.jitter_amplitude
            )));
        }
        Ok(())
    }
}

/// Engine-level settings for a [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub growth_increment: usize,
    pub forces: ForceConstants,
    /// Registers [`crate::dynamics::forces::RandomJitter`] with the defaults.
    pub enable_jitter: bool,
    /// Seed for the jitter RNG; `None` draws from OS entropy.
    pub jitter_seed: Option<u64>,
    pub frame_budget_ms: f32,
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            forces: ForceConstants::default(),
            enable_jitter: false,
            jitter_seed: None,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        self.forces.validate()?;
        if !(self.frame_budget_ms.is_finite() && self.frame_budget_ms > 0.0) {
            return Err(invalid(format!(
                "frame budget must be a positive number of milliseconds, got {}",
                self.frame_budget_ms
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfig(message)
}

fn non_negative(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and non-negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_exponent_is_softened() {
        let constants = ForceConstants::default();
        assert!(constants.gravity_exponent > 1.0 && constants.gravity_exponent < 2.0);
        assert!(constants.gravity_offset > 0.0);
    }

    #[test]
    fn defaults_keep_jitter_off() {
        let config = SimulationConfig::default();
        assert!(!config.enable_jitter);
        assert_eq!(config.growth_increment, DEFAULT_GROWTH_INCREMENT);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn gravity_exponent_outside_open_interval_is_rejected() {
        for exponent in [1.0, 2.0, 3.0, 0.5, f64::NAN] {
            let constants = ForceConstants {
                gravity_exponent: exponent,
                ..ForceConstants::default()
            };
            assert!(
                matches!(constants.validate(), Err(SimError::InvalidConfig(_))),
                "exponent {exponent} accepted"
            );
        }
    }

    #[test]
    fn non_finite_or_negative_constants_are_rejected() {
        let broken = [
            ForceConstants {
                gravity_offset: -0.1,
                ..ForceConstants::default()
            },
            ForceConstants {
                repulsion_threshold: f64::INFINITY,
                ..ForceConstants::default()
            },
            ForceConstants {
                jitter_amplitude: f64::NAN,
                ..ForceConstants::default()
            },
            ForceConstants {
                jitter_amplitude: f64::NEG_INFINITY,
                ..ForceConstants::default()
            },
        ];
        for constants in &broken {
            assert!(matches!(
                constants.validate(),
                Err(SimError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn negative_jitter_amplitude_is_only_a_sign() {
        let constants = ForceConstants {
            jitter_amplitude: -0.5,
            ..ForceConstants::default()
        };
        assert_eq!(constants.validate(), Ok(()));
    }
}
