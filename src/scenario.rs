//! Randomized initial populations.

use glam::DVec2;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_GROWTH_INCREMENT;
use crate::core::{Particle, ParticleStore};
use crate::error::{SimError, SimResult};

/// Bounds for a randomly generated population. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub count: usize,
    pub position_range: (f64, f64),
    pub mass_range: (u32, u32),
    pub velocity_range: (f64, f64),
    pub seed: Option<u64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            count: 200,
            position_range: (-400.0, 400.0),
            mass_range: (1, 20),
            velocity_range: (-1.0, 1.0),
            seed: None,
        }
    }
}

impl ScenarioConfig {
    fn validate(&self) -> SimResult<()> {
        let (p_lo, p_hi) = self.position_range;
        let (v_lo, v_hi) = self.velocity_range;
        let (m_lo, m_hi) = self.mass_range;

        if !(p_lo.is_finite() && p_hi.is_finite()) || p_lo > p_hi {
            return Err(SimError::InvalidScenario(format!(
                "position range {p_lo}..={p_hi}"
            )));
        }
        if !(v_lo.is_finite() && v_hi.is_finite()) || v_lo > v_hi {
            return Err(SimError::InvalidScenario(format!(
                "velocity range {v_lo}..={v_hi}"
            )));
        }
        if m_lo == 0 || m_lo > m_hi {
            return Err(SimError::InvalidScenario(format!(
                "mass range {m_lo}..={m_hi}"
            )));
        }
        Ok(())
    }
}

pub struct Scenario;

impl Scenario {
    /// Builds a store of `config.count` particles drawn uniformly from the
    /// configured ranges.
    pub fn generate(config: &ScenarioConfig) -> SimResult<ParticleStore> {
        let store = ParticleStore::with_growth_increment(DEFAULT_GROWTH_INCREMENT);
        Self::generate_into(config, store)
    }

    /// Like [`Scenario::generate`] but appends to an existing store.
    pub fn generate_into(
        config: &ScenarioConfig,
        mut store: ParticleStore,
    ) -> SimResult<ParticleStore> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let (p_lo, p_hi) = config.position_range;
        let (v_lo, v_hi) = config.velocity_range;
        let (m_lo, m_hi) = config.mass_range;

        for _ in 0..config.count {
            let position = DVec2::new(
                rng.random_range(p_lo..=p_hi),
                rng.random_range(p_lo..=p_hi),
            );
            let velocity = DVec2::new(
                rng.random_range(v_lo..=v_hi),
                rng.random_range(v_lo..=v_hi),
            );
            let mass = rng.random_range(m_lo..=m_hi);
            store.add(Particle::new(position, mass, velocity)?);
        }

        info!(
            "generated scenario: {} particles, total mass {}",
            store.count(),
            store.total_mass()
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_scenarios_repeat() {
        let config = ScenarioConfig {
            count: 25,
            seed: Some(9),
            ..ScenarioConfig::default()
        };
        let a = Scenario::generate(&config).unwrap();
        let b = Scenario::generate(&config).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn particles_respect_bounds() {
        let config = ScenarioConfig {
            count: 100,
            position_range: (-5.0, 5.0),
            mass_range: (3, 4),
            velocity_range: (0.0, 0.5),
            seed: Some(1),
        };
        let store = Scenario::generate(&config).unwrap();
        assert_eq!(store.count(), 100);
        for p in store.iter() {
            assert!(p.position.abs().max_element() <= 5.0);
            assert!((3..=4).contains(&p.mass()));
            assert!(p.velocity.min_element() >= 0.0 && p.velocity.max_element() <= 0.5);
        }
    }

    #[test]
    fn zero_mass_lower_bound_is_rejected() {
        let config = ScenarioConfig {
            mass_range: (0, 5),
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            Scenario::generate(&config),
            Err(SimError::InvalidScenario(_))
        ));
    }
}
