use std::time::Duration;

use log::debug;

use crate::{
    config::SimulationConfig,
    core::{DisplayPoint, Particle, ParticleStore},
    dynamics::{
        forces::{ForceLaw, ForceRegistry, RandomJitter},
        integrator::{StepMode, Stepper},
    },
    error::SimResult,
    scenario::{Scenario, ScenarioConfig},
    utils::profiling::StepProfiler,
};

/// Central simulation container: particles, force laws, and the stepper.
///
/// The host loop calls [`Simulation::advance`] once per frame and reads
/// [`Simulation::particles`] between frames to render.
pub struct Simulation {
    store: ParticleStore,
    registry: ForceRegistry,
    stepper: Stepper,
    config: SimulationConfig,
    forces_enabled: bool,
    simulated_time: f64,
    frames: u64,
}

impl Simulation {
    /// Empty simulation with the default force laws for `config`.
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        SimulationBuilder::new().config(config).build()
    }

    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    fn from_parts(
        store: ParticleStore,
        registry: ForceRegistry,
        config: SimulationConfig,
    ) -> Self {
        let mut stepper = Stepper::new();
        stepper.set_parallel(config.parallel);
        Self {
            store,
            registry,
            stepper,
            config,
            forces_enabled: true,
            simulated_time: 0.0,
            frames: 0,
        }
    }

    pub fn add_particle(&mut self, particle: Particle) -> usize {
        self.store.add(particle)
    }

    pub fn register_force<F: ForceLaw + 'static>(&mut self, force: F) {
        self.registry.register(force);
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn registry(&self) -> &ForceRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn display_list(&self) -> Vec<DisplayPoint> {
        self.store.display_list()
    }

    pub fn set_forces_enabled(&mut self, enabled: bool) {
        self.forces_enabled = enabled;
    }

    pub fn forces_enabled(&self) -> bool {
        self.forces_enabled
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.stepper.set_parallel(enabled);
        self.config.parallel = self.stepper.parallel();
    }

    pub fn parallel_enabled(&self) -> bool {
        self.stepper.parallel()
    }

    /// Simulated time covered by position integration so far.
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn profiler(&self) -> &StepProfiler {
        self.stepper.profiler()
    }

    /// Advances one frame of `dt` seconds at the given speed multiplier
    /// (`1` runs normally, anything higher fast-forwards).
    pub fn advance(&mut self, dt: f64, speed_multiplier: u32) -> SimResult<()> {
        let mode = StepMode::from_speed_multiplier(speed_multiplier)?;
        self.step(dt, self.forces_enabled, mode)
    }

    /// [`Simulation::advance`] driven by a wall-clock frame duration.
    pub fn advance_by(&mut self, elapsed: Duration, speed_multiplier: u32) -> SimResult<()> {
        self.advance(elapsed.as_secs_f64(), speed_multiplier)
    }

    /// Runs one stepper call with an explicit mode, using the registry's
    /// current force set.
    pub fn step(&mut self, dt: f64, compute_forces: bool, mode: StepMode) -> SimResult<()> {
        let forces = self.registry.active_forces();
        self.stepper
            .step(&mut self.store, dt, compute_forces, mode, &forces)?;

        self.simulated_time += mode.effective_dt(dt) * f64::from(mode.position_substeps());
        self.frames += 1;

        let profiler = self.stepper.profiler();
        if profiler.warn_if_over_budget(self.config.frame_budget_ms) {
            profiler.report();
        }
        Ok(())
    }
}

fn default_registry(config: &SimulationConfig) -> ForceRegistry {
    let mut registry = ForceRegistry::with_defaults(&config.forces);
    if config.enable_jitter {
        let amplitude = config.forces.jitter_amplitude;
        match config.jitter_seed {
            Some(seed) => registry.register(RandomJitter::seeded(amplitude, seed)),
            None => registry.register(RandomJitter::new(amplitude)),
        };
    }
    registry
}

/// Composes a [`Simulation`] from a config, a particle population and an
/// explicit force set.
pub struct SimulationBuilder {
    config: SimulationConfig,
    particles: Vec<Particle>,
    scenario: Option<ScenarioConfig>,
    custom_forces: ForceRegistry,
    default_forces: bool,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            particles: Vec::new(),
            scenario: None,
            custom_forces: ForceRegistry::new(),
            default_forces: true,
        }
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn particle(mut self, particle: Particle) -> Self {
        self.particles.push(particle);
        self
    }

    pub fn particles<I: IntoIterator<Item = Particle>>(mut self, particles: I) -> Self {
        self.particles.extend(particles);
        self
    }

    /// Adds a randomized population after any explicit particles.
    pub fn scenario(mut self, scenario: ScenarioConfig) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Registers a force after the defaults (if kept), in call order.
    pub fn force<F: ForceLaw + 'static>(mut self, force: F) -> Self {
        self.custom_forces.register(force);
        self
    }

    /// Starts from an empty registry instead of gravity and repulsion.
    pub fn without_default_forces(mut self) -> Self {
        self.default_forces = false;
        self
    }

    /// Validates the config and scenario, then assembles the simulation.
    /// Nothing is stepped here, so every rejection happens before frame one.
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;

        let mut store = ParticleStore::with_growth_increment(self.config.growth_increment);
        store.extend(self.particles);
        if let Some(scenario) = &self.scenario {
            store = Scenario::generate_into(scenario, store)?;
        }

        let mut registry = if self.default_forces {
            default_registry(&self.config)
        } else {
            ForceRegistry::new()
        };
        for force in self.custom_forces.active_forces() {
            registry.register_shared(force);
        }

        debug!(
            "built simulation with {} particles and forces {:?}",
            store.count(),
            registry.names()
        );
        Ok(Simulation::from_parts(store, registry, self.config))
    }
}
