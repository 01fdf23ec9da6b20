use std::time::Duration;

use nbody_sim::config::DEFAULT_TIME_STEP;
use nbody_sim::*;

fn main() -> Result<(), SimError> {
    env_logger::init();

    let mut sim = Simulation::builder()
        .scenario(ScenarioConfig {
            count: 300,
            seed: Some(7),
            ..ScenarioConfig::default()
        })
        .build()?;

    let frame = Duration::from_secs_f64(DEFAULT_TIME_STEP);
    for i in 0..240 {
        // Every fourth second of frames runs at 8x, like holding the speed key.
        let speed = if (i / 60) % 4 == 3 { 8 } else { 1 };
        sim.advance_by(frame, speed)?;
    }

    let momentum = sim.particles().total_momentum();
    println!(
        "{} frames, {:.2} simulated seconds, net momentum ({:.3e}, {:.3e})",
        sim.frames(),
        sim.simulated_time(),
        momentum.x,
        momentum.y
    );
    sim.profiler().report();

    for point in sim.display_list().iter().take(5) {
        println!(
            "  at ({:8.2}, {:8.2}) size {:.2}",
            point.position.x, point.position.y, point.size
        );
    }
    Ok(())
}
