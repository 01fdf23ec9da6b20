use nbody_sim::*;
use std::sync::{Arc, Mutex};
use std::thread;

fn seeded_simulation(parallel: bool) -> Simulation {
    Simulation::builder()
        .config(SimulationConfig {
            parallel,
            ..SimulationConfig::default()
        })
        .scenario(ScenarioConfig {
            count: 150,
            position_range: (-50.0, 50.0),
            seed: Some(21),
            ..ScenarioConfig::default()
        })
        .build()
        .unwrap()
}

#[test]
fn test_simulation_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<Simulation>();
    assert_sync_send::<ForceRegistry>();
}

#[test]
fn test_shared_simulation_across_threads() {
    let sim = Arc::new(Mutex::new(seeded_simulation(false)));

    let mut handles = vec![];
    for _ in 0..4 {
        let sim_clone = Arc::clone(&sim);
        let handle = thread::spawn(move || {
            let mut sim = sim_clone.lock().unwrap();
            sim.advance(config::DEFAULT_TIME_STEP, 1).unwrap();
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(sim.lock().unwrap().frames(), 4);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_pass_tracks_sequential_pass() {
    let mut sequential = seeded_simulation(false);
    let mut parallel = seeded_simulation(true);
    assert!(parallel.parallel_enabled());

    for _ in 0..5 {
        sequential.advance(0.01, 1).unwrap();
        parallel.advance(0.01, 1).unwrap();
    }

    for (s, p) in sequential.particles().iter().zip(parallel.particles().iter()) {
        assert!(
            (s.position - p.position).length() < 1e-6,
            "{:?} vs {:?}",
            s.position,
            p.position
        );
    }
}
