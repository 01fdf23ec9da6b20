use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nbody_sim::config::DEFAULT_TIME_STEP as DT;
use nbody_sim::*;
use std::hint::black_box;

fn prepare_simulation(count: usize, parallel: bool) -> Simulation {
    Simulation::builder()
        .config(SimulationConfig {
            parallel,
            ..SimulationConfig::default()
        })
        .scenario(ScenarioConfig {
            count,
            seed: Some(0xB0D1),
            ..ScenarioConfig::default()
        })
        .build()
        .expect("benchmark scenario should build")
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for &count in &[128usize, 512, 2048] {
        group.bench_with_input(
            BenchmarkId::new("sequential", count),
            &count,
            |b, &count| {
                let mut sim = prepare_simulation(count, false);
                b.iter(|| sim.advance(black_box(DT), 1))
            },
        );
        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, &count| {
            let mut sim = prepare_simulation(count, true);
            b.iter(|| sim.advance(black_box(DT), 1))
        });
    }
    group.finish();
}

fn bench_fast_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_forward");
    let count = 512;
    for &multiplier in &[1u32, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("multiplier", multiplier),
            &multiplier,
            |b, &multiplier| {
                let mut sim = prepare_simulation(count, false);
                b.iter(|| sim.advance(black_box(DT), multiplier))
            },
        );
    }
    group.finish();
}

fn bench_compute_force(c: &mut Criterion) {
    let forces = ForceRegistry::with_defaults(&ForceConstants::default()).active_forces();
    let a = Particle::at_rest(DVec2::new(0.0, 0.0), 10).unwrap();
    let b = Particle::at_rest(DVec2::new(3.0, 4.0), 20).unwrap();

    c.bench_function("compute_force", |bench| {
        bench.iter(|| compute_force(black_box(&a), black_box(&b), &forces))
    });
}

criterion_group!(benches, bench_step, bench_fast_forward, bench_compute_force);
criterion_main!(benches);
