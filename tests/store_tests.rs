use nbody_sim::*;

fn numbered(i: usize) -> Particle {
    Particle::new(
        DVec2::new(i as f64, -(i as f64)),
        (i % 9 + 1) as u32,
        DVec2::new(0.5 * i as f64, 1.0),
    )
    .unwrap()
}

#[test]
fn growth_preserves_every_particle() {
    let mut store = ParticleStore::with_growth_increment(16);
    let m = 150;
    for i in 0..m {
        assert_eq!(store.add(numbered(i)), i);
    }

    assert_eq!(store.count(), m);
    assert!(store.capacity() >= m);
    assert_eq!(store.capacity() % 16, 0);
    assert!(store.capacity() - m < 16);
    for i in 0..m {
        assert_eq!(store[i], numbered(i));
    }
}

#[test]
fn empty_store_reports_nothing() {
    let store = ParticleStore::new();
    assert!(store.is_empty());
    assert_eq!(store.count(), 0);
    assert_eq!(store.total_momentum(), DVec2::ZERO);
    assert!(store.display_list().is_empty());
    assert!(store.get(0).is_none());
}

#[test]
fn stepping_an_empty_or_single_store_is_harmless() {
    let forces = ForceRegistry::with_defaults(&ForceConstants::default()).active_forces();
    let mut stepper = Stepper::new();

    let mut empty = ParticleStore::new();
    stepper.step(&mut empty, 1.0, true, StepMode::Normal, &forces).unwrap();

    let mut single: ParticleStore = std::iter::once(numbered(3)).collect();
    stepper.step(&mut single, 1.0, true, StepMode::Normal, &forces).unwrap();
    assert_eq!(single[0].velocity, numbered(3).velocity);
    assert_eq!(single[0].position, numbered(3).position + numbered(3).velocity);
}

#[test]
fn total_mass_sums_every_particle() {
    let store: ParticleStore = (0..3).map(numbered).collect();
    let total = store.total_mass();
    assert_eq!(total, 1 + 2 + 3);
}
