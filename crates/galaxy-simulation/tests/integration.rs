use galaxy_physics::{FieldGenerator, GeneratorConfig, ParticleField, Star, ATTRACTOR_MASS};
use galaxy_simulation::{Integrator, SimulationParams, PARALLEL_THRESHOLD};
use glam::Vec3;

/// A field large enough to take the parallel path
fn large_field(seed: u64) -> ParticleField {
    let config = GeneratorConfig::new(PARALLEL_THRESHOLD * 4, 100_000.0, ATTRACTOR_MASS);
    FieldGenerator::new(config).unwrap().generate_seeded(seed)
}

// ==================================================================================
// Determinism
// ==================================================================================

#[test]
fn step_is_deterministic() {
    let integrator = Integrator::default();
    let mut a = large_field(1);
    let mut b = a.clone();

    for _ in 0..3 {
        integrator.step(&mut a, 0.016);
        integrator.step(&mut b, 0.016);
    }

    assert_eq!(a, b);
}

#[test]
fn parallel_matches_serial() {
    let integrator = Integrator::default();
    let mut parallel = large_field(2);
    let mut serial = parallel.clone();

    for _ in 0..3 {
        integrator.step(&mut parallel, 0.5);
        integrator.step_serial(&mut serial, 0.5);
    }

    assert_eq!(parallel, serial);
}

#[test]
fn zero_dt_leaves_large_field_untouched() {
    let mut field = large_field(3);
    let before = field.clone();
    Integrator::default().step(&mut field, 0.0);
    assert_eq!(field, before);
}

// ==================================================================================
// Physics sanity
// ==================================================================================

#[test]
fn stars_at_rest_accelerate_inward_at_any_distance() {
    let params = SimulationParams {
        gravitational_constant: 1.0,
        ..Default::default()
    };
    let integrator = Integrator::new(&params);

    for distance in [0.01_f32, 1.0, 100.0, 50_000.0] {
        for direction in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 1.0, -1.0).normalize()] {
            let start = direction * distance;
            let mut field = ParticleField::from_stars(vec![
                Star::attractor(1.0e6),
                Star::orbiter(start, Vec3::ZERO, 1.0),
            ])
            .unwrap();

            integrator.step(&mut field, 1.0e-3);

            let star = field.stars()[1];
            let r = field.attractor().position - start;
            assert!(
                star.velocity.dot(r) > 0.0,
                "no inward pull at distance {distance}"
            );
        }
    }
}

/// Smallest epsilon `SimulationParams::validate` accepts
fn smallest_valid_epsilon() -> f32 {
    let mut eps = f32::MIN_POSITIVE.sqrt();
    while !(eps * eps).is_normal() {
        eps = f32::from_bits(eps.to_bits() + 1);
    }
    eps
}

#[test]
fn smallest_epsilon_keeps_stars_finite() {
    let params = SimulationParams {
        singularity_epsilon: smallest_valid_epsilon(),
        ..Default::default()
    };
    assert_eq!(params.validate(), Ok(()));
    let integrator = Integrator::new(&params);

    let eps = params.singularity_epsilon;
    let mut field = ParticleField::from_stars(vec![
        Star::attractor(ATTRACTOR_MASS),
        // Exactly at epsilon the force may overflow f32 and then is skipped
        Star::orbiter(Vec3::new(eps, 0.0, 0.0), Vec3::ZERO, 1.0),
        // Just inside epsilon: coasts
        Star::orbiter(Vec3::new(eps * 0.5, 0.0, 0.0), Vec3::ZERO, 1.0),
        Star::orbiter(Vec3::ZERO, Vec3::ZERO, 1.0),
    ])
    .unwrap();

    integrator.step(&mut field, 1.0e-3);

    for star in field.stars() {
        assert!(star.position.is_finite());
        assert!(star.velocity.is_finite());
    }
    assert_eq!(field.stars()[2].velocity, Vec3::ZERO);
}

#[test]
fn tiny_rejected_epsilon_cannot_be_configured() {
    let params = SimulationParams {
        singularity_epsilon: 1.0e-30,
        ..Default::default()
    };
    assert!(params.validate().is_err());

    // Even if used unvalidated, a star whose r² underflows stays finite
    let integrator = Integrator::new(&params);
    let mut field = ParticleField::from_stars(vec![
        Star::attractor(ATTRACTOR_MASS),
        Star::orbiter(Vec3::new(1.0e-25, 0.0, 0.0), Vec3::ZERO, 1.0),
    ])
    .unwrap();
    integrator.step(&mut field, 1.0);
    assert!(field.stars()[1].position.is_finite());
    assert!(field.stars()[1].velocity.is_finite());
}

#[test]
fn singular_stars_stay_finite_in_a_full_field() {
    let mut stars = large_field(4).stars().to_vec();
    stars.push(Star::orbiter(Vec3::ZERO, Vec3::ZERO, 1.0));
    stars.push(Star::orbiter(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), 0.1));
    let mut field = ParticleField::from_stars(stars).unwrap();

    let integrator = Integrator::default();
    for _ in 0..5 {
        integrator.step(&mut field, 0.1);
    }

    for star in field.stars() {
        assert!(star.position.is_finite());
        assert!(star.velocity.is_finite());
    }
}
