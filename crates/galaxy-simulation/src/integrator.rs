//! Semi-implicit Euler integration of every orbiting star
//!
//! Per star: velocity += F / m * dt, then position += velocity * dt, with F
//! the attractor's pull. The attractor itself never moves.
//!
//! Concurrency: during a step the attractor is read-only and each worker
//! writes only the star it owns, so stars can be processed in any order and
//! on any thread. The result does not depend on the schedule.

use galaxy_physics::{attractor_force, ParticleField, Star};
use rayon::prelude::*;

use crate::params::SimulationParams;

/// Below this many orbiters the step runs on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    gravitational_constant: f32,
    singularity_epsilon: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(&SimulationParams::default())
    }
}

impl Integrator {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            gravitational_constant: params.gravitational_constant,
            singularity_epsilon: params.singularity_epsilon,
        }
    }

    /// Advance every orbiter by `dt`, in parallel for large fields.
    pub fn step(&self, field: &mut ParticleField, dt: f32) {
        let Some(dt) = sanitize_dt(dt) else {
            return;
        };

        let (attractor, orbiters) = field.split_attractor_mut();
        if orbiters.len() < PARALLEL_THRESHOLD {
            orbiters
                .iter_mut()
                .for_each(|star| self.integrate_star(attractor, star, dt));
        } else {
            orbiters
                .par_iter_mut()
                .for_each(|star| self.integrate_star(attractor, star, dt));
        }
    }

    /// Same update as [`Integrator::step`], always on the calling thread.
    pub fn step_serial(&self, field: &mut ParticleField, dt: f32) {
        let Some(dt) = sanitize_dt(dt) else {
            return;
        };

        let (attractor, orbiters) = field.split_attractor_mut();
        for star in orbiters {
            self.integrate_star(attractor, star, dt);
        }
    }

    #[inline]
    fn integrate_star(&self, attractor: &Star, star: &mut Star, dt: f32) {
        if let Some(force) = attractor_force(
            attractor,
            star,
            self.gravitational_constant,
            self.singularity_epsilon,
        ) {
            star.velocity += force / star.mass() * dt;
        }
        star.position += star.velocity * dt;
    }
}

/// `None` for a step that must not change anything.
fn sanitize_dt(dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring invalid time step {dt}");
        return None;
    }
    if dt == 0.0 {
        return None;
    }
    Some(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_physics::{FieldGenerator, GeneratorConfig};
    use glam::Vec3;

    fn field_with(star: Star) -> ParticleField {
        ParticleField::from_stars(vec![Star::attractor(4.154e6), star]).unwrap()
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let generator = FieldGenerator::new(GeneratorConfig::new(100, 1000.0, 4.154e6)).unwrap();
        let mut field = generator.generate_seeded(5);
        let before = field.clone();
        Integrator::default().step(&mut field, 0.0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mut field = field_with(Star::orbiter(Vec3::X, Vec3::Y, 1.0));
        let before = field.clone();
        let integrator = Integrator::default();
        integrator.step(&mut field, -1.0);
        integrator.step(&mut field, f32::NAN);
        integrator.step(&mut field, f32::INFINITY);
        assert_eq!(field, before);
    }

    #[test]
    fn test_star_at_rest_falls_inward() {
        let params = SimulationParams {
            gravitational_constant: 1.0,
            ..Default::default()
        };
        let integrator = Integrator::new(&params);
        let start = Vec3::new(3.0, -4.0, 0.0);
        let mut field = ParticleField::from_stars(vec![
            Star::attractor(1.0),
            Star::orbiter(start, Vec3::ZERO, 1.0),
        ])
        .unwrap();

        integrator.step(&mut field, 0.1);

        let star = field.stars()[1];
        let towards_attractor = -start;
        assert!(star.velocity.dot(towards_attractor) > 0.0);
        assert!(star.position.length() < start.length());
    }

    #[test]
    fn test_velocity_update_matches_formula() {
        let params = SimulationParams {
            gravitational_constant: 2.0,
            ..Default::default()
        };
        let integrator = Integrator::new(&params);
        let mut field = ParticleField::from_stars(vec![
            Star::attractor(50.0),
            Star::orbiter(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 3.0),
        ])
        .unwrap();

        integrator.step(&mut field, 0.5);

        // a = G * M / r² = 2 * 50 / 100 = 1, dv = a * dt = 0.5
        let star = field.stars()[1];
        assert!((star.velocity.z + 0.5).abs() < 1e-6);
        assert!((star.position.z - 9.75).abs() < 1e-5);
    }

    #[test]
    fn test_attractor_never_moves() {
        let generator = FieldGenerator::new(GeneratorConfig::new(200, 500.0, 1.0e6)).unwrap();
        let mut field = generator.generate_seeded(9);
        let attractor = *field.attractor();
        let integrator = Integrator::default();
        for _ in 0..10 {
            integrator.step(&mut field, 0.1);
        }
        assert_eq!(*field.attractor(), attractor);
    }

    #[test]
    fn test_star_on_attractor_stays_finite() {
        let mut field = field_with(Star::orbiter(Vec3::ZERO, Vec3::ZERO, 1.0));
        Integrator::default().step(&mut field, 1.0);
        let star = field.stars()[1];
        assert!(star.position.is_finite());
        assert!(star.velocity.is_finite());
        assert_eq!(star.position, Vec3::ZERO);
    }

    #[test]
    fn test_star_inside_epsilon_coasts() {
        let velocity = Vec3::new(1.0, 0.0, 0.0);
        let mut field = field_with(Star::orbiter(Vec3::splat(1.0e-4), velocity, 1.0));
        Integrator::default().step(&mut field, 0.5);
        let star = field.stars()[1];
        assert_eq!(star.velocity, velocity);
        assert!((star.position.x - (1.0e-4 + 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_attractor_only_field() {
        let mut field = ParticleField::attractor_only(1.0).unwrap();
        Integrator::default().step(&mut field, 1.0);
        assert_eq!(field.len(), 1);
    }
}
