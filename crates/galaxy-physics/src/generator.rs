//! Initial galaxy generation
//!
//! One attractor at the origin plus `star_count` stars scattered uniformly
//! through a cube, with uniform random velocities and normally distributed
//! masses.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

use crate::constants::*;
use crate::error::GeneratorError;
use crate::field::ParticleField;
use crate::particle::Star;

/// Parameters for [`FieldGenerator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of orbiting stars (the attractor is extra)
    pub star_count: usize,
    /// Edge length of the spawn cube, centered on the origin
    pub galaxy_size: f32,
    /// Attractor mass in solar masses
    pub attractor_mass: f32,
    /// Velocity components are drawn from `[-velocity_range, velocity_range]`
    pub velocity_range: f32,
    pub mass_mean: f32,
    pub mass_std_dev: f32,
    /// Sampled masses below this are raised to it
    pub min_mass: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            galaxy_size: GALAXY_SIZE,
            attractor_mass: ATTRACTOR_MASS,
            velocity_range: STAR_VELOCITY_RANGE,
            mass_mean: STAR_MASS_MEAN,
            mass_std_dev: STAR_MASS_STD_DEV,
            min_mass: MIN_STAR_MASS,
        }
    }
}

impl GeneratorConfig {
    pub fn new(star_count: usize, galaxy_size: f32, attractor_mass: f32) -> Self {
        Self {
            star_count,
            galaxy_size,
            attractor_mass,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.star_count == 0 {
            return Err(GeneratorError::NoStars);
        }
        if self.star_count > MAX_STAR_COUNT {
            return Err(GeneratorError::TooManyStars {
                count: self.star_count,
                max: MAX_STAR_COUNT,
            });
        }
        if !(self.galaxy_size.is_finite() && self.galaxy_size > 0.0) {
            return Err(GeneratorError::InvalidGalaxySize(self.galaxy_size));
        }
        if !(self.attractor_mass.is_finite() && self.attractor_mass > 0.0) {
            return Err(GeneratorError::InvalidAttractorMass(self.attractor_mass));
        }
        if !(self.velocity_range.is_finite() && self.velocity_range >= 0.0) {
            return Err(GeneratorError::InvalidVelocityRange(self.velocity_range));
        }
        if !(self.mass_mean.is_finite()
            && self.mass_std_dev.is_finite()
            && self.mass_std_dev >= 0.0)
        {
            return Err(GeneratorError::InvalidMassDistribution {
                mean: self.mass_mean,
                std_dev: self.mass_std_dev,
            });
        }
        if !(self.min_mass.is_finite() && self.min_mass > 0.0) {
            return Err(GeneratorError::InvalidMinMass(self.min_mass));
        }
        Ok(())
    }
}

/// Builds [`ParticleField`]s from a validated [`GeneratorConfig`].
///
/// The random source is always passed in, so tests can use a seeded
/// generator and get the same field every time.
#[derive(Debug, Clone)]
pub struct FieldGenerator {
    config: GeneratorConfig,
    position_dist: Uniform<f32>,
    velocity_dist: Uniform<f32>,
    mass_dist: Normal<f32>,
}

impl FieldGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;

        let half = config.galaxy_size / 2.0;
        let position_dist = Uniform::new_inclusive(-half, half)
            .map_err(|_| GeneratorError::InvalidGalaxySize(config.galaxy_size))?;
        let velocity_dist = Uniform::new_inclusive(-config.velocity_range, config.velocity_range)
            .map_err(|_| GeneratorError::InvalidVelocityRange(config.velocity_range))?;
        let mass_dist = Normal::new(config.mass_mean, config.mass_std_dev).map_err(|_| {
            GeneratorError::InvalidMassDistribution {
                mean: config.mass_mean,
                std_dev: config.mass_std_dev,
            }
        })?;

        Ok(Self {
            config,
            position_dist,
            velocity_dist,
            mass_dist,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a field using `rng` as the only source of randomness.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleField {
        let mut stars = Vec::with_capacity(self.config.star_count + 1);
        stars.push(Star::attractor(self.config.attractor_mass));

        for _ in 0..self.config.star_count {
            let position = Vec3::new(
                self.position_dist.sample(rng),
                self.position_dist.sample(rng),
                self.position_dist.sample(rng),
            );
            let velocity = Vec3::new(
                self.velocity_dist.sample(rng),
                self.velocity_dist.sample(rng),
                self.velocity_dist.sample(rng),
            );
            let mass = self.mass_dist.sample(rng).max(self.config.min_mass);
            stars.push(Star::orbiter(position, velocity, mass));
        }

        log::debug!(
            "Generated {} stars around attractor of mass {:.3e}",
            self.config.star_count,
            self.config.attractor_mass
        );

        ParticleField::from_stars(stars).expect("generated field satisfies invariants")
    }

    /// Generate with a freshly seeded [`StdRng`]. Same seed, same field.
    pub fn generate_seeded(&self, seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    /// Generate with a [`StdRng`] seeded from the operating system.
    pub fn generate_entropy(&self) -> ParticleField {
        let mut rng = StdRng::from_os_rng();
        self.generate(&mut rng)
    }
}

/// Generate a field with default velocity and mass distributions.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    galaxy_size: f32,
    attractor_mass: f32,
    rng: &mut R,
) -> Result<ParticleField, GeneratorError> {
    let generator = FieldGenerator::new(GeneratorConfig::new(count, galaxy_size, attractor_mass))?;
    Ok(generator.generate(rng))
}
