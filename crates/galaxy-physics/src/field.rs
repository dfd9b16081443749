//! The particle field: attractor at index 0 followed by every orbiting star

use crate::error::FieldError;
use crate::particle::Star;

/// All simulated bodies at one point in time.
///
/// Invariants, checked by [`ParticleField::from_stars`]:
/// - at least one star
/// - index 0 is the attractor and nothing else is
/// - every mass is positive and finite
///
/// The length never changes once built. Only positions and velocities are
/// writable, and only through `&mut self`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    stars: Vec<Star>,
}

impl ParticleField {
    pub fn from_stars(stars: Vec<Star>) -> Result<Self, FieldError> {
        let first = stars.first().ok_or(FieldError::Empty)?;
        if !first.is_attractor() {
            return Err(FieldError::MissingAttractor);
        }

        for (index, star) in stars.iter().enumerate() {
            if index > 0 && star.is_attractor() {
                return Err(FieldError::ExtraAttractor { index });
            }
            let mass = star.mass();
            if !(mass.is_finite() && mass > 0.0) {
                return Err(FieldError::InvalidMass { index, mass });
            }
        }

        Ok(Self { stars })
    }

    /// A field holding only the attractor.
    pub fn attractor_only(mass: f32) -> Result<Self, FieldError> {
        Self::from_stars(vec![Star::attractor(mass)])
    }

    pub fn attractor(&self) -> &Star {
        &self.stars[0]
    }

    /// Every star, attractor first
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Every star except the attractor
    pub fn orbiters(&self) -> &[Star] {
        &self.stars[1..]
    }

    /// Total number of stars including the attractor.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Always false; a field holds at least the attractor.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Borrow the attractor immutably and the orbiters mutably.
    ///
    /// The two borrows are disjoint, so orbiters can be updated in parallel
    /// while every worker reads the same attractor.
    pub fn split_attractor_mut(&mut self) -> (&Star, &mut [Star]) {
        let (attractor, orbiters) = self
            .stars
            .split_first_mut()
            .expect("field always holds the attractor");
        (&*attractor, orbiters)
    }

    /// Mean distance of the orbiters from the attractor. Zero for an
    /// attractor-only field.
    pub fn mean_orbit_radius(&self) -> f32 {
        let orbiters = self.orbiters();
        if orbiters.is_empty() {
            return 0.0;
        }
        let center = self.attractor().position;
        let total: f64 = orbiters
            .iter()
            .map(|s| s.position.distance(center) as f64)
            .sum();
        (total / orbiters.len() as f64) as f32
    }
}
