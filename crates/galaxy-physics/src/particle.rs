//! Star type for the galaxy simulation

use glam::Vec3;

use crate::constants::{ATTRACTOR_SIZE, STAR_BASE_SIZE, STAR_SIZE_PER_MASS};

/// A single body in the galaxy.
///
/// Position and velocity are public because the integrator rewrites them every
/// frame. Mass, size and the attractor flag are fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Position in light-years
    pub position: Vec3,
    /// Velocity in light-years per time step
    pub velocity: Vec3,
    mass: f32,
    size: f32,
    is_attractor: bool,
}

impl Star {
    /// Create the central attractor at the origin, at rest.
    pub fn attractor(mass: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass,
            size: ATTRACTOR_SIZE,
            is_attractor: true,
        }
    }

    /// Create an orbiting star. Its visual size follows from its mass.
    pub fn orbiter(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
            size: visual_size(mass),
            is_attractor: false,
        }
    }

    /// Mass in solar masses
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Point sprite size, only used for rendering
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_attractor(&self) -> bool {
        self.is_attractor
    }
}

/// Visual size of an orbiting star of the given mass.
pub fn visual_size(mass: f32) -> f32 {
    STAR_BASE_SIZE + mass * STAR_SIZE_PER_MASS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attractor_at_rest_at_origin() {
        let star = Star::attractor(10.0);
        assert!(star.is_attractor());
        assert_eq!(star.position, Vec3::ZERO);
        assert_eq!(star.velocity, Vec3::ZERO);
        assert_eq!(star.size(), ATTRACTOR_SIZE);
    }

    #[test]
    fn test_heavier_stars_render_larger() {
        let light = Star::orbiter(Vec3::X, Vec3::ZERO, 0.5);
        let heavy = Star::orbiter(Vec3::X, Vec3::ZERO, 2.0);
        assert!(!light.is_attractor());
        assert!(heavy.size() > light.size());
        assert_eq!(light.size(), 2.25);
    }
}
