//! Gravitational pull of the attractor on a single star
//!
//! Each star only feels the attractor. Stars do not interact with each other.

use glam::Vec3;

use crate::particle::Star;

/// Force exerted by `attractor` on `star`.
/// F = G * M * m / r², directed from the star towards the attractor.
///
/// Returns `None` when the separation is below `epsilon` or the force does
/// not fit in an `f32`: the direction is undefined near the attractor and the
/// magnitude diverges, so the caller skips the velocity update for that star.
pub fn attractor_force(attractor: &Star, star: &Star, g: f32, epsilon: f32) -> Option<Vec3> {
    let r_vec = attractor.position - star.position;
    let r = r_vec.length();

    if r.is_nan() || r < epsilon {
        return None;
    }

    let force_magnitude = g * attractor.mass() * star.mass() / (r * r);
    let force = r_vec / r * force_magnitude;
    force.is_finite().then_some(force)
}
