//! Physical and visual constants for the galaxy simulation
//!
//! Units are loose on purpose: distances are "light-years", masses are solar
//! masses and time is whatever the frame loop feeds in. The numbers only need
//! to produce a plausible-looking galaxy.

/// Gravitational constant
pub const G: f32 = 6.674e-11;

/// Mass of the central attractor (Sagittarius A*), in solar masses
pub const ATTRACTOR_MASS: f32 = 4.154e6;

/// Edge length of the cube stars are scattered in
pub const GALAXY_SIZE: f32 = 100_000.0;

/// Default number of orbiting stars
pub const STAR_COUNT: usize = 1_000_000;

/// Largest number of orbiting stars a generator accepts
pub const MAX_STAR_COUNT: usize = 1 << 24;

/// Initial velocity components are drawn from `[-STAR_VELOCITY_RANGE, STAR_VELOCITY_RANGE]`
pub const STAR_VELOCITY_RANGE: f32 = 100.0;

/// Mean of the star mass distribution
pub const STAR_MASS_MEAN: f32 = 1.0;

/// Standard deviation of the star mass distribution
pub const STAR_MASS_STD_DEV: f32 = 0.5;

/// Floor applied to sampled masses so that `mass > 0` always holds
pub const MIN_STAR_MASS: f32 = 0.1;

/// Below this separation the attractor exerts no force on a star
pub const SINGULARITY_EPSILON: f32 = 1.0e-3;

// Sizes for visualization (point sprite pixels at unit depth)
/// Attractor size
pub const ATTRACTOR_SIZE: f32 = 20.0;

/// Base size of an orbiting star
pub const STAR_BASE_SIZE: f32 = 2.0;

/// Extra size per solar mass
pub const STAR_SIZE_PER_MASS: f32 = 0.5;
