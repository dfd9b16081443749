//! Error types for field construction and generation.

use thiserror::Error;

/// A star list that does not satisfy the field invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The field has no stars at all.
    #[error("particle field is empty")]
    Empty,

    /// Index 0 is not the attractor.
    #[error("first star must be the attractor")]
    MissingAttractor,

    /// An attractor was found somewhere other than index 0.
    #[error("unexpected attractor at index {index}")]
    ExtraAttractor { index: usize },

    /// A star has a non-positive or non-finite mass.
    #[error("star {index} has invalid mass {mass}")]
    InvalidMass { index: usize, mass: f32 },
}

/// Generator configuration rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("star count must be at least 1")]
    NoStars,

    #[error("star count {count} exceeds the maximum of {max}")]
    TooManyStars { count: usize, max: usize },

    #[error("galaxy size must be positive and finite, got {0}")]
    InvalidGalaxySize(f32),

    #[error("attractor mass must be positive and finite, got {0}")]
    InvalidAttractorMass(f32),

    #[error("velocity range must be non-negative and finite, got {0}")]
    InvalidVelocityRange(f32),

    #[error("mass distribution N({mean}, {std_dev}) is invalid")]
    InvalidMassDistribution { mean: f32, std_dev: f32 },

    #[error("minimum star mass must be positive and finite, got {0}")]
    InvalidMinMass(f32),
}
