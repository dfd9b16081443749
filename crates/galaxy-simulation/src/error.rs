use galaxy_physics::GeneratorError;
use thiserror::Error;

/// Configuration rejected when a simulation is set up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid field configuration: {0}")]
    Generator(#[from] GeneratorError),

    #[error("gravitational constant must be finite and non-negative, got {0}")]
    InvalidGravitationalConstant(f32),

    #[error("singularity epsilon must be finite and positive, got {0}")]
    InvalidSingularityEpsilon(f32),

    #[error("simulation speed must be finite and non-negative, got {0}")]
    InvalidSimulationSpeed(f32),

    #[error("max frame delta must be finite and positive, got {0}")]
    InvalidMaxFrameDelta(f32),
}
