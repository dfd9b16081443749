//! Simulation parameters and the top-level galaxy configuration

use galaxy_physics::{GeneratorConfig, G, SINGULARITY_EPSILON};

use crate::error::ConfigError;

/// Tunables for the integrator and the frame-to-simulation time mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub gravitational_constant: f32,
    /// Stars closer than this to the attractor get no gravity for the step
    pub singularity_epsilon: f32,
    /// Simulated time per wall-clock second ("years per second")
    pub simulation_speed: f32,
    /// Wall-clock deltas are clamped to this before scaling, in seconds
    pub max_frame_delta: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            singularity_epsilon: SINGULARITY_EPSILON,
            simulation_speed: 1.0,
            max_frame_delta: 0.1,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = self.gravitational_constant;
        if !(g.is_finite() && g >= 0.0) {
            return Err(ConfigError::InvalidGravitationalConstant(g));
        }
        // eps² must stay a normal f32 so that r² >= eps² never rounds to zero
        let eps = self.singularity_epsilon;
        if !(eps.is_finite() && eps > 0.0 && (eps * eps).is_normal()) {
            return Err(ConfigError::InvalidSingularityEpsilon(eps));
        }
        let speed = self.simulation_speed;
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(ConfigError::InvalidSimulationSpeed(speed));
        }
        let max_dt = self.max_frame_delta;
        if !(max_dt.is_finite() && max_dt > 0.0) {
            return Err(ConfigError::InvalidMaxFrameDelta(max_dt));
        }
        Ok(())
    }
}

/// Everything needed to start a galaxy simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GalaxyConfig {
    pub generator: GeneratorConfig,
    pub params: SimulationParams,
    /// Fixed seed for reproducible fields; `None` draws from entropy
    pub seed: Option<u64>,
}

impl GalaxyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.params.validate()
    }
}
