//! Simulation session: owns the particle field and advances it per frame

use galaxy_physics::{FieldGenerator, ParticleField};

use crate::error::ConfigError;
use crate::integrator::Integrator;
use crate::params::{GalaxyConfig, SimulationParams};

/// A running galaxy simulation.
///
/// The field is owned exclusively; it is mutated by [`GalaxySimulation::advance`]
/// and read through [`GalaxySimulation::field`] once the step has finished.
pub struct GalaxySimulation {
    field: ParticleField,
    integrator: Integrator,
    params: SimulationParams,
    elapsed: f64,
    steps: u64,
}

impl GalaxySimulation {
    /// Validate `config` and generate the initial field.
    pub fn initialize(config: &GalaxyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        log::info!("Initializing GalaxySimulation...");
        let generator = FieldGenerator::new(config.generator)?;
        let field = match config.seed {
            Some(seed) => {
                log::info!("  seed: {}", seed);
                generator.generate_seeded(seed)
            }
            None => generator.generate_entropy(),
        };

        log::info!("✓ Generated {} stars (+ attractor)", field.len() - 1);
        log::info!("  mean orbit radius: {:.1}", field.mean_orbit_radius());

        Ok(Self::with_params(field, config.params))
    }

    /// Wrap an existing field.
    pub fn from_field(field: ParticleField, params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::with_params(field, params))
    }

    fn with_params(field: ParticleField, params: SimulationParams) -> Self {
        Self {
            field,
            integrator: Integrator::new(&params),
            params,
            elapsed: 0.0,
            steps: 0,
        }
    }

    /// Advance by one frame. `frame_delta` is wall-clock seconds since the
    /// previous frame; it is clamped to `[0, max_frame_delta]` and scaled by
    /// the simulation speed.
    ///
    /// Returns the simulated time step that was applied.
    pub fn advance(&mut self, frame_delta: f32) -> f32 {
        let frame_delta = if frame_delta.is_finite() {
            frame_delta.clamp(0.0, self.params.max_frame_delta)
        } else {
            0.0
        };
        let dt = frame_delta * self.params.simulation_speed;

        self.integrator.step(&mut self.field, dt);
        self.elapsed += dt as f64;
        self.steps += 1;

        if self.steps % 600 == 0 {
            log::debug!(
                "step {}: t={:.2}, mean orbit radius {:.1}",
                self.steps,
                self.elapsed,
                self.field.mean_orbit_radius()
            );
        }

        dt
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Change the speed multiplier at runtime. Invalid values are ignored.
    pub fn set_simulation_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.params.simulation_speed = speed;
        } else {
            log::warn!("Ignoring invalid simulation speed {speed}");
        }
    }

    /// Total simulated time
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of calls to [`GalaxySimulation::advance`]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn star_count(&self) -> usize {
        self.field.len()
    }
}
