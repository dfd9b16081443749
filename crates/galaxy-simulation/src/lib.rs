//! # Galaxy Simulation
//!
//! Advances a [`galaxy_physics::ParticleField`] through time. Every orbiting
//! star is pulled by the attractor only, so the per-star updates are
//! independent and run data-parallel.

pub mod error;
pub mod integrator;
pub mod params;
pub mod simulation;

pub use error::*;
pub use integrator::*;
pub use params::*;
pub use simulation::*;
