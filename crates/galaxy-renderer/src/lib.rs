//! # Galaxy Renderer
//!
//! Mirrors a [`galaxy_physics::ParticleField`] into a GPU vertex buffer and
//! draws every star as a circular point sprite.

pub mod camera;
pub mod error;
pub mod palette;
pub mod renderer;
pub mod shader;
pub mod sprite;
pub mod vertex;

pub use camera::*;
pub use error::*;
pub use palette::*;
pub use renderer::*;
pub use shader::*;
pub use sprite::*;
pub use vertex::*;
