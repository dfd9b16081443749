//! # Galaxy Physics
//!
//! Star data model, field generation and the single-attractor force law for
//! the galaxy visualization.

pub mod constants;
pub mod error;
pub mod field;
pub mod forces;
pub mod generator;
pub mod particle;

pub use constants::*;
pub use error::*;
pub use field::*;
pub use forces::*;
pub use generator::*;
pub use particle::*;
