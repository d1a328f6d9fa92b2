//! # Galaxy Physics
//!
//! Particles, attractors and the forces between them, plus the palettes particles are
//! drawn with. Everything here runs on the CPU, one frame at a time.

pub mod attractor;
pub mod color_mode;
pub mod constants;
pub mod forces;
pub mod particle;

pub use attractor::*;
pub use color_mode::*;
pub use constants::*;
pub use forces::*;
pub use particle::*;
