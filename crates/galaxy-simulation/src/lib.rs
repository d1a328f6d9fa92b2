//! # Galaxy Simulation
//!
//! The controller that owns every particle and attractor, advances them once per frame
//! and draws the result onto a [`galaxy_canvas::Canvas`].

pub mod command;
pub mod connections;
pub mod galaxy;
pub mod settings;

pub use command::*;
pub use connections::*;
pub use galaxy::*;
pub use settings::*;
