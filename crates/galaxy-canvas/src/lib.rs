//! # galaxy-canvas
//!
//! Graphics backend agnostic 2D drawing surface.
//!
//! [`Canvas`] names the handful of primitives the simulation draws with, modelled on the
//! HTML canvas 2D context. [`Painter`] implements it by tessellating into a triangle [`Mesh`];
//! uploading and compositing that mesh is left to backend crates like `galaxy-renderer`.

mod canvas;
mod color;
mod mesh;
mod paint;
mod painter;

pub use canvas::*;
pub use color::*;
pub use mesh::*;
pub use paint::*;
pub use painter::*;
