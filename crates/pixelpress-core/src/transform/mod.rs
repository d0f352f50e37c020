//! Geometric transforms for drawing onto a surface.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the surface, y grows downwards
//! - Positive rotation angles turn clockwise on screen, as on a 2D canvas
//! - Transforms follow the canvas matrix convention `[a c e; b d f; 0 0 1]`

mod affine;
mod rotation;

pub use affine::Transform2D;
pub use rotation::rotation_radians;
