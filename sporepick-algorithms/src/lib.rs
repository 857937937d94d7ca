//! # sporepick algorithms
//!
//! The geometric and optimization engine behind sporepick colour layouts:
//! least-squares plane fitting, perpendicular projection, background
//! rasterization, corner-constrained affine projection, antiprojection, and
//! triangulated colour-field construction.

pub mod antiproject;
pub mod corners;
pub mod field;
pub mod plane;
pub mod project;
pub mod raster;

pub use antiproject::*;
pub use corners::*;
pub use field::*;
pub use plane::*;
pub use project::*;
pub use raster::*;
