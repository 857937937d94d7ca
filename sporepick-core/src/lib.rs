//! Core data structures for sporepick
//!
//! This crate provides the fundamental types for laying out named colour
//! samples on a flat selection surface: colour values and tables, fitted
//! planes, affine 3D-to-2D projections, reduced-space points, and sampled
//! colour fields.

pub mod colour;
pub mod error;
pub mod field;
pub mod plane;
pub mod projection;
pub mod table;

pub use colour::*;
pub use error::*;
pub use field::*;
pub use plane::*;
pub use projection::*;
pub use table::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4x2, Point2, Vector3};
