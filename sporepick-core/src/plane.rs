//! Plane of best fit representation

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A 3D plane in `point · normal = rhs` form
///
/// Planes produced by the fitter carry a unit-magnitude normal; the helpers
/// below assume that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub rhs: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, rhs: f64) -> Self {
        Self { normal, rhs }
    }

    /// Signed residual of a point against the plane equation
    pub fn evaluate(&self, point: &Vector3<f64>) -> f64 {
        point.dot(&self.normal) - self.rhs
    }

    /// Solve the plane equation for red at the given green/blue coordinates
    pub fn red_for(&self, green: f64, blue: f64) -> f64 {
        (self.rhs - self.normal.y * green - self.normal.z * blue) / self.normal.x
    }

    /// A reference point on the plane, taken along the red axis
    pub fn reference_point(&self) -> Vector3<f64> {
        Vector3::new(self.rhs / self.normal.x, 0.0, 0.0)
    }
}
