//! Perpendicular projection of colour points onto a plane

use nalgebra::Vector3;
use sporepick_core::{ColourTable, Plane};

/// Project a single point onto the plane along its normal
///
/// Standard point-and-normal projection: subtract the plane's reference
/// point, remove the component along the normal, add the reference back.
pub fn project_point(plane: &Plane, point: &Vector3<f64>) -> Vector3<f64> {
    let reference = plane.reference_point();
    let v = point - reference;
    let n = &plane.normal;
    reference + v - n * (v.dot(n) / n.dot(n))
}

/// Project points onto the plane along its normal
pub fn project_points(plane: &Plane, points: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    points.iter().map(|p| project_point(plane, p)).collect()
}

/// Project every sample of a colour table onto the plane, in table order
pub fn project_table(plane: &Plane, table: &ColourTable) -> Vec<Vector3<f64>> {
    table
        .iter()
        .map(|sample| project_point(plane, &sample.rgb.to_vector()))
        .collect()
}
