//! Triangulated colour-field construction for interpolated shading

use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};
use sporepick_core::{
    ColourTable, Corner, CornerAssignment, Error, ReducedPoint, Result, Rgb, TriangulatedField,
};

use crate::antiproject::Antiprojection;
use crate::corners::CornerFitResult;

/// Configuration for field construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// A corner with a real point within this distance counts as occupied
    pub corner_eps: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { corner_eps: 1e-6 }
    }
}

/// Assemble the triangulated colour field behind the reduced points
///
/// Corners with no real occupant receive a synthetic, unnamed point whose
/// colour is extrapolated through the antiprojection of the four anchor
/// correspondences. The union of real and synthetic points is Delaunay
/// triangulated and every vertex keeps its colour for Gouraud shading by the
/// rendering collaborator.
pub fn build_field(
    table: &ColourTable,
    assignment: &CornerAssignment,
    fit: &CornerFitResult,
    config: &FieldConfig,
) -> Result<TriangulatedField> {
    if fit.points.len() != table.len() {
        return Err(Error::InvalidData(format!(
            "fit carries {} points for a table of {}",
            fit.points.len(),
            table.len()
        )));
    }

    let mut points = fit.points.clone();
    let mut colours: Vec<Rgb> = table.iter().map(|sample| sample.rgb).collect();

    let missing: Vec<Corner> = Corner::ALL
        .iter()
        .copied()
        .filter(|corner| {
            let target = corner.target();
            !points
                .iter()
                .any(|p| (p.uv - target).norm() <= config.corner_eps)
        })
        .collect();

    if !missing.is_empty() {
        let anti = Antiprojection::from_anchors(&fit.anchor_correspondences(table, assignment)?)?;
        for corner in missing {
            let target = corner.target();
            points.push(ReducedPoint {
                name: None,
                uv: target,
            });
            colours.push(anti.colour_at(target.x, target.y));
        }
    }

    let triangles = triangulate(&points)?;

    Ok(TriangulatedField {
        points,
        colours,
        triangles,
    })
}

/// Delaunay triangulation of the reduced points, as vertex index triples
fn triangulate(points: &[ReducedPoint]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Err(Error::InvalidData(format!(
            "triangulation needs at least 3 points, got {}",
            points.len()
        )));
    }

    let mut triangulation: DelaunayTriangulation<SpadePoint2<f64>> = DelaunayTriangulation::new();
    for point in points {
        triangulation
            .insert(SpadePoint2::new(point.uv.x, point.uv.y))
            .map_err(|e| Error::InvalidData(format!("triangulation rejected point: {e:?}")))?;
    }

    let mut triangles = Vec::new();
    for face in triangulation.inner_faces() {
        let mut indices = [0usize; 3];
        for (slot, vertex) in face.vertices().iter().enumerate() {
            let position = vertex.position();
            let matched = points.iter().position(|p| {
                (p.uv.x - position.x).abs() < 1e-10 && (p.uv.y - position.y).abs() < 1e-10
            });
            indices[slot] = matched.ok_or_else(|| {
                Error::InvalidData("triangle vertex does not match any input point".to_string())
            })?;
        }
        triangles.push(indices);
    }
    Ok(triangles)
}
