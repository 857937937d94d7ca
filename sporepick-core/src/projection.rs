//! Affine 3D-to-2D projections and reduced-space points

use crate::colour::Rgb;
use crate::error::{Error, Result};
use crate::table::ColourTable;
use nalgebra::{Matrix4x2, Point2, RowVector4, Vector3};
use serde::{Deserialize, Serialize};

/// The four corners of the unit selection square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// (0, 0)
    BottomLeft,
    /// (0, 1)
    TopLeft,
    /// (1, 0)
    BottomRight,
    /// (1, 1)
    TopRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::TopLeft,
        Corner::BottomRight,
        Corner::TopRight,
    ];

    /// Target (u, v) coordinates of this corner
    pub fn target(&self) -> Point2<f64> {
        match self {
            Corner::BottomLeft => Point2::new(0.0, 0.0),
            Corner::TopLeft => Point2::new(0.0, 1.0),
            Corner::BottomRight => Point2::new(1.0, 0.0),
            Corner::TopRight => Point2::new(1.0, 1.0),
        }
    }
}

/// Four sample names, each bound to one corner of the unit square
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerAssignment {
    /// Anchor names in [`Corner::ALL`] order
    names: [String; 4],
}

impl CornerAssignment {
    pub fn new(
        bottom_left: impl Into<String>,
        top_left: impl Into<String>,
        bottom_right: impl Into<String>,
        top_right: impl Into<String>,
    ) -> Self {
        Self {
            names: [
                bottom_left.into(),
                top_left.into(),
                bottom_right.into(),
                top_right.into(),
            ],
        }
    }

    /// The anchor name bound to a corner
    pub fn name(&self, corner: Corner) -> &str {
        &self.names[corner as usize]
    }

    /// Resolve each corner's anchor to its table index, in [`Corner::ALL`]
    /// order
    ///
    /// Fails when a name is missing from the table or one sample is bound to
    /// more than one corner.
    pub fn resolve(&self, table: &ColourTable) -> Result<[usize; 4]> {
        let mut indices = [0usize; 4];
        for (slot, name) in self.names.iter().enumerate() {
            indices[slot] = table.index_of(name).ok_or_else(|| {
                Error::InvalidData(format!("anchor '{name}' is not in the colour table"))
            })?;
        }
        for i in 0..4 {
            for j in (i + 1)..4 {
                if indices[i] == indices[j] {
                    return Err(Error::InvalidData(format!(
                        "anchor '{}' is assigned to more than one corner",
                        self.names[i]
                    )));
                }
            }
        }
        Ok(indices)
    }
}

/// An affine map from homogeneous RGB coordinates to the reduced 2D surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffineProjection {
    /// Rows r, g, b, 1; columns u, v
    pub matrix: Matrix4x2<f64>,
}

impl AffineProjection {
    /// Project real-valued colour coordinates: `[r, g, b, 1] · P`
    pub fn project_vector(&self, rgb: &Vector3<f64>) -> Point2<f64> {
        let uv = RowVector4::new(rgb.x, rgb.y, rgb.z, 1.0) * self.matrix;
        Point2::new(uv[0], uv[1])
    }

    /// Project a colour onto the reduced surface
    pub fn project(&self, rgb: &Rgb) -> Point2<f64> {
        self.project_vector(&rgb.to_vector())
    }
}

/// A sample's position on the reduced selection surface
///
/// Synthetic corner placeholders carry no name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedPoint {
    pub name: Option<String>,
    pub uv: Point2<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_corner_targets() {
        assert_eq!(Corner::BottomLeft.target(), Point2::new(0.0, 0.0));
        assert_eq!(Corner::TopRight.target(), Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_assignment_resolution() {
        let table = ColourTable::mycomorphbox();
        let assignment = CornerAssignment::new("black", "green", "ochre", "white");
        assert_eq!(assignment.resolve(&table).unwrap(), [0, 15, 9, 1]);
        assert_eq!(assignment.name(Corner::TopLeft), "green");
    }

    #[test]
    fn test_assignment_rejects_unknown_and_duplicate_anchors() {
        let table = ColourTable::mycomorphbox();

        let unknown = CornerAssignment::new("black", "green", "ochre", "chartreuse");
        assert!(matches!(
            unknown.resolve(&table),
            Err(Error::InvalidData(_))
        ));

        let duplicated = CornerAssignment::new("black", "green", "green", "white");
        assert!(matches!(
            duplicated.resolve(&table),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_projection_application() {
        // u = r / 255, v = g / 255
        let mut matrix = Matrix4x2::zeros();
        matrix[(0, 0)] = 1.0 / 255.0;
        matrix[(1, 1)] = 1.0 / 255.0;
        let projection = AffineProjection { matrix };

        let uv = projection.project(&Rgb::new(255, 51, 17));
        assert_relative_eq!(uv.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(uv.y, 0.2, epsilon = 1e-12);
    }
}
