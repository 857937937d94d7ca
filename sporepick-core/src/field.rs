//! Sampled colour fields and triangulated shading data

use crate::colour::Rgb;
use crate::error::{Error, Result};
use crate::projection::ReducedPoint;
use serde::{Deserialize, Serialize};

/// A row-major 2D grid of optional colours; `None` cells are masked
///
/// Producers document their axes: the plane rasterizer sweeps (green, blue),
/// the antiprojector sweeps (u, v).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourField {
    resolution: usize,
    cells: Vec<Option<Rgb>>,
}

impl ColourField {
    /// Assemble a field from row-major cells
    pub fn from_cells(resolution: usize, cells: Vec<Option<Rgb>>) -> Result<Self> {
        if cells.len() != resolution * resolution {
            return Err(Error::InvalidData(format!(
                "field of resolution {} needs {} cells, got {}",
                resolution,
                resolution * resolution,
                cells.len()
            )));
        }
        Ok(Self { resolution, cells })
    }

    /// Samples per axis
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The cell at (row, col); `None` when masked or out of range
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        self.cells[row * self.resolution + col]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Option<Rgb>] {
        &self.cells
    }

    /// Number of masked cells
    pub fn masked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

/// Triangulated reduced points with per-vertex colours for Gouraud shading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangulatedField {
    /// Real samples in table order, then synthetic corner placeholders
    pub points: Vec<ReducedPoint>,
    /// One colour per point
    pub colours: Vec<Rgb>,
    /// Vertex index triples into `points`
    pub triangles: Vec<[usize; 3]>,
}

impl TriangulatedField {
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// The three vertex colours of a triangle, in index order
    pub fn triangle_colours(&self, triangle: usize) -> [Rgb; 3] {
        self.triangles[triangle].map(|idx| self.colours[idx])
    }

    /// Number of synthetic (unnamed) corner placeholders
    pub fn synthetic_count(&self) -> usize {
        self.points.iter().filter(|p| p.name.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_field_indexing_and_masking() {
        let cells = vec![
            Some(Rgb::new(1, 2, 3)),
            None,
            None,
            Some(Rgb::new(4, 5, 6)),
        ];
        let field = ColourField::from_cells(2, cells).unwrap();

        assert_eq!(field.resolution(), 2);
        assert_eq!(field.get(0, 0), Some(Rgb::new(1, 2, 3)));
        assert_eq!(field.get(0, 1), None);
        assert_eq!(field.get(1, 1), Some(Rgb::new(4, 5, 6)));
        assert_eq!(field.get(2, 0), None);
        assert_eq!(field.masked_count(), 2);
    }

    #[test]
    fn test_field_rejects_wrong_cell_count() {
        assert!(ColourField::from_cells(3, vec![None; 8]).is_err());
    }

    #[test]
    fn test_triangle_colours_and_synthetic_count() {
        let field = TriangulatedField {
            points: vec![
                ReducedPoint {
                    name: Some("black".to_string()),
                    uv: Point2::new(0.0, 0.0),
                },
                ReducedPoint {
                    name: Some("white".to_string()),
                    uv: Point2::new(1.0, 1.0),
                },
                ReducedPoint {
                    name: None,
                    uv: Point2::new(1.0, 0.0),
                },
            ],
            colours: vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(9, 9, 9)],
            triangles: vec![[0, 1, 2]],
        };

        assert_eq!(field.vertex_count(), 3);
        assert_eq!(field.triangle_count(), 1);
        assert_eq!(field.synthetic_count(), 1);
        assert_eq!(
            field.triangle_colours(0),
            [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(9, 9, 9)]
        );
    }
}
