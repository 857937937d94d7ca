//! Approximate inverse projection for background-gradient synthesis

use itertools::iproduct;
use nalgebra::{DMatrix, Matrix4, Matrix4x3, Point2, RowVector4, Vector3};
use sporepick_core::{
    AffineProjection, ColourField, ColourTable, Error, Result, Rgb,
};

use crate::plane::RANK_EPS;

/// An approximate inverse of an affine projection: maps reduced (u, v)
/// coordinates back to RGB
///
/// Coefficient rows follow the basis `[u, v, u·v, 1]`. The four-anchor
/// constructor interpolates its correspondences exactly; the least-squares
/// constructors use the affine part only, leaving the bilinear row at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Antiprojection {
    coeffs: Matrix4x3<f64>,
}

impl Antiprojection {
    /// Recover the exactly-determined inverse from four anchor
    /// correspondences
    pub fn from_anchors(correspondences: &[(Point2<f64>, Rgb); 4]) -> Result<Self> {
        let mut design = Matrix4::zeros();
        let mut rhs = Matrix4x3::zeros();
        for (row, (uv, rgb)) in correspondences.iter().enumerate() {
            design.set_row(row, &basis_row(uv));
            rhs.set_row(row, &rgb.to_vector().transpose());
        }

        let svd = design.svd(true, true);
        let rank = svd.rank(RANK_EPS);
        if rank < 4 {
            return Err(Error::DegenerateFit(format!(
                "anchor antiprojection system has rank {rank}, need 4"
            )));
        }
        let coeffs = svd
            .solve(&rhs, RANK_EPS)
            .map_err(|e| Error::DegenerateFit(e.to_string()))?;
        Ok(Self { coeffs })
    }

    /// Least-squares affine inverse over three or more correspondences
    pub fn from_correspondences(correspondences: &[(Point2<f64>, Rgb)]) -> Result<Self> {
        if correspondences.len() < 3 {
            return Err(Error::InvalidData(format!(
                "antiprojection needs at least 3 correspondences, got {}",
                correspondences.len()
            )));
        }

        let rows = correspondences.len();
        let mut design = DMatrix::zeros(rows, 3);
        let mut rhs = DMatrix::zeros(rows, 3);
        for (row, (uv, rgb)) in correspondences.iter().enumerate() {
            design[(row, 0)] = uv.x;
            design[(row, 1)] = uv.y;
            design[(row, 2)] = 1.0;
            let v = rgb.to_vector();
            for col in 0..3 {
                rhs[(row, col)] = v[col];
            }
        }

        let svd = design.svd(true, true);
        let rank = svd.rank(RANK_EPS);
        if rank < 3 {
            return Err(Error::DegenerateFit(format!(
                "antiprojection correspondence system has rank {rank}, need 3"
            )));
        }
        let solved = svd
            .solve(&rhs, RANK_EPS)
            .map_err(|e| Error::DegenerateFit(e.to_string()))?;

        // embed the affine rows into the bilinear layout
        let mut coeffs = Matrix4x3::zeros();
        for col in 0..3 {
            coeffs[(0, col)] = solved[(0, col)];
            coeffs[(1, col)] = solved[(1, col)];
            coeffs[(3, col)] = solved[(2, col)];
        }
        Ok(Self { coeffs })
    }

    /// Least squares over every sample the projection places
    pub fn from_projection(projection: &AffineProjection, table: &ColourTable) -> Result<Self> {
        let correspondences: Vec<(Point2<f64>, Rgb)> = table
            .iter()
            .map(|sample| (projection.project(&sample.rgb), sample.rgb))
            .collect();
        Self::from_correspondences(&correspondences)
    }

    /// Reconstructed colour coordinates at (u, v), unclipped
    pub fn evaluate(&self, u: f64, v: f64) -> Vector3<f64> {
        let row = RowVector4::new(u, v, u * v, 1.0) * self.coeffs;
        Vector3::new(row[0], row[1], row[2])
    }

    /// Reconstructed colour at (u, v), clipped to the byte range
    pub fn colour_at(&self, u: f64, v: f64) -> Rgb {
        Rgb::from_vector_clipped(&self.evaluate(u, v))
    }

    /// Sample the unit square into a background gradient
    ///
    /// Rows sweep u, columns sweep v.
    pub fn gradient_field(&self, resolution: usize) -> Result<ColourField> {
        if resolution < 2 {
            return Err(Error::InvalidData(format!(
                "gradient resolution must be at least 2, got {resolution}"
            )));
        }
        let step = 1.0 / (resolution - 1) as f64;
        let cells = iproduct!(0..resolution, 0..resolution)
            .map(|(i, j)| Some(self.colour_at(i as f64 * step, j as f64 * step)))
            .collect();
        ColourField::from_cells(resolution, cells)
    }
}

fn basis_row(uv: &Point2<f64>) -> RowVector4<f64> {
    RowVector4::new(uv.x, uv.y, uv.x * uv.y, 1.0)
}
