//! Corner-constrained affine projection fitting
//!
//! Finds the affine map `[r, g, b, 1] · P → (u, v)` that pushes four anchor
//! colours toward the corners of the unit square while every projected sample
//! stays inside it. The goal is "as extreme as the constraints allow", so the
//! problem is a linear program over the matrix entries and the projected
//! coordinates, not a least-squares fit.

use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};
use nalgebra::{Matrix4x2, Point2, Vector3};
use serde::{Deserialize, Serialize};
use sporepick_core::{
    AffineProjection, ColourTable, Corner, CornerAssignment, Error, ReducedPoint, Result, Rgb,
};

/// Which points the unit-square box constraints apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// Box every sample into [0, 1]²; anchors reach their corners only as far
    /// as the other samples' bounds allow
    BoxAllPoints,
    /// Pin the four anchors exactly to their corner coordinates and box only
    /// the remaining samples
    PinAnchors,
}

/// A solved corner projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerFitResult {
    pub projection: AffineProjection,
    /// Every sample's reduced coordinates, in table order
    pub points: Vec<ReducedPoint>,
    /// The solver's objective value; lower means the anchors sit closer to
    /// their corners
    pub objective: f64,
}

impl CornerFitResult {
    /// The four anchors' solved (u, v) paired with their table colours, in
    /// [`Corner::ALL`] order
    pub fn anchor_correspondences(
        &self,
        table: &ColourTable,
        assignment: &CornerAssignment,
    ) -> Result<[(Point2<f64>, Rgb); 4]> {
        let anchors = assignment.resolve(table)?;
        Ok(anchors.map(|idx| (self.points[idx].uv, table[idx].rgb)))
    }
}

/// Solve for the affine projection that extremizes the anchors toward their
/// corners
///
/// Variables are the 8 unbounded affine entries plus one (u, v) pair per
/// sample; sparse equality rows tie each pair to its affine evaluation. The
/// objective carries +1 on an anchor coordinate whose corner target is 0 and
/// −1 where the target is 1, so minimization pushes each anchor outward.
pub fn fit_corner_projection(
    table: &ColourTable,
    assignment: &CornerAssignment,
    policy: BoundsPolicy,
) -> Result<CornerFitResult> {
    if table.len() < 4 {
        return Err(Error::InvalidData(format!(
            "corner projection needs at least 4 samples, got {}",
            table.len()
        )));
    }
    let anchors = assignment.resolve(table)?;

    let mut problem = Problem::new(OptimizationDirection::Minimize);

    // affine entries, row-major over (r, g, b, 1) × (u, v)
    let free = (f64::NEG_INFINITY, f64::INFINITY);
    let matrix_vars: Vec<Variable> = (0..8).map(|_| problem.add_var(0.0, free)).collect();

    let mut coord_vars = Vec::with_capacity(table.len());
    for (idx, sample) in table.iter().enumerate() {
        let target = anchor_target(&anchors, idx);
        let uv = [0usize, 1].map(|axis| {
            let objective = match target {
                Some(t) => {
                    if t[axis] == 0.0 {
                        1.0
                    } else {
                        -1.0
                    }
                }
                None => 0.0,
            };
            let bounds = match (policy, target) {
                (BoundsPolicy::PinAnchors, Some(t)) => (t[axis], t[axis]),
                _ => (0.0, 1.0),
            };
            problem.add_var(objective, bounds)
        });

        let rgb = sample.rgb.to_vector();
        for (axis, &coord) in uv.iter().enumerate() {
            problem.add_constraint(affine_row(&matrix_vars, &rgb, axis, coord), ComparisonOp::Eq, 0.0);
        }
        coord_vars.push(uv);
    }

    let solution = problem
        .solve()
        .map_err(|e| Error::InfeasibleProjection(e.to_string()))?;

    let matrix = Matrix4x2::from_fn(|row, col| solution[matrix_vars[row * 2 + col]]);
    let points = table
        .iter()
        .zip(&coord_vars)
        .map(|(sample, uv)| ReducedPoint {
            name: Some(sample.name.clone()),
            uv: Point2::new(solution[uv[0]], solution[uv[1]]),
        })
        .collect();

    Ok(CornerFitResult {
        projection: AffineProjection { matrix },
        points,
        objective: solution.objective(),
    })
}

/// The corner target assigned to this sample, if it is an anchor
fn anchor_target(anchors: &[usize; 4], idx: usize) -> Option<Point2<f64>> {
    anchors
        .iter()
        .position(|&anchor| anchor == idx)
        .map(|slot| Corner::ALL[slot].target())
}

/// One sparse equality row tying a sample's free coordinate to its affine
/// evaluation: `r·P[0,axis] + g·P[1,axis] + b·P[2,axis] + P[3,axis] − coord = 0`
fn affine_row(
    matrix_vars: &[Variable],
    rgb: &Vector3<f64>,
    axis: usize,
    coord: Variable,
) -> Vec<(Variable, f64)> {
    vec![
        (matrix_vars[axis], rgb.x),
        (matrix_vars[2 + axis], rgb.y),
        (matrix_vars[4 + axis], rgb.z),
        (matrix_vars[6 + axis], 1.0),
        (coord, -1.0),
    ]
}
