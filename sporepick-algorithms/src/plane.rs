//! Least-squares plane fitting for colour point sets

use nalgebra::{DMatrix, DVector, Vector3};
use serde::{Deserialize, Serialize};
use sporepick_core::{ColourTable, Error, Plane, Result};

/// Singular values below this are treated as zero when ranking a system
pub(crate) const RANK_EPS: f64 = 1e-9;

/// Configuration for plane fitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneFitConfig {
    /// Per-channel translation applied before solving; keeps a colour near
    /// the origin from collapsing the least-squares system
    pub offset: f64,
    /// Right-hand side the translated points are solved against
    pub target: f64,
    /// Indices of the samples to fit; `None` fits every sample (a strict,
    /// well-spread subset is usually better conditioned)
    pub selection: Option<Vec<usize>>,
}

impl Default for PlaneFitConfig {
    fn default() -> Self {
        Self {
            offset: -128.0,
            target: 255.0,
            selection: None,
        }
    }
}

/// A fitted plane with its least-squares residual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneFitResult {
    pub plane: Plane,
    /// Euclidean norm of the least-squares residual vector
    pub residual: f64,
}

/// Fit a plane `point · normal = rhs` through the selected colour samples
///
/// The selected points are translated by `offset` per channel, the system
/// `(point + offset) · normal = target` is solved by least squares, and the
/// result is mapped back to untranslated coordinates with a unit normal.
pub fn fit_plane(table: &ColourTable, config: &PlaneFitConfig) -> Result<PlaneFitResult> {
    let indices = resolve_selection(table, config)?;

    let rows = indices.len();
    let mut a = DMatrix::zeros(rows, 3);
    for (row, &idx) in indices.iter().enumerate() {
        let rgb = table[idx].rgb.to_vector();
        for col in 0..3 {
            a[(row, col)] = rgb[col] + config.offset;
        }
    }
    let b = DVector::from_element(rows, config.target);

    let svd = a.clone().svd(true, true);
    let rank = svd.rank(RANK_EPS);
    if rank < 3 {
        return Err(Error::DegenerateFit(format!(
            "plane fit over {rows} samples has rank {rank}, need 3"
        )));
    }
    let solved = svd
        .solve(&b, RANK_EPS)
        .map_err(|e| Error::DegenerateFit(e.to_string()))?;
    let residual = (&a * &solved - &b).norm();

    let normal = Vector3::new(solved[0], solved[1], solved[2]);
    // (p + offset) · n = t  ⇔  p · n = t − offset · Σn
    let rhs = config.target - config.offset * normal.sum();

    let magnitude = normal.norm();
    if magnitude < RANK_EPS {
        return Err(Error::DegenerateFit(
            "fitted normal has zero magnitude".to_string(),
        ));
    }

    Ok(PlaneFitResult {
        plane: Plane::new(normal / magnitude, rhs / magnitude),
        residual,
    })
}

fn resolve_selection(table: &ColourTable, config: &PlaneFitConfig) -> Result<Vec<usize>> {
    let indices = match &config.selection {
        Some(indices) => indices.clone(),
        None => (0..table.len()).collect(),
    };
    if indices.len() < 3 {
        return Err(Error::InvalidData(format!(
            "plane fit needs at least 3 samples, got {}",
            indices.len()
        )));
    }
    for &idx in &indices {
        if idx >= table.len() {
            return Err(Error::InvalidData(format!(
                "selection index {idx} out of range for a table of {}",
                table.len()
            )));
        }
    }
    let mut deduped = indices.clone();
    deduped.sort_unstable();
    deduped.dedup();
    if deduped.len() != indices.len() {
        return Err(Error::InvalidData(
            "selection contains duplicate indices".to_string(),
        ));
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sporepick_core::ColourTable;

    fn table(pairs: &[(&str, [u8; 3])]) -> ColourTable {
        ColourTable::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_fit_three_independent_points() {
        let table = table(&[
            ("black", [0, 0, 0]),
            ("red", [255, 0, 0]),
            ("green", [0, 255, 0]),
        ]);

        let fitted = fit_plane(&table, &PlaneFitConfig::default()).unwrap();

        assert_relative_eq!(fitted.plane.normal.norm(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.residual, 0.0, epsilon = 1e-6);
        // all three points lie on the blue = 0 plane
        for sample in &table {
            assert_relative_eq!(
                fitted.plane.evaluate(&sample.rgb.to_vector()),
                0.0,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let table = table(&[
            ("a", [0, 0, 0]),
            ("b", [10, 10, 10]),
            ("c", [20, 20, 20]),
        ]);

        let result = fit_plane(&table, &PlaneFitConfig::default());
        assert!(matches!(result, Err(Error::DegenerateFit(_))));
    }

    #[test]
    fn test_selection_validation() {
        let table = ColourTable::mycomorphbox();

        let short = PlaneFitConfig {
            selection: Some(vec![0, 1]),
            ..Default::default()
        };
        assert!(matches!(
            fit_plane(&table, &short),
            Err(Error::InvalidData(_))
        ));

        let out_of_range = PlaneFitConfig {
            selection: Some(vec![0, 1, 99]),
            ..Default::default()
        };
        assert!(matches!(
            fit_plane(&table, &out_of_range),
            Err(Error::InvalidData(_))
        ));

        let duplicated = PlaneFitConfig {
            selection: Some(vec![0, 1, 1]),
            ..Default::default()
        };
        assert!(matches!(
            fit_plane(&table, &duplicated),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_fit_over_full_table_is_well_formed() {
        let table = ColourTable::mycomorphbox();
        let fitted = fit_plane(&table, &PlaneFitConfig::default()).unwrap();

        assert_relative_eq!(fitted.plane.normal.norm(), 1.0, epsilon = 1e-9);
        assert!(fitted.residual.is_finite());
    }
}
