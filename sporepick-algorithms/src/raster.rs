//! Dense background sampling of a fitted plane over the green/blue grid

use itertools::iproduct;
use nalgebra::Vector3;
use sporepick_core::{ColourField, Error, Plane, Result, Rgb};

/// Sample positions spanning [0, 255] inclusive
fn channel_axis(resolution: usize) -> Vec<f64> {
    (0..resolution)
        .map(|i| 255.0 * i as f64 / (resolution - 1) as f64)
        .collect()
}

/// Rasterize the plane into a colour field over the (green, blue) grid
///
/// Rows sweep green, columns sweep blue; the red channel is solved from the
/// plane equation and cells whose solved red falls outside [0, 255] are
/// masked.
pub fn rasterize_plane(plane: &Plane, resolution: usize) -> Result<ColourField> {
    if resolution < 2 {
        return Err(Error::InvalidData(format!(
            "grid resolution must be at least 2, got {resolution}"
        )));
    }

    let axis = channel_axis(resolution);
    let cells = iproduct!(&axis, &axis)
        .map(|(&green, &blue)| {
            let red = plane.red_for(green, blue);
            (0.0..=255.0)
                .contains(&red)
                .then(|| Rgb::from_vector_clipped(&Vector3::new(red, green, blue)))
        })
        .collect();

    ColourField::from_cells(resolution, cells)
}
