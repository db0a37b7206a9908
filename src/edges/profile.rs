//! Collapse directional gradients to one intensity profile per axis.
use super::{sobel_directional, GradientAxis};
use crate::image::{ImageView, RgbImageF32};

/// Mean absolute gradient per coordinate, one sequence per axis.
#[derive(Clone, Debug)]
pub struct EdgeProfiles {
    /// Per-column mean of |∂/∂x|, length = image width.
    pub columns: Vec<f64>,
    /// Per-row mean of |∂/∂y|, length = image height.
    pub rows: Vec<f64>,
}

/// Compute both axis profiles from a normalized image.
///
/// The image collapses to luminance first; grid lines separate cells of
/// different colors, and a luminance step at a shared column (or row) is
/// what accumulates into a profile maximum.
pub fn edge_profiles(image: &RgbImageF32) -> EdgeProfiles {
    let luma = image.to_luma();
    let gx = sobel_directional(&luma, GradientAxis::Horizontal);
    let gy = sobel_directional(&luma, GradientAxis::Vertical);

    // Accumulate in f64 so column sums are independent of row order.
    let mut columns = vec![0.0f64; luma.w];
    for row in gx.rows() {
        for (acc, &v) in columns.iter_mut().zip(row) {
            *acc += v.abs() as f64;
        }
    }
    let inv_h = 1.0 / luma.h as f64;
    for acc in columns.iter_mut() {
        *acc *= inv_h;
    }

    let inv_w = 1.0 / luma.w as f64;
    let rows = gy
        .rows()
        .map(|row| row.iter().map(|&v| v.abs() as f64).sum::<f64>() * inv_w)
        .collect();

    EdgeProfiles { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two solid color bands split at column 3 of a 6x4 image.
    fn banded_image() -> RgbImageF32 {
        let mut img = RgbImageF32::new(6, 4);
        for y in 0..4 {
            for x in 0..6 {
                let px = if x < 3 {
                    [0.1, 0.1, 0.1]
                } else {
                    [0.8, 0.8, 0.8]
                };
                img.set(x, y, px);
            }
        }
        img
    }

    #[test]
    fn profiles_have_axis_lengths() {
        let profiles = edge_profiles(&banded_image());
        assert_eq!(profiles.columns.len(), 6);
        assert_eq!(profiles.rows.len(), 4);
    }

    #[test]
    fn step_edge_yields_equal_plateau_pair() {
        let profiles = edge_profiles(&banded_image());
        // The 3x3 kernel responds one column either side of the boundary,
        // with exactly equal strength.
        assert!(profiles.columns[2] > 0.0);
        assert_eq!(profiles.columns[2], profiles.columns[3]);
        assert_eq!(profiles.columns[1], 0.0);
        assert_eq!(profiles.columns[4], 0.0);
        // No horizontal boundaries, so the row profile is flat.
        assert!(profiles.rows.iter().all(|&v| v == 0.0));
    }
}
