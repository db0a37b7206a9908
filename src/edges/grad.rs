//! Directional image gradients with a 3×3 Sobel kernel.
//!
//! Convolves the selected kernel with border clamping and returns the raw
//! signed response; callers take the absolute value when they need a
//! magnitude. Complexity: O(W·H) per axis; memory: one float plane.
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Axis selector for the directional derivative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientAxis {
    /// ∂/∂x, responds to vertical edges (grid columns).
    Horizontal,
    /// ∂/∂y, responds to horizontal edges (grid rows).
    Vertical,
}

impl GradientAxis {
    fn kernel(self) -> &'static Kernel3 {
        match self {
            GradientAxis::Horizontal => &SOBEL_KERNEL_X,
            GradientAxis::Vertical => &SOBEL_KERNEL_Y,
        }
    }
}

/// Compute the signed Sobel response along one axis of a luminance plane.
pub fn sobel_directional(l: &ImageF32, axis: GradientAxis) -> ImageF32 {
    let w = l.w;
    let h = l.h;
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let kernel = axis.kernel();
    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_row = out.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let k_row = &kernel[ky];
                sum += row[x_idx[0]] * k_row[0]
                    + row[x_idx[1]] * k_row[1]
                    + row[x_idx[2]] * k_row[2];
            }
            out_row[x] = sum;
        }
    }

    out
}
