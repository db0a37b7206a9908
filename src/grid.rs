//! Uniform grid construction and extrapolation to the full image extent.
use serde::Serialize;

/// `points` evenly spaced coordinates from `start` to `end` inclusive.
///
/// The last coordinate is pinned to `end` exactly.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i + 1 == points {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// A uniform partition of the detected peak span into `cells` intervals.
///
/// Immutable once selected; the uniform `step` is the inferred source cell
/// size in image pixels.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FittedGrid {
    /// First detected peak coordinate.
    pub start: f64,
    /// Last detected peak coordinate.
    pub end: f64,
    /// Winning cell count between `start` and `end`.
    pub cells: usize,
    /// Derived uniform cell size, `(end - start) / cells`.
    pub step: f64,
}

impl FittedGrid {
    pub fn new(start: f64, end: f64, cells: usize) -> Self {
        debug_assert!(cells >= 1 && end > start);
        Self {
            start,
            end,
            cells,
            step: (end - start) / cells as f64,
        }
    }

    /// The `cells + 1` grid-line coordinates spanning the peak extent.
    pub fn coordinates(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.cells + 1)
    }

    /// Extend the fitted grid to cover the whole axis.
    ///
    /// Extension lines continue with the fitted step, down to (but not
    /// below) 0 and up to (but not exceeding) `axis_len`. Extensions start
    /// one step beyond the fitted endpoints, so nothing is duplicated at
    /// the stitch and the spacing stays uniform throughout.
    pub fn extrapolate(&self, axis_len: usize) -> Vec<f64> {
        let limit = axis_len as f64;

        let mut below = Vec::new();
        let mut k = 1usize;
        loop {
            let coord = self.start - k as f64 * self.step;
            if coord < 0.0 {
                break;
            }
            below.push(coord);
            k += 1;
        }
        below.reverse();

        let mut full = below;
        full.extend(self.coordinates());

        let mut k = 1usize;
        loop {
            let coord = self.end + k as f64 * self.step;
            if coord > limit {
                break;
            }
            full.push(coord);
            k += 1;
        }

        full
    }
}
