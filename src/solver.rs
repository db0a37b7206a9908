//! Grid frequency search: how many uniform cells span the peak extent?
//!
//! The scale factor of the input is unknown, so the true cell count is
//! recovered by bounded brute force. Every plausible count `n` defines a
//! hypothesis: `n + 1` evenly spaced grid lines between the first and last
//! peak. A hypothesis is scored by optimally matching observed peaks to
//! hypothesized lines (minimum-cost assignment over absolute distances)
//! and the count with the lowest total cost wins. Only the correct
//! spacing lines up every observed edge with a grid line, so the cost
//! landscape has a sharp minimum at the true count.
//!
//! Ties favor the later (larger) candidate: a sparse hypothesis whose
//! lines form a subset of the true grid also scores a perfect cost, and
//! `<=` selection makes the densest perfect hypothesis win.
use crate::assign::min_cost_assignment;
use crate::grid::linspace;
use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Admissible single-cell pixel widths for the search.
///
/// Unset fields fall back to derived defaults: `pixel_min` becomes the
/// smallest gap between consecutive peaks, `pixel_max` twice that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSizeBounds {
    pub pixel_min: Option<usize>,
    pub pixel_max: Option<usize>,
}

/// The winning hypothesis for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CellCountFit {
    /// Number of uniform cells between the first and last peak.
    pub cells: usize,
    /// Total assignment cost of the winning hypothesis, in pixels.
    pub cost: f64,
}

/// Reasons the frequency search cannot produce a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveError {
    InsufficientPeaks {
        found: usize,
        minimum: usize,
    },
    EmptySearchSpace {
        pixel_min: usize,
        pixel_max: usize,
        width: usize,
    },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::InsufficientPeaks { found, minimum } => {
                write!(f, "insufficient peaks ({found} < {minimum})")
            }
            SolveError::EmptySearchSpace {
                pixel_min,
                pixel_max,
                width,
            } => write!(
                f,
                "empty cell-count search space (cell size {pixel_min}..={pixel_max} px over a {width} px span)"
            ),
        }
    }
}

impl std::error::Error for SolveError {}

const MIN_PEAKS: usize = 2;

/// Search for the cell count that best explains `peaks`.
///
/// `peaks` must be strictly increasing pixel coordinates.
pub fn fit_cell_count(peaks: &[usize], bounds: &CellSizeBounds) -> Result<CellCountFit, SolveError> {
    if peaks.len() < MIN_PEAKS {
        return Err(SolveError::InsufficientPeaks {
            found: peaks.len(),
            minimum: MIN_PEAKS,
        });
    }
    debug_assert!(peaks.windows(2).all(|p| p[0] < p[1]));

    let smallest_gap = peaks
        .windows(2)
        .map(|p| p[1] - p[0])
        .min()
        .expect("at least two peaks");
    let pixel_min = bounds.pixel_min.unwrap_or(smallest_gap);
    let pixel_max = bounds.pixel_max.unwrap_or(2 * pixel_min);

    let first = peaks[0];
    let last = *peaks.last().expect("at least two peaks");
    let width = last - first;

    let empty = SolveError::EmptySearchSpace {
        pixel_min,
        pixel_max,
        width,
    };
    if pixel_min == 0 || pixel_max < pixel_min {
        return Err(empty);
    }

    // Plausible counts for a span of `width`: around width / cell size,
    // one beyond each bound. Counts below 1 cannot form a grid.
    let lower = (width / pixel_max).saturating_sub(1).max(1);
    let upper = width / pixel_min;
    if upper < lower {
        return Err(empty);
    }
    debug!("cell-count search space {lower}..={upper} (cell size {pixel_min}..={pixel_max} px, span {width} px)");

    let candidates: Vec<usize> = (lower..=upper).collect();
    let costs = score_candidates(peaks, first as f64, last as f64, &candidates);

    let mut best: Option<(usize, f64)> = None;
    for (&cells, &cost) in candidates.iter().zip(costs.iter()) {
        // `<=` so later candidates win ties; see the module docs.
        if best.map_or(true, |(_, best_cost)| cost <= best_cost) {
            best = Some((cells, cost));
        }
    }
    let (cells, cost) = best.expect("search space verified non-empty");
    debug!("fitted {cells} cells with assignment cost {cost:.3}");
    Ok(CellCountFit { cells, cost })
}

/// Assignment cost of hypothesizing `cells` uniform intervals over the span.
fn hypothesis_cost(peaks: &[usize], first: f64, last: f64, cells: usize) -> f64 {
    let grid = linspace(first, last, cells + 1);
    let cost = DMatrix::from_fn(peaks.len(), grid.len(), |i, j| {
        (grid[j] - peaks[i] as f64).abs()
    });
    min_cost_assignment(&cost).total_cost
}

#[cfg(not(feature = "parallel"))]
fn score_candidates(peaks: &[usize], first: f64, last: f64, candidates: &[usize]) -> Vec<f64> {
    candidates
        .iter()
        .map(|&cells| hypothesis_cost(peaks, first, last, cells))
        .collect()
}

/// Candidates are scored independently; selection stays sequential, so the
/// result is identical to the serial build.
#[cfg(feature = "parallel")]
fn score_candidates(peaks: &[usize], first: f64, last: f64, candidates: &[usize]) -> Vec<f64> {
    use rayon::prelude::*;

    candidates
        .par_iter()
        .map(|&cells| hypothesis_cost(peaks, first, last, cells))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_grid_count() {
        // Four peaks, 20 px apart: three cells spanning [20, 80].
        let peaks = [20, 40, 60, 80];
        let fit = fit_cell_count(&peaks, &CellSizeBounds::default()).unwrap();
        assert_eq!(fit.cells, 3);
        assert_eq!(fit.cost, 0.0);
    }

    #[test]
    fn densest_perfect_hypothesis_wins_ties() {
        // A single-cell hypothesis [20, 80] also matches two peaks with
        // zero cost; the `<=` rule must still pick the three-cell grid.
        let peaks = [20, 40, 60, 80];
        let bounds = CellSizeBounds {
            pixel_min: Some(20),
            pixel_max: Some(60),
        };
        let fit = fit_cell_count(&peaks, &bounds).unwrap();
        assert_eq!(fit.cells, 3);
        assert_eq!(fit.cost, 0.0);
    }

    #[test]
    fn tolerates_a_missing_interior_peak() {
        // The boundary at 60 never registered; spacing is still 20 px.
        let peaks = [20, 40, 80];
        let fit = fit_cell_count(&peaks, &CellSizeBounds::default()).unwrap();
        assert_eq!(fit.cells, 3);
        assert_eq!(fit.cost, 0.0);
    }

    #[test]
    fn selection_is_deterministic() {
        let peaks = [7, 13, 22, 28, 37, 43];
        let first = fit_cell_count(&peaks, &CellSizeBounds::default()).unwrap();
        for _ in 0..4 {
            let again = fit_cell_count(&peaks, &CellSizeBounds::default()).unwrap();
            assert_eq!(again.cells, first.cells);
            assert_eq!(again.cost, first.cost);
        }
    }

    #[test]
    fn rejects_fewer_than_two_peaks() {
        assert_eq!(
            fit_cell_count(&[42], &CellSizeBounds::default()),
            Err(SolveError::InsufficientPeaks {
                found: 1,
                minimum: 2
            })
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        let bounds = CellSizeBounds {
            pixel_min: Some(30),
            pixel_max: Some(10),
        };
        assert!(matches!(
            fit_cell_count(&[20, 40, 60], &bounds),
            Err(SolveError::EmptySearchSpace { .. })
        ));
    }

    #[test]
    fn rejects_cell_size_beyond_the_span() {
        let bounds = CellSizeBounds {
            pixel_min: Some(100),
            pixel_max: Some(200),
        };
        assert!(matches!(
            fit_cell_count(&[20, 40, 60], &bounds),
            Err(SolveError::EmptySearchSpace { .. })
        ));
    }
}
