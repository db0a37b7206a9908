//! End-to-end reconstruction pipeline.
//!
//! Chains the stages over immutable inputs: edge profiles from the
//! normalized image, peaks per axis, cell-count fit per axis, grid
//! extrapolation, cell sampling. Every stage is a pure function; the
//! pipeline either completes or reports the first precondition that
//! failed, with no partial output.
use crate::edges::edge_profiles;
use crate::grid::FittedGrid;
use crate::image::RgbImageF32;
use crate::normalize::{normalize, MalformedImage};
use crate::peaks::{find_peaks, PeakParams};
use crate::sample::{downsample_cells, SampleError};
use crate::solver::{fit_cell_count, CellCountFit, CellSizeBounds, SolveError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Knobs for a reconstruction run. The defaults handle clean integer
/// upscales; noisy resamples mostly want a larger peak prominence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructParams {
    /// Peak extraction filters, shared by both axes.
    pub peaks: PeakParams,
    /// Admissible cell sizes for the frequency search, shared by both axes.
    pub cell_bounds: CellSizeBounds,
}

/// Image axis tag used in errors and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Everything the pipeline learned about one axis.
#[derive(Clone, Debug, Serialize)]
pub struct AxisFit {
    /// Detected peak coordinates, strictly increasing.
    pub peaks: Vec<usize>,
    /// Winning cell count and its assignment cost.
    pub fit: CellCountFit,
    /// Uniform grid over the peak span.
    pub fitted: FittedGrid,
    /// The fitted grid extrapolated to the full axis.
    pub full_grid: Vec<f64>,
}

/// A completed reconstruction.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// One pixel per inferred grid cell.
    pub image: RgbImageF32,
    /// Horizontal-axis fit (column boundaries).
    pub x: AxisFit,
    /// Vertical-axis fit (row boundaries).
    pub y: AxisFit,
    /// Serializable run summary.
    pub report: ReconstructReport,
}

/// Run summary with per-stage timings, written alongside tool output.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructReport {
    pub input_width: usize,
    pub input_height: usize,
    pub output_width: usize,
    pub output_height: usize,
    pub peaks_x: usize,
    pub peaks_y: usize,
    pub cell_step_x: f64,
    pub cell_step_y: f64,
    pub fit_cost_x: f64,
    pub fit_cost_y: f64,
    pub profile_ms: f64,
    pub peaks_ms: f64,
    pub fit_ms: f64,
    pub sample_ms: f64,
    pub total_ms: f64,
}

/// Reconstruction failures; all fail fast and propagate to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReconstructError {
    /// The input image was rejected at normalization.
    Malformed(MalformedImage),
    /// One axis could not be fitted to a uniform grid.
    GridFit { axis: Axis, source: SolveError },
    /// A grid cell mapped to an empty pixel region.
    Sample(SampleError),
}

impl std::fmt::Display for ReconstructError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconstructError::Malformed(e) => write!(f, "malformed input image: {e}"),
            ReconstructError::GridFit { axis, source } => {
                write!(f, "{axis}-axis grid fit failed: {source}")
            }
            ReconstructError::Sample(e) => write!(f, "cell sampling failed: {e}"),
        }
    }
}

impl std::error::Error for ReconstructError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconstructError::Malformed(e) => Some(e),
            ReconstructError::GridFit { source, .. } => Some(source),
            ReconstructError::Sample(e) => Some(e),
        }
    }
}

impl From<MalformedImage> for ReconstructError {
    fn from(e: MalformedImage) -> Self {
        ReconstructError::Malformed(e)
    }
}

impl From<SampleError> for ReconstructError {
    fn from(e: SampleError) -> Self {
        ReconstructError::Sample(e)
    }
}

/// Infer the pixel grid of a normalized image and reconstruct the source.
pub fn reconstruct(
    image: &RgbImageF32,
    params: &ReconstructParams,
) -> Result<Reconstruction, ReconstructError> {
    let total_start = Instant::now();

    let profile_start = Instant::now();
    let profiles = edge_profiles(image);
    let profile_ms = profile_start.elapsed().as_secs_f64() * 1000.0;

    let peaks_start = Instant::now();
    let peaks_x = find_peaks(&profiles.columns, &params.peaks);
    let peaks_y = find_peaks(&profiles.rows, &params.peaks);
    let peaks_ms = peaks_start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "detected {} x-axis and {} y-axis peaks",
        peaks_x.len(),
        peaks_y.len()
    );

    let fit_start = Instant::now();
    let x = fit_axis(Axis::X, peaks_x, image.w, &params.cell_bounds)?;
    let y = fit_axis(Axis::Y, peaks_y, image.h, &params.cell_bounds)?;
    let fit_ms = fit_start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "fitted grid: {} x {} cells, step {:.2} x {:.2} px",
        x.full_grid.len() - 1,
        y.full_grid.len() - 1,
        x.fitted.step,
        y.fitted.step
    );

    let sample_start = Instant::now();
    let output = downsample_cells(image, &y.full_grid, &x.full_grid)?;
    let sample_ms = sample_start.elapsed().as_secs_f64() * 1000.0;

    let report = ReconstructReport {
        input_width: image.w,
        input_height: image.h,
        output_width: output.w,
        output_height: output.h,
        peaks_x: x.peaks.len(),
        peaks_y: y.peaks.len(),
        cell_step_x: x.fitted.step,
        cell_step_y: y.fitted.step,
        fit_cost_x: x.fit.cost,
        fit_cost_y: y.fit.cost,
        profile_ms,
        peaks_ms,
        fit_ms,
        sample_ms,
        total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
    };

    Ok(Reconstruction {
        image: output,
        x,
        y,
        report,
    })
}

/// Normalize a decoded image, then reconstruct.
pub fn reconstruct_dynamic(
    image: &image::DynamicImage,
    params: &ReconstructParams,
) -> Result<Reconstruction, ReconstructError> {
    let normalized = normalize(image)?;
    reconstruct(&normalized, params)
}

fn fit_axis(
    axis: Axis,
    peaks: Vec<usize>,
    axis_len: usize,
    bounds: &CellSizeBounds,
) -> Result<AxisFit, ReconstructError> {
    let fit = fit_cell_count(&peaks, bounds)
        .map_err(|source| ReconstructError::GridFit { axis, source })?;
    let first = peaks[0] as f64;
    let last = *peaks.last().expect("fit requires two peaks") as f64;
    let fitted = FittedGrid::new(first, last, fit.cells);
    let full_grid = fitted.extrapolate(axis_len);
    Ok(AxisFit {
        peaks,
        fit,
        fitted,
        full_grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 cells of alternating brightness, each `scale` px square.
    fn synthetic(scale: usize) -> RgbImageF32 {
        let colors = [
            [0.1, 0.1, 0.1],
            [0.8, 0.8, 0.8],
            [0.2, 0.2, 0.2],
            [0.7, 0.7, 0.7],
            [0.15, 0.15, 0.15],
            [0.75, 0.75, 0.75],
            [0.25, 0.25, 0.25],
            [0.85, 0.85, 0.85],
            [0.12, 0.12, 0.12],
        ];
        let size = 3 * scale;
        let mut img = RgbImageF32::new(size, size);
        for y in 0..size {
            for x in 0..size {
                img.set(x, y, colors[(y / scale) * 3 + x / scale]);
            }
        }
        img
    }

    #[test]
    fn reconstructs_a_clean_upscale() {
        let img = synthetic(16);
        let result = reconstruct(&img, &ReconstructParams::default()).unwrap();
        assert_eq!((result.image.w, result.image.h), (3, 3));
        let source = synthetic(1);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(result.image.get(x, y), source.get(x, y));
            }
        }
        assert_eq!(result.report.output_width, 3);
        assert_eq!(result.x.fit.cost, 0.0);
    }

    #[test]
    fn flat_image_reports_the_failing_axis() {
        let mut img = RgbImageF32::new(32, 32);
        img.data.fill(0.5);
        let err = reconstruct(&img, &ReconstructParams::default()).unwrap_err();
        assert_eq!(
            err,
            ReconstructError::GridFit {
                axis: Axis::X,
                source: SolveError::InsufficientPeaks {
                    found: 0,
                    minimum: 2
                }
            }
        );
    }
}
