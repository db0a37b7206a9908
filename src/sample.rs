//! Per-cell color aggregation into the reconstructed image.
//!
//! Each output pixel is the per-channel median of the source pixels inside
//! one grid cell. Continuous cell boundaries map to discrete indices with
//! inclusive `ceil(lo) ..= floor(hi)` bounds, the upper index clamped to
//! the image extent. The median ignores resampling ringing near the cell
//! borders that a mean would smear into the result.
use crate::image::{rgb::CHANNELS, RgbImageF32};

/// Sampling failures; each cell must contain at least one source pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleError {
    /// The rounded sub-region of cell (`row`, `col`) contains no pixels.
    EmptyCellRegion { row: usize, col: usize },
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::EmptyCellRegion { row, col } => {
                write!(f, "cell ({row}, {col}) maps to an empty pixel region")
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// Downsample `image` to one pixel per grid cell.
///
/// `row_grid` and `col_grid` are the full grids for the vertical and
/// horizontal axes: strictly increasing boundary coordinates within the
/// image extent, at least two each.
pub fn downsample_cells(
    image: &RgbImageF32,
    row_grid: &[f64],
    col_grid: &[f64],
) -> Result<RgbImageF32, SampleError> {
    debug_assert!(row_grid.len() >= 2 && col_grid.len() >= 2);
    debug_assert!(row_grid.windows(2).all(|p| p[0] < p[1]));
    debug_assert!(col_grid.windows(2).all(|p| p[0] < p[1]));

    let out_h = row_grid.len() - 1;
    let out_w = col_grid.len() - 1;

    let rows = sample_rows(image, row_grid, col_grid)?;

    let mut out = RgbImageF32::new(out_w, out_h);
    for (rh, row) in rows.into_iter().enumerate() {
        for (rw, px) in row.into_iter().enumerate() {
            out.set(rw, rh, px);
        }
    }
    Ok(out)
}

#[cfg(not(feature = "parallel"))]
fn sample_rows(
    image: &RgbImageF32,
    row_grid: &[f64],
    col_grid: &[f64],
) -> Result<Vec<Vec<[f32; CHANNELS]>>, SampleError> {
    (0..row_grid.len() - 1)
        .map(|rh| sample_row(image, row_grid, col_grid, rh))
        .collect()
}

/// Cells are independent, so rows aggregate in parallel; the assembled
/// output is identical to the serial build.
#[cfg(feature = "parallel")]
fn sample_rows(
    image: &RgbImageF32,
    row_grid: &[f64],
    col_grid: &[f64],
) -> Result<Vec<Vec<[f32; CHANNELS]>>, SampleError> {
    use rayon::prelude::*;

    (0..row_grid.len() - 1)
        .into_par_iter()
        .map(|rh| sample_row(image, row_grid, col_grid, rh))
        .collect()
}

fn sample_row(
    image: &RgbImageF32,
    row_grid: &[f64],
    col_grid: &[f64],
    rh: usize,
) -> Result<Vec<[f32; CHANNELS]>, SampleError> {
    let mut out = Vec::with_capacity(col_grid.len() - 1);
    let mut scratch = [Vec::new(), Vec::new(), Vec::new()];

    let (y0, y1) = cell_span(row_grid[rh], row_grid[rh + 1], image.h)
        .ok_or(SampleError::EmptyCellRegion { row: rh, col: 0 })?;

    for rw in 0..col_grid.len() - 1 {
        let (x0, x1) = cell_span(col_grid[rw], col_grid[rw + 1], image.w)
            .ok_or(SampleError::EmptyCellRegion { row: rh, col: rw })?;

        for channel in scratch.iter_mut() {
            channel.clear();
        }
        for y in y0..=y1 {
            let row = image.row(y);
            for x in x0..=x1 {
                let i = x * CHANNELS;
                scratch[0].push(row[i]);
                scratch[1].push(row[i + 1]);
                scratch[2].push(row[i + 2]);
            }
        }

        let px = [
            median(&mut scratch[0]),
            median(&mut scratch[1]),
            median(&mut scratch[2]),
        ];
        out.push(px);
    }
    Ok(out)
}

/// Discrete inclusive index span for a continuous cell interval, or `None`
/// when rounding leaves no pixel.
fn cell_span(lo: f64, hi: f64, len: usize) -> Option<(usize, usize)> {
    debug_assert!(lo >= 0.0 && len > 0);
    let start = lo.ceil() as usize;
    let end = (hi.floor() as usize).min(len - 1);
    (start <= end).then_some((start, end))
}

/// Median of a non-empty scratch buffer; even counts average the middle two.
fn median(values: &mut [f32]) -> f32 {
    debug_assert!(!values.is_empty());
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        0.5 * (values[n / 2 - 1] + values[n / 2])
    }
}
