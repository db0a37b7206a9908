#![doc = include_str!("../README.md")]

// Pipeline stages, in data-flow order.
pub mod image;
pub mod normalize;
pub mod edges;
pub mod peaks;
pub mod assign;
pub mod solver;
pub mod grid;
pub mod sample;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the pipeline and its results.
pub use crate::pipeline::{
    reconstruct, reconstruct_dynamic, AxisFit, ReconstructError, ReconstructParams,
    ReconstructReport, Reconstruction,
};

// The knobs callers usually touch.
pub use crate::peaks::PeakParams;
pub use crate::solver::CellSizeBounds;

/// Small prelude for quick experiments.
///
/// ```no_run
/// use repixel::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let decoded = image::open("upscaled.png")?;
/// let result = reconstruct_dynamic(&decoded, &ReconstructParams::default())?;
/// println!("{}x{} cells", result.image.w, result.image.h);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RgbImageF32;
    pub use crate::{reconstruct, reconstruct_dynamic, ReconstructParams, Reconstruction};
}
