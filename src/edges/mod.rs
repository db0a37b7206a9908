//! Edge-signal extraction: directional gradients and 1-D axis profiles.
//!
//! The grid inference never looks at 2-D edge structure. Each axis gets a
//! single profile: the luminance image is filtered with a directional 3×3
//! Sobel kernel and the absolute response is averaged across the axis
//! orthogonal to the derivative. Cell boundaries of a regular grid show up
//! as sharp maxima in these profiles regardless of the colors involved,
//! which is all the downstream peak extractor needs.
//!
//! Border handling clamps indices (replicate), matching the gradient
//! convention used elsewhere in this codebase.

pub mod grad;
pub mod profile;

/// Directional Sobel response for one axis.
pub use grad::{sobel_directional, GradientAxis};
/// Per-axis mean absolute gradient profiles.
pub use profile::{edge_profiles, EdgeProfiles};
