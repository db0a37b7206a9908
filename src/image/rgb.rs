//! Owned 3-channel f32 image, interleaved RGB in row-major layout.
//!
//! The canonical pipeline representation after normalization: every stage
//! downstream of [`crate::normalize`] reads this type, and the cell sampler
//! allocates a fresh one for its output. Values are expected in `[0, 1)`.
use super::ImageF32;

/// Number of color channels carried through the pipeline.
pub const CHANNELS: usize = 3;

// RGB -> luminance weights (Rec. 601), the same conversion the usual
// computer-vision gray transforms apply.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

#[derive(Clone, Debug, PartialEq)]
pub struct RgbImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Interleaved RGB samples, `w * h * 3` elements
    pub data: Vec<f32>,
}

impl RgbImageF32 {
    /// Construct a zero-initialized image of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h * CHANNELS],
        }
    }

    /// Wrap an existing interleaved buffer. `data.len()` must equal `w * h * 3`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), w * h * CHANNELS);
        Self { w, h, data }
    }

    #[inline]
    /// Get the RGB triple at (x, y).
    pub fn get(&self, x: usize, y: usize) -> [f32; CHANNELS] {
        let i = (y * self.w + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    /// Set the RGB triple at (x, y).
    pub fn set(&mut self, x: usize, y: usize, px: [f32; CHANNELS]) {
        let i = (y * self.w + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    #[inline]
    /// Borrow one row of interleaved samples, `3 * w` elements.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w * CHANNELS;
        &self.data[start..start + self.w * CHANNELS]
    }

    /// Collapse to a single luminance plane with Rec. 601 weights.
    pub fn to_luma(&self) -> ImageF32 {
        let mut luma = ImageF32::new(self.w, self.h);
        for y in 0..self.h {
            let src = self.row(y);
            let start = y * self.w;
            let dst = &mut luma.data[start..start + self.w];
            for (x, out) in dst.iter_mut().enumerate() {
                let i = x * CHANNELS;
                *out = LUMA_R * src[i] + LUMA_G * src[i + 1] + LUMA_B * src[i + 2];
            }
        }
        luma
    }
}
