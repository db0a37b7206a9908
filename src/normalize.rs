//! Input normalization: coerce a decoded image into the canonical
//! 3-channel f32 representation.
//!
//! - 8-bit channels are divided by 256, so values land in `[0, 1)`.
//! - Float channels pass through unchanged; re-normalizing an already
//!   normalized image is the identity.
//! - An alpha channel, when present, is dropped.
//!
//! Unsupported color layouts (grayscale, 16-bit depths) are rejected up
//! front so the pipeline never starts on an image it cannot interpret.
use crate::image::rgb::CHANNELS;
use crate::image::RgbImageF32;
use image::{ColorType, DynamicImage};

/// Precondition violations detected before any processing begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MalformedImage {
    /// The decoded color layout cannot be coerced to 3-channel RGB.
    UnsupportedColor { color: ColorType },
    /// One or both spatial dimensions are zero.
    EmptyImage { width: u32, height: u32 },
}

impl std::fmt::Display for MalformedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedImage::UnsupportedColor { color } => {
                write!(f, "unsupported color layout {color:?}")
            }
            MalformedImage::EmptyImage { width, height } => {
                write!(f, "empty image ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for MalformedImage {}

/// Coerce a decoded image into `RgbImageF32` with values in `[0, 1)`.
pub fn normalize(image: &DynamicImage) -> Result<RgbImageF32, MalformedImage> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(MalformedImage::EmptyImage { width, height });
    }
    let w = width as usize;
    let h = height as usize;

    match image {
        DynamicImage::ImageRgb8(buf) => {
            let data = buf.as_raw().iter().map(|&v| v as f32 / 256.0).collect();
            Ok(RgbImageF32::from_vec(w, h, data))
        }
        DynamicImage::ImageRgba8(buf) => {
            let data = drop_alpha(buf.as_raw(), |&v| v as f32 / 256.0);
            Ok(RgbImageF32::from_vec(w, h, data))
        }
        DynamicImage::ImageRgb32F(buf) => Ok(RgbImageF32::from_vec(w, h, buf.as_raw().clone())),
        DynamicImage::ImageRgba32F(buf) => {
            let data = drop_alpha(buf.as_raw(), |&v| v);
            Ok(RgbImageF32::from_vec(w, h, data))
        }
        other => Err(MalformedImage::UnsupportedColor {
            color: other.color(),
        }),
    }
}

fn drop_alpha<T, F: Fn(&T) -> f32>(raw: &[T], convert: F) -> Vec<f32> {
    let mut out = Vec::with_capacity(raw.len() / 4 * CHANNELS);
    for px in raw.chunks_exact(4) {
        out.extend(px[..CHANNELS].iter().map(&convert));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb32FImage, RgbImage, Rgba, RgbaImage};

    #[test]
    fn scales_u8_by_256() {
        let mut buf = RgbImage::new(1, 1);
        buf.put_pixel(0, 0, image::Rgb([128, 64, 255]));
        let img = normalize(&DynamicImage::ImageRgb8(buf)).unwrap();
        assert_eq!(img.get(0, 0), [128.0 / 256.0, 64.0 / 256.0, 255.0 / 256.0]);
    }

    #[test]
    fn drops_alpha_channel() {
        let mut buf = RgbaImage::new(2, 1);
        buf.put_pixel(0, 0, Rgba([10, 20, 30, 40]));
        buf.put_pixel(1, 0, Rgba([50, 60, 70, 80]));
        let img = normalize(&DynamicImage::ImageRgba8(buf)).unwrap();
        assert_eq!(img.get(0, 0), [10.0 / 256.0, 20.0 / 256.0, 30.0 / 256.0]);
        assert_eq!(img.get(1, 0), [50.0 / 256.0, 60.0 / 256.0, 70.0 / 256.0]);
    }

    #[test]
    fn float_input_is_identity() {
        let mut buf = Rgb32FImage::new(1, 2);
        buf.put_pixel(0, 0, image::Rgb([0.1, 0.2, 0.3]));
        buf.put_pixel(0, 1, image::Rgb([0.4, 0.5, 0.6]));
        let dynamic = DynamicImage::ImageRgb32F(buf.clone());
        let first = normalize(&dynamic).unwrap();
        assert_eq!(first.data, buf.as_raw().as_slice());

        // Re-normalizing the normalized result changes nothing.
        let mut round = Rgb32FImage::new(1, 2);
        for y in 0..2 {
            let px = first.get(0, y);
            round.put_pixel(0, y as u32, image::Rgb(px));
        }
        let second = normalize(&DynamicImage::ImageRgb32F(round)).unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn rejects_grayscale() {
        let gray = DynamicImage::new_luma8(4, 4);
        assert!(matches!(
            normalize(&gray),
            Err(MalformedImage::UnsupportedColor { .. })
        ));
    }

    #[test]
    fn rejects_empty_image() {
        let empty = DynamicImage::new_rgb8(0, 3);
        assert_eq!(
            normalize(&empty),
            Err(MalformedImage::EmptyImage {
                width: 0,
                height: 3
            })
        );
    }
}
