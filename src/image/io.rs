//! I/O helpers for RGB images and JSON reports.
//!
//! - `load_image`: decode a PNG/JPEG/etc. into an `image::DynamicImage`.
//! - `save_rgb_f32`: write a normalized `RgbImageF32` to an 8-bit RGB PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RgbImageF32;
use image::{DynamicImage, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an image from disk, keeping its original color layout.
pub fn load_image(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))
}

/// Save a normalized image to an RGB PNG, mapping `[0, 1)` back to 8-bit.
///
/// The inverse of the 8-bit normalization rule: channels are multiplied by
/// 256, so an image that round-tripped through the pipeline unchanged
/// writes back its exact source bytes.
pub fn save_rgb_f32(image: &RgbImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        for x in 0..image.w {
            let px = image.get(x, y);
            let bytes = px.map(|v| (v * 256.0).round().clamp(0.0, 255.0) as u8);
            out.put_pixel(x as u32, y as u32, Rgb(bytes));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
