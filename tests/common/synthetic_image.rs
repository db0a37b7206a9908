use image::{DynamicImage, Rgb, RgbImage};

/// Deterministic color for a source cell, alternating dark and bright so
/// every cell boundary carries a strong luminance step on both axes.
pub fn cell_color(row: usize, col: usize) -> [u8; 3] {
    let base: usize = if (row + col) % 2 == 0 { 40 } else { 190 };
    [
        (base + (row * 13 + col * 7) % 30) as u8,
        (base + (row * 7 + col * 19) % 30) as u8,
        (base + (row * 23 + col * 5) % 30) as u8,
    ]
}

/// Nearest-neighbor upscale of a `rows x cols` cell grid, `cell_px` pixels
/// per cell.
pub fn upscaled_cell_grid(rows: usize, cols: usize, cell_px: usize) -> DynamicImage {
    assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
    assert!(cell_px > 0, "cell size must be positive");

    let mut img = RgbImage::new((cols * cell_px) as u32, (rows * cell_px) as u32);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let row = y as usize / cell_px;
        let col = x as usize / cell_px;
        *px = Rgb(cell_color(row, col));
    }
    DynamicImage::ImageRgb8(img)
}
