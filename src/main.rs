use repixel::image::RgbImageF32;
use repixel::{reconstruct, ReconstructParams};

fn main() {
    // Demo stub: builds a synthetic 5x5 pixel-art image upscaled 20x and
    // recovers it
    let cell_px = 20usize;
    let cells = 5usize;
    let size = cells * cell_px;

    let mut img = RgbImageF32::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let (cx, cy) = (x / cell_px, y / cell_px);
            let base = if (cx + cy) % 2 == 0 { 0.15 } else { 0.75 };
            img.set(
                x,
                y,
                [
                    base + 0.01 * cx as f32,
                    base + 0.01 * cy as f32,
                    base + 0.005 * (cx + cy) as f32,
                ],
            );
        }
    }

    match reconstruct(&img, &ReconstructParams::default()) {
        Ok(result) => println!(
            "reconstructed {}x{} cells (step {:.1}x{:.1} px) in {:.3} ms",
            result.image.w,
            result.image.h,
            result.x.fitted.step,
            result.y.fitted.step,
            result.report.total_ms
        ),
        Err(err) => eprintln!("Error: {err}"),
    }
}
