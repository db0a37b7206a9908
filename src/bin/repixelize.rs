use repixel::image::io::{load_image, save_rgb_f32, write_json_file};
use repixel::{reconstruct_dynamic, CellSizeBounds, PeakParams, ReconstructParams};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RepixelizeConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub peaks: PeakParams,
    #[serde(default)]
    pub cell_bounds: CellSizeBounds,
    pub output: OutputConfig,
}

impl RepixelizeConfig {
    fn params(&self) -> ReconstructParams {
        ReconstructParams {
            peaks: self.peaks,
            cell_bounds: self.cell_bounds,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "image")]
    pub image: PathBuf,
    #[serde(rename = "report_json")]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RepixelizeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let decoded = load_image(&config.input)?;
    let result = reconstruct_dynamic(&decoded, &config.params())
        .map_err(|e| format!("Failed to reconstruct {}: {e}", config.input.display()))?;

    save_rgb_f32(&result.image, &config.output.image)?;
    println!(
        "Reconstructed {}x{} cells (step {:.2}x{:.2} px) to {}",
        result.image.w,
        result.image.h,
        result.x.fitted.step,
        result.y.fitted.step,
        config.output.image.display()
    );

    if let Some(report_path) = &config.output.report_json {
        write_json_file(report_path, &result.report)?;
        println!("Saved run report to {}", report_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: repixelize <config.json>".to_string()
}
