//! Run ball detection on a still image and print the result as JSON.
//!
//! Useful for tuning gate thresholds offline against captured frames.

use std::path::PathBuf;

use clap::Parser;

use ballseek::{BallDetector, DetectorParams};

#[derive(Parser, Debug)]
#[command(name = "ballseek", about = "Locate a golf ball in an image", version)]
struct Cli {
    /// Input image (any format the `image` crate decodes).
    image: PathBuf,

    /// JSON file with detector parameter overrides; missing fields keep
    /// their defaults.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: log::LevelFilter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    ballseek_core::init_with_level(cli.log_level)?;

    let params = match &cli.params {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => DetectorParams::default(),
    };

    let gray = image::ImageReader::open(&cli.image)?.decode()?.to_luma8();
    let detector = BallDetector::new(params);

    match detector.detect_gray(&gray) {
        Some(detection) => println!("{}", serde_json::to_string_pretty(&detection)?),
        None => println!("null"),
    }
    Ok(())
}
