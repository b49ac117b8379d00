//! Single-frame golf-ball detection for a high-frame-rate launch monitor.
//!
//! Given one monochrome or RGB frame, the detector runs a purely classical
//! pipeline: bright-region and edge proposal, an adaptive circle transform,
//! concentric-duplicate suppression, and a seven-gate validator with
//! composite scoring. Two stateless helpers ride along: a historical
//! velocity estimate over caller-supplied positions and a global scene
//! brightness probe for the exposure controller.
//!
//! ## Quickstart
//!
//! ```no_run
//! use ballseek::{BallDetector, FrameView};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (width, height) = (640usize, 480usize);
//! let pixels = vec![0u8; width * height];
//! let frame = FrameView::gray(width, height, &pixels);
//!
//! let detector = BallDetector::default();
//! match detector.detect(&frame)? {
//!     Some(ball) => println!("ball at ({}, {}) r={}", ball.x, ball.y, ball.radius),
//!     None => println!("no ball this frame"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`BallDetector`] / [`detect`]: the per-frame pipeline.
//! - [`DetectorParams`] and friends: every tuned constant, JSON-overridable.
//! - [`estimate_velocity`]: mean per-frame displacement from a history.
//! - [`scene_brightness`]: whole-frame mean intensity (RGB input only).
//!
//! "No ball found" is a normal return value, never an error; the only
//! fatal condition is a frame buffer whose shape is not H×W, H×W×1 or
//! H×W×3.

use serde::{Deserialize, Serialize};

mod detector;
mod exposure;
mod hough;
mod motion;
mod params;
mod regions;
mod validate;

pub use ballseek_core::{FrameError, FrameView};

pub use detector::BallDetector;
pub use exposure::scene_brightness;
pub use motion::estimate_velocity;
pub use params::{DetectorParams, HoughParams, RegionParams, ValidationParams};

/// A circle proposal in pixel coordinates, prior to validation. Pure value
/// type with no identity beyond its geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleCandidate {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
}

/// An accepted ball detection, with the composite quality score that won it
/// the frame (0 to 100).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub score: f64,
}

/// Detect with the default parameter set.
pub fn detect(frame: &FrameView<'_>) -> Result<Option<Detection>, FrameError> {
    BallDetector::default().detect(frame)
}
