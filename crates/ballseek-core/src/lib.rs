//! Core types and utilities for high-frame-rate golf-ball detection.
//!
//! This crate is intentionally small: borrowed frame views with intensity
//! conversion, plain geometry on contour points, and sample statistics. It
//! does *not* depend on any concrete detector.

mod error;
mod frame;
mod geometry;
mod logger;
pub mod stats;

pub use error::FrameError;
pub use frame::FrameView;
pub use geometry::{ellipse_axes, polygon_area, polygon_perimeter};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
