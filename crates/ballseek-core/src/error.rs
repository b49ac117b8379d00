use thiserror::Error;

/// Errors produced at the frame-input boundary.
///
/// Everything past input validation is infallible by design: a candidate
/// that cannot be validated is skipped, and "no ball in this frame" is a
/// normal result, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("unsupported frame layout ({channels} channels, expected 1 or 3)")]
    InvalidFormat { channels: usize },

    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("invalid frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}
