//! Global scene-brightness probe.

use ballseek_core::{stats, FrameError, FrameView};

/// Mean intensity of the whole scene, 0 to 255.
///
/// A cheap global signal for the exposure controller, and for spotting a
/// covered lens before it fires a false trigger. Distinct from the
/// detector's localized per-candidate brightness gate. Only the RGB capture
/// path feeds this probe, so single-channel frames are rejected.
pub fn scene_brightness(frame: &FrameView<'_>) -> Result<f64, FrameError> {
    if frame.channels != 3 {
        return Err(FrameError::InvalidFormat {
            channels: frame.channels,
        });
    }
    let gray = frame.to_intensity()?;
    Ok(stats::mean(gray.as_raw().iter().copied()).unwrap_or(0.0))
}
