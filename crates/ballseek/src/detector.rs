//! Single-frame detection pipeline.
//!
//! Normalize → propose regions → adaptive circle search → concentric
//! suppression → validate and score → best survivor. The detector holds no
//! state across calls and allocates only call-local buffers, so one
//! instance may be shared by reference across worker threads.

use image::GrayImage;

use ballseek_core::{FrameError, FrameView};

use crate::hough::{adaptive_search, suppress_duplicates};
use crate::params::DetectorParams;
use crate::regions;
use crate::validate::validate_candidate;
use crate::Detection;

/// Stateless single-frame golf-ball detector.
#[derive(Clone, Debug, Default)]
pub struct BallDetector {
    params: DetectorParams,
}

impl BallDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Detect the ball in a raw frame buffer.
    ///
    /// `Ok(None)` is the normal "nothing in this frame" outcome. The only
    /// error is a frame whose layout is not single-channel or RGB; treat it
    /// as an integration bug on the capture side, not a runtime condition.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(&self, frame: &FrameView<'_>) -> Result<Option<Detection>, FrameError> {
        let gray = frame.to_intensity()?;
        Ok(self.detect_gray(&gray))
    }

    /// Detect the ball in an already-grayscale frame.
    pub fn detect_gray(&self, gray: &GrayImage) -> Option<Detection> {
        let maps = regions::propose(gray, &self.params.regions);
        log::trace!(
            "bright mask covers {} px",
            maps.bright.as_raw().iter().filter(|&&p| p != 0).count()
        );
        let circles = adaptive_search(&maps.fused, &self.params.sensitivities, &self.params.hough);
        if circles.is_empty() {
            return None;
        }
        let candidates = suppress_duplicates(&circles, self.params.dedup_tolerance);
        log::debug!(
            "{} circle(s) proposed, {} after concentric suppression",
            circles.len(),
            candidates.len()
        );

        let mut best: Option<Detection> = None;
        for candidate in candidates {
            let Some(outcome) =
                validate_candidate(gray, &maps.edges, candidate, &self.params.validation)
            else {
                continue;
            };
            if best.as_ref().map_or(true, |b| outcome.score > b.score) {
                best = Some(Detection {
                    x: candidate.x,
                    y: candidate.y,
                    radius: candidate.radius,
                    score: outcome.score,
                });
            }
        }

        match best {
            Some(d) if d.score > self.params.validation.min_score => {
                log::debug!(
                    "ball at ({}, {}) r={} score={:.1}",
                    d.x,
                    d.y,
                    d.radius,
                    d.score
                );
                Some(d)
            }
            Some(d) => {
                log::debug!("best candidate below acceptance floor (score={:.1})", d.score);
                None
            }
            None => None,
        }
    }
}
