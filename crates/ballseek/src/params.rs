use serde::{Deserialize, Serialize};

/// Region-proposal settings (bright mask plus edge map fusion).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    /// Binary cutoff isolating bright pixels. The ball is near-white even
    /// when slightly out of focus, so this runs well below saturation.
    pub bright_threshold: u8,
    /// Radius of the elliptical structuring element used for the open/close
    /// cleanup of the bright mask (radius 2 is a 5x5 neighborhood).
    pub morph_radius: u8,
    /// Canny hysteresis thresholds on the raw intensity image.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Gaussian sigma applied to the fused map before the circle search,
    /// stabilising the transform against jagged binary edges.
    pub blur_sigma: f32,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            bright_threshold: 100,
            morph_radius: 2,
            canny_low: 50.0,
            canny_high: 150.0,
            blur_sigma: 2.0,
        }
    }
}

/// Geometry of the circle transform. These stay fixed across sensitivity
/// passes; only the accumulator floor changes between passes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Minimum distance between reported circle centers, in pixels.
    pub min_dist: f32,
    /// Gradient-confirmation threshold (Canny high threshold on the fused
    /// map; the low threshold is half of it).
    pub gradient_threshold: f32,
    /// Admissible radius band. Wide enough for a ball from very close to
    /// moderately far from the camera.
    pub min_radius: u32,
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            min_dist: 50.0,
            gradient_threshold: 18.0,
            min_radius: 5,
            max_radius: 250,
        }
    }
}

/// Per-candidate acceptance gates.
///
/// Empirically tuned for a white ball on a darker background; the gates
/// interact, so change one with care.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationParams {
    /// Floor on the mean intensity of the candidate's bounding region.
    pub min_brightness: f64,
    /// Binary cutoff applied to the region before contour extraction.
    pub region_threshold: u8,
    /// Floor on `4*pi*area / perimeter^2` of the largest contour.
    pub min_circularity: f64,
    /// Floor on `min(axis) / max(axis)` of the fitted ellipse.
    pub min_aspect_ratio: f64,
    /// Floor on `contour area / convex hull area`.
    pub min_solidity: f64,
    /// Floor on the `1 - min(stddev/100, 0.5)` uniformity score.
    pub min_uniformity: f64,
    /// Floor on the `min(mean_edge/50, 1)` edge-support score.
    pub min_edge_score: f64,
    /// Plausible ball radius band on this sensor geometry, in pixels.
    pub min_ball_radius: i32,
    pub max_ball_radius: i32,
    /// Acceptance floor on the composite score. A best candidate at or
    /// below this is reported as "no detection": weak evidence is treated
    /// as absence rather than a low-confidence positive.
    pub min_score: f64,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            min_brightness: 85.0,
            region_threshold: 85,
            min_circularity: 0.75,
            min_aspect_ratio: 0.85,
            min_solidity: 0.90,
            min_uniformity: 0.5,
            min_edge_score: 0.1,
            min_ball_radius: 15,
            max_ball_radius: 150,
            min_score: 40.0,
        }
    }
}

/// Top-level detector configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub regions: RegionParams,
    pub hough: HoughParams,
    /// Accumulator sensitivities tried in order; a pass yielding 1 to 3
    /// circles ends the search. Historically best-performing value first,
    /// then progressively looser and tighter alternatives. The try-order
    /// and the 1..=3 stopping rule decide which candidate gets scored, so
    /// both are part of the detector's observable behavior.
    pub sensitivities: Vec<u32>,
    /// Centers closer than this in both axes collapse to one candidate.
    pub dedup_tolerance: i32,
    pub validation: ValidationParams,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            regions: RegionParams::default(),
            hough: HoughParams::default(),
            sensitivities: vec![8, 6, 10, 5, 12, 15],
            dedup_tolerance: 10,
            validation: ValidationParams::default(),
        }
    }
}
