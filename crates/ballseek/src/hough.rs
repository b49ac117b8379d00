//! Gradient-voting circle transform with an adaptive sensitivity schedule.
//!
//! Classical two-stage circle Hough: Canny picks edge pixels on the fused
//! region map, Scharr supplies their orientation, and each edge pixel votes
//! for possible centers along its gradient line in both directions across
//! the admissible radius band. Center peaks above the sensitivity floor are
//! kept with non-maximum suppression at `min_dist`; each center's radius is
//! then read from the mode of supporting edge-pixel distances.
//!
//! A single fixed sensitivity either misses a faint ball in a bright scene
//! or floods the result with spurious circles in a noisy one, so the search
//! walks a fixed schedule of sensitivities and stops at the first pass with
//! a plausible yield.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_scharr, vertical_scharr};

use crate::params::HoughParams;
use crate::CircleCandidate;

/// An edge pixel with its unit gradient direction.
#[derive(Clone, Copy)]
struct EdgePoint {
    x: f32,
    y: f32,
    ux: f32,
    uy: f32,
}

/// Minimum |cos| between the gradient and the center line for an edge pixel
/// to count as radius support.
const RADIAL_ALIGNMENT: f32 = 0.6;

/// One transform pass at a fixed sensitivity. Circles are returned
/// strongest-center-first.
pub(crate) fn find_circles(
    map: &GrayImage,
    sensitivity: u32,
    params: &HoughParams,
) -> Vec<CircleCandidate> {
    let (w, h) = map.dimensions();
    if w < 3 || h < 3 {
        return Vec::new();
    }

    let edge_pts = edge_points(map, params);
    if edge_pts.is_empty() {
        return Vec::new();
    }

    let accum = vote_centers(&edge_pts, w, h, params);
    let centers = center_peaks(&accum, w, h, sensitivity, params.min_dist);

    let mut out = Vec::new();
    for (votes, cx, cy) in centers {
        if let Some(radius) = estimate_radius(&edge_pts, cx as f32, cy as f32, sensitivity, params)
        {
            log::trace!("center ({cx}, {cy}) votes={votes} radius={radius}");
            out.push(CircleCandidate {
                x: cx as i32,
                y: cy as i32,
                radius: radius as i32,
            });
        }
    }
    out
}

/// Try the sensitivity schedule in order, stopping at the first pass that
/// yields a plausible number of circles (1 to 3). The first non-empty yield
/// from an earlier pass is kept as fallback for when no pass is ideal; the
/// fallback lives only for the duration of this search.
pub(crate) fn adaptive_search(
    map: &GrayImage,
    sensitivities: &[u32],
    params: &HoughParams,
) -> Vec<CircleCandidate> {
    let mut fallback: Vec<CircleCandidate> = Vec::new();
    for &sensitivity in sensitivities {
        let circles = find_circles(map, sensitivity, params);
        if circles.is_empty() {
            continue;
        }
        log::debug!(
            "transform pass at sensitivity {sensitivity}: {} circle(s)",
            circles.len()
        );
        if (1..=3).contains(&circles.len()) {
            return circles;
        }
        if fallback.is_empty() {
            fallback = circles;
        }
    }
    fallback
}

/// Collapse concentric duplicates: the transform often reports several radii
/// fitting one physical rim. A candidate is dropped when its center lies
/// within the tolerance of an already kept center in both axes, so the
/// first, strongest member of each cluster wins.
pub(crate) fn suppress_duplicates(
    circles: &[CircleCandidate],
    tolerance: i32,
) -> Vec<CircleCandidate> {
    let mut kept: Vec<CircleCandidate> = Vec::new();
    for &c in circles {
        let duplicate = kept
            .iter()
            .any(|k| (c.x - k.x).abs() < tolerance && (c.y - k.y).abs() < tolerance);
        if !duplicate {
            kept.push(c);
        }
    }
    kept
}

fn edge_points(map: &GrayImage, params: &HoughParams) -> Vec<EdgePoint> {
    let (w, h) = map.dimensions();
    let edges = canny(
        map,
        params.gradient_threshold * 0.5,
        params.gradient_threshold,
    );
    let gx = horizontal_scharr(map);
    let gy = vertical_scharr(map);

    let mut out = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if edges.get_pixel(x, y)[0] == 0 {
                continue;
            }
            let dx = gx.get_pixel(x, y)[0] as f32;
            let dy = gy.get_pixel(x, y)[0] as f32;
            let mag = (dx * dx + dy * dy).sqrt();
            if mag < 1e-3 {
                continue;
            }
            out.push(EdgePoint {
                x: x as f32,
                y: y as f32,
                ux: dx / mag,
                uy: dy / mag,
            });
        }
    }
    out
}

/// Full-resolution center accumulator: every edge pixel votes along its
/// gradient line, both orientations, one vote per integer radius step.
fn vote_centers(edge_pts: &[EdgePoint], w: u32, h: u32, params: &HoughParams) -> Vec<u32> {
    let stride = w as usize;
    let mut accum = vec![0u32; stride * h as usize];
    let r_min = params.min_radius.max(1) as f32;
    let r_max = params.max_radius as f32;
    let (x_lim, y_lim) = (w as f32, h as f32);

    for p in edge_pts {
        for dir in [1.0f32, -1.0] {
            let mut r = r_min;
            while r <= r_max {
                let cx = p.x + dir * p.ux * r;
                let cy = p.y + dir * p.uy * r;
                if cx >= 0.0 && cy >= 0.0 && cx < x_lim && cy < y_lim {
                    accum[cy as usize * stride + cx as usize] += 1;
                }
                r += 1.0;
            }
        }
    }
    accum
}

/// Local accumulator maxima above the sensitivity floor, strongest first,
/// greedily thinned so surviving centers are at least `min_dist` apart.
fn center_peaks(
    accum: &[u32],
    w: u32,
    h: u32,
    sensitivity: u32,
    min_dist: f32,
) -> Vec<(u32, u32, u32)> {
    let stride = w as usize;
    let mut peaks: Vec<(u32, u32, u32)> = Vec::new();
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let i = y as usize * stride + x as usize;
            let v = accum[i];
            if v < sensitivity {
                continue;
            }
            // Strict on the right/bottom so a flat plateau yields one peak.
            if v < accum[i - 1] || v < accum[i - stride] {
                continue;
            }
            if v <= accum[i + 1] || v <= accum[i + stride] {
                continue;
            }
            peaks.push((v, x, y));
        }
    }
    peaks.sort_by(|a, b| b.0.cmp(&a.0));

    let min_dist_sq = min_dist * min_dist;
    let mut kept: Vec<(u32, u32, u32)> = Vec::new();
    for (v, x, y) in peaks {
        let clear = kept.iter().all(|&(_, kx, ky)| {
            let dx = x as f32 - kx as f32;
            let dy = y as f32 - ky as f32;
            dx * dx + dy * dy >= min_dist_sq
        });
        if clear {
            kept.push((v, x, y));
        }
    }
    kept
}

/// Mode of edge-pixel distances within the radius band, counting only
/// pixels whose gradient is roughly radial to the center. The mode must
/// reach the same sensitivity floor as the center vote.
fn estimate_radius(
    edge_pts: &[EdgePoint],
    cx: f32,
    cy: f32,
    sensitivity: u32,
    params: &HoughParams,
) -> Option<u32> {
    let r_min = params.min_radius.max(1);
    if params.max_radius < r_min {
        return None;
    }
    let mut hist = vec![0u32; (params.max_radius - r_min + 1) as usize];

    for p in edge_pts {
        let dx = cx - p.x;
        let dy = cy - p.y;
        let d = (dx * dx + dy * dy).sqrt();
        if d < 1e-3 {
            continue;
        }
        let bin = d.round() as i64 - r_min as i64;
        if bin < 0 || bin >= hist.len() as i64 {
            continue;
        }
        let cos = (dx * p.ux + dy * p.uy) / d;
        if cos.abs() < RADIAL_ALIGNMENT {
            continue;
        }
        hist[bin as usize] += 1;
    }

    let (best_bin, &votes) = hist
        .iter()
        .enumerate()
        .max_by_key(|&(_, &v)| v)
        .unwrap_or((0, &0));
    (votes >= sensitivity).then(|| r_min + best_bin as u32)
}
