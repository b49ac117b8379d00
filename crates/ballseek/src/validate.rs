//! Multi-criterion candidate validation and scoring.
//!
//! Each surviving circle proposal runs a fixed gauntlet of gates; the first
//! failing gate skips the candidate, it never fails the call. Candidates
//! that clear every gate receive a composite quality score in [0, 100].
//! Degenerate geometry (empty contour, zero perimeter, flat ellipse, zero
//! hull) is absorbed the same way: skip, move on.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::convex_hull;
use nalgebra::Point2;

use ballseek_core::{ellipse_axes, polygon_area, polygon_perimeter, stats};

use crate::params::ValidationParams;
use crate::CircleCandidate;

/// Divisor turning region intensity stddev into the [0, 1] uniformity score.
const UNIFORMITY_STDDEV_SCALE: f64 = 100.0;
/// Divisor turning mean edge-map intensity into the [0, 1] edge score.
const EDGE_MEAN_SCALE: f64 = 50.0;

/// Score components for one candidate that cleared every gate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ValidationOutcome {
    pub score: f64,
    pub circularity: f64,
    pub brightness: f64,
    pub uniformity: f64,
    pub edge_score: f64,
}

/// Run the acceptance gates on one candidate against the intensity image
/// and the edge map. `None` means one of the gates failed.
pub(crate) fn validate_candidate(
    gray: &GrayImage,
    edges: &GrayImage,
    candidate: CircleCandidate,
    params: &ValidationParams,
) -> Option<ValidationOutcome> {
    let (w, h) = gray.dimensions();
    let CircleCandidate { x, y, radius: r } = candidate;

    // Gate 1: the full circle must fit inside the frame.
    if r <= 0 || x - r < 0 || y - r < 0 || x + r >= w as i32 || y + r >= h as i32 {
        log::trace!("candidate ({x}, {y}) r={r}: outside frame bounds");
        return None;
    }

    // Bounding region of the circle; bounds were checked above so the
    // clamped window is exactly 2r x 2r.
    let (x0, y0) = ((x - r) as u32, (y - r) as u32);
    let (rw, rh) = (2 * r as u32, 2 * r as u32);

    // Gate 2: the region must be bright enough to be a lit ball.
    let (brightness, stddev) = stats::mean_stddev(region_pixels(gray, x0, y0, rw, rh))?;
    if brightness < params.min_brightness {
        log::trace!("candidate ({x}, {y}) r={r}: too dark ({brightness:.1})");
        return None;
    }

    // Gate 3: circularity of the thresholded blob.
    let blob = GrayImage::from_fn(rw, rh, |dx, dy| {
        if gray.get_pixel(x0 + dx, y0 + dy)[0] > params.region_threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });
    let contours = find_contours::<i32>(&blob);
    let largest = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .max_by(|a, b| {
            contour_area(&a.points)
                .total_cmp(&contour_area(&b.points))
        })?;

    let pts: Vec<Point2<f64>> = largest
        .points
        .iter()
        .map(|p| Point2::new(p.x as f64, p.y as f64))
        .collect();
    let area = polygon_area(&pts);
    let perimeter = polygon_perimeter(&pts);
    if perimeter <= f64::EPSILON {
        return None;
    }
    let circularity = 4.0 * std::f64::consts::PI * area / (perimeter * perimeter);
    if circularity < params.min_circularity {
        log::trace!("candidate ({x}, {y}) r={r}: circularity {circularity:.2}");
        return None;
    }

    // Gate 4: the blob must not be elongated.
    let (minor, major) = ellipse_axes(&pts)?;
    if minor <= 0.0 || major <= 0.0 {
        return None;
    }
    let aspect = minor / major;
    if aspect < params.min_aspect_ratio {
        log::trace!("candidate ({x}, {y}) r={r}: aspect ratio {aspect:.2}");
        return None;
    }

    // Gate 5: solidity against the convex hull rejects concave shapes.
    let hull = convex_hull(largest.points.as_slice());
    let hull_pts: Vec<Point2<f64>> = hull
        .iter()
        .map(|p| Point2::new(p.x as f64, p.y as f64))
        .collect();
    let hull_area = polygon_area(&hull_pts);
    if hull_area <= f64::EPSILON {
        return None;
    }
    let solidity = area / hull_area;
    if solidity < params.min_solidity {
        log::trace!("candidate ({x}, {y}) r={r}: solidity {solidity:.2}");
        return None;
    }

    // Gate 6: a real ball is close to uniform inside.
    let uniformity = 1.0 - (stddev / UNIFORMITY_STDDEV_SCALE).min(0.5);
    if uniformity < params.min_uniformity {
        log::trace!("candidate ({x}, {y}) r={r}: uniformity {uniformity:.2}");
        return None;
    }

    // Gate 7: the rim must have support in the edge map.
    let edge_mean = stats::mean(region_pixels(edges, x0, y0, rw, rh)).unwrap_or(0.0);
    let edge_score = (edge_mean / EDGE_MEAN_SCALE).min(1.0);
    if edge_score < params.min_edge_score {
        log::trace!("candidate ({x}, {y}) r={r}: edge score {edge_score:.2}");
        return None;
    }

    // Gate 8: plausible ball size.
    if r < params.min_ball_radius || r > params.max_ball_radius {
        log::trace!("candidate ({x}, {y}) r={r}: implausible size");
        return None;
    }

    let score = 100.0
        * (0.4 * circularity
            + 0.3 * (brightness / 255.0)
            + 0.2 * uniformity
            + 0.1 * edge_score);
    Some(ValidationOutcome {
        score,
        circularity,
        brightness,
        uniformity,
        edge_score,
    })
}

fn region_pixels(
    img: &GrayImage,
    x0: u32,
    y0: u32,
    rw: u32,
    rh: u32,
) -> impl Iterator<Item = u8> + '_ {
    (y0..y0 + rh).flat_map(move |y| (x0..x0 + rw).map(move |x| img.get_pixel(x, y)[0]))
}

fn contour_area(points: &[imageproc::point::Point<i32>]) -> f64 {
    let pts: Vec<Point2<f64>> = points
        .iter()
        .map(|p| Point2::new(p.x as f64, p.y as f64))
        .collect();
    polygon_area(&pts)
}
