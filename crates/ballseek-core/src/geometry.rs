use nalgebra::{Matrix2, Point2};

/// Area of the closed polygon through `points` (shoelace formula).
///
/// Points are the contour's vertices in order; the closing edge is implied.
/// Orientation does not matter, the result is always non-negative.
pub fn polygon_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    (acc * 0.5).abs()
}

/// Perimeter of the closed polygon through `points`.
pub fn polygon_perimeter(points: &[Point2<f64>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        acc += (q - p).norm();
    }
    acc
}

/// Full axis lengths `(minor, major)` of the ellipse whose boundary matches
/// the second central moments of `points`.
///
/// For points sampled on an ellipse boundary with semi-axes `a >= b`, the
/// boundary variance along the major axis is `a^2 / 2`, so the axes are
/// recovered as `2 * sqrt(2 * eigenvalue)` of the point covariance. Needs at
/// least 5 points; returns `None` for degenerate input.
///
/// The recovery is exact for a complete, evenly sampled boundary. For
/// clipped or noisy contours the covariance ratio can drift a few hundredths
/// from a least-squares fit, so callers comparing the ratio against a
/// threshold should leave that much slack in their inputs.
pub fn ellipse_axes(points: &[Point2<f64>]) -> Option<(f64, f64)> {
    if points.len() < 5 {
        return None;
    }
    let n = points.len() as f64;
    let mut mx = 0.0;
    let mut my = 0.0;
    for p in points {
        mx += p.x;
        my += p.y;
    }
    mx /= n;
    my /= n;

    let (mut cxx, mut cxy, mut cyy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.x - mx;
        let dy = p.y - my;
        cxx += dx * dx;
        cxy += dx * dy;
        cyy += dy * dy;
    }
    cxx /= n;
    cxy /= n;
    cyy /= n;

    let cov = Matrix2::new(cxx, cxy, cxy, cyy);
    let eigen = cov.symmetric_eigen();
    let l0 = eigen.eigenvalues[0].max(0.0);
    let l1 = eigen.eigenvalues[1].max(0.0);
    let (lo, hi) = if l0 <= l1 { (l0, l1) } else { (l1, l0) };
    if hi <= f64::EPSILON {
        return None;
    }
    Some((2.0 * (2.0 * lo).sqrt(), 2.0 * (2.0 * hi).sqrt()))
}
