//! Historical-velocity estimation over a caller-owned position history.

/// Average per-frame displacement over a history of optional positions.
///
/// Frames with no detection contribute nothing; the remaining points keep
/// their relative order and distances are taken between adjacent survivors.
/// Fewer than two usable points yields `0.0`. Callers use this to tell a
/// stationary teed ball from an incidental moving object (a hand, a club
/// head) before a shot.
pub fn estimate_velocity(history: &[Option<(i32, i32)>]) -> f64 {
    let points: Vec<(i32, i32)> = history.iter().flatten().copied().collect();
    if points.len() < 2 {
        return 0.0;
    }
    let total: f64 = points
        .windows(2)
        .map(|pair| {
            let dx = (pair[1].0 - pair[0].0) as f64;
            let dy = (pair[1].1 - pair[0].1) as f64;
            dx.hypot(dy)
        })
        .sum();
    total / (points.len() - 1) as f64
}
