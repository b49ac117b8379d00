//! Sample statistics over 8-bit pixel runs.

/// Mean of the samples, or `None` for an empty run.
pub fn mean(samples: impl Iterator<Item = u8>) -> Option<f64> {
    let mut sum = 0u64;
    let mut n = 0u64;
    for s in samples {
        sum += s as u64;
        n += 1;
    }
    (n > 0).then(|| sum as f64 / n as f64)
}

/// Mean and population standard deviation, or `None` for an empty run.
pub fn mean_stddev(samples: impl Iterator<Item = u8>) -> Option<(f64, f64)> {
    let mut sum = 0u64;
    let mut sum_sq = 0u64;
    let mut n = 0u64;
    for s in samples {
        sum += s as u64;
        sum_sq += (s as u64) * (s as u64);
        n += 1;
    }
    if n == 0 {
        return None;
    }
    let mean = sum as f64 / n as f64;
    let var = (sum_sq as f64 / n as f64 - mean * mean).max(0.0);
    Some((mean, var.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_run_is_none() {
        assert!(mean(std::iter::empty()).is_none());
        assert!(mean_stddev(std::iter::empty()).is_none());
    }

    #[test]
    fn constant_run_has_zero_spread() {
        let (m, s) = mean_stddev([128u8; 16].into_iter()).unwrap();
        assert_relative_eq!(m, 128.0);
        assert_relative_eq!(s, 0.0);
    }

    #[test]
    fn two_level_run() {
        // Half 0, half 200: mean 100, population stddev 100.
        let samples = [0u8; 8].into_iter().chain([200u8; 8]);
        let (m, s) = mean_stddev(samples).unwrap();
        assert_relative_eq!(m, 100.0);
        assert_relative_eq!(s, 100.0);
    }
}
