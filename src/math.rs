//! Math helpers for std/no_std compatibility
//!
//! Uses standard library float methods when available, falls back to libm for no_std.
//! Also hosts the two-pass population moments shared by the window and the
//! batch detectors.

#[cfg(feature = "std")]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn abs(x: f64) -> f64 {
    x.abs()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

#[cfg(all(feature = "std", feature = "propagation"))]
#[inline]
pub fn powi(x: f64, n: i32) -> f64 {
    x.powi(n)
}

#[cfg(all(not(feature = "std"), feature = "propagation"))]
#[inline]
pub fn powi(x: f64, n: i32) -> f64 {
    libm::pow(x, n as f64)
}

/// Arithmetic mean of the values, `0.0` for an empty input
///
/// Uses Welford's incremental update, which is exact for constant input:
/// a run of identical samples has zero deviation from its mean. The step is
/// split as `v / n - mean / n` so opposite-signed samples near `f64::MAX`
/// cannot overflow the difference.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut mean = 0.0;
    let mut n = 0u64;
    for v in values {
        n += 1;
        let n = n as f64;
        mean += v / n - mean / n;
    }
    mean
}

/// Population standard deviation around a precomputed mean
///
/// Divides by `n`, not `n - 1`. Returns `0.0` for an empty input.
///
/// Half-deviations are rescaled by their largest magnitude before squaring,
/// so any finite input produces a finite result.
pub fn population_stddev<I>(values: I, mean: f64) -> f64
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let values = values.into_iter();
    let half_mean = mean * 0.5;

    let mut scale = 0.0f64;
    let mut n = 0usize;
    for v in values.clone() {
        let h = abs(v * 0.5 - half_mean);
        // A NaN deviation sticks so it propagates
        if h > scale || h.is_nan() {
            scale = h;
        }
        n += 1;
    }
    if n == 0 || scale == 0.0 {
        return 0.0;
    }

    let mut sq = 0.0;
    for v in values {
        let r = (v * 0.5 - half_mean) / scale;
        sq += r * r;
    }
    2.0 * scale * sqrt(sq / n as f64)
}

/// Z-score of `value` against `mean`/`sigma`
///
/// A zero sigma is replaced by `1.0`, so a perfectly flat reference can only
/// report the raw deviation.
#[inline]
pub fn zscore(value: f64, mean: f64, sigma: f64) -> f64 {
    let sigma = if sigma == 0.0 { 1.0 } else { sigma };
    let d = value - mean;
    if d.is_finite() || !value.is_finite() || !mean.is_finite() {
        abs(d) / sigma
    } else {
        // Finite operands whose difference overflowed
        abs(value * 0.5 - mean * 0.5) / (sigma * 0.5)
    }
}

/// Kahan-compensated running sum
///
/// Supports removal, so a fixed-width rolling sum stays O(1) per step without
/// drifting as samples enter and leave.
#[cfg(feature = "statistics")]
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct KahanSum {
    sum: f64,
    compensation: f64,
}

#[cfg(feature = "statistics")]
impl KahanSum {
    #[inline]
    pub fn add(&mut self, x: f64) {
        let y = x - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    #[inline]
    pub fn remove(&mut self, x: f64) {
        self.add(-x);
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(core::iter::empty()), 0.0);
    }

    #[test]
    fn test_mean_constant_is_exact() {
        let data = [0.1; 7];
        let mu = mean(data.iter().copied());
        assert_eq!(mu, 0.1);
        assert_eq!(population_stddev(data.iter().copied(), mu), 0.0);
    }

    #[test]
    fn test_population_stddev() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mu = mean(data.iter().copied());
        assert!((mu - 5.0).abs() < 1e-12);
        assert!((population_stddev(data.iter().copied(), mu) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_magnitudes_stay_finite() {
        for big in [1e200, 1.5e308] {
            let data = [big, -big];
            let mu = mean(data.iter().copied());
            assert_eq!(mu, 0.0);
            let sigma = population_stddev(data.iter().copied(), mu);
            assert!(sigma.is_finite());
            assert!((sigma / big - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zscore_overflowing_difference() {
        // value - mean overflows to -inf, the score must not
        let z = zscore(-1.7e308, 1.0e308, 1.0e308);
        assert!(z.is_finite());
        assert!((z - 2.7).abs() < 1e-9);
    }

    #[cfg(feature = "statistics")]
    #[test]
    fn test_kahan_rolling_sum() {
        let mut sum = KahanSum::default();
        for _ in 0..10 {
            sum.add(0.1);
        }
        assert!((sum.value() - 1.0).abs() < 1e-12);
        sum.remove(0.1);
        assert!((sum.value() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_zscore_flat_sigma() {
        assert_eq!(zscore(7.0, 5.0, 0.0), 2.0);
        assert_eq!(zscore(5.0, 5.0, 0.0), 0.0);
        assert!((zscore(1.0, 5.0, 2.0) - 2.0).abs() < 1e-12);
    }
}
