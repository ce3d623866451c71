//! Rollup summaries and rolling averages
//!
//! Both are pure functions over a slice: they never touch scorer state and
//! are recomputed on every call.

use crate::math::{self, KahanSum};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Aggregate `{average, max, min, count}` over a finite sequence
///
/// An empty sequence rolls up to all zeros rather than an error.
///
/// # Example
///
/// ```
/// use driftwatch::statistics::{compute_rollup, Rollup};
///
/// let rollup = compute_rollup(&[0.25, 0.75, 0.5]);
/// assert!((rollup.average - 0.5).abs() < 1e-12);
/// assert_eq!(rollup.max, 0.75);
/// assert_eq!(rollup.min, 0.25);
/// assert_eq!(rollup.count, 3);
///
/// assert_eq!(compute_rollup(&[]), Rollup::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rollup {
    /// Arithmetic mean, `0.0` when empty
    pub average: f64,
    /// Largest sample, `0.0` when empty
    pub max: f64,
    /// Smallest sample, `0.0` when empty
    pub min: f64,
    /// Number of samples
    pub count: usize,
}

impl Rollup {
    /// Roll up a slice of samples
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for &v in samples {
            if v > max {
                max = v;
            }
            if v < min {
                min = v;
            }
        }

        Self {
            average: math::mean(samples.iter().copied()),
            max,
            min,
            count: samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Spread between max and min, `0.0` when empty
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Sum of the rolled-up samples
    pub fn sum(&self) -> f64 {
        self.average * self.count as f64
    }

    /// Combine with a rollup of another sequence
    ///
    /// The result equals the rollup of both sequences concatenated (up to
    /// float rounding of the average). Lets collectors roll up shards
    /// independently.
    pub fn merge(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }

        let count = self.count + other.count;
        let delta = other.average - self.average;
        Self {
            average: self.average + delta * (other.count as f64 / count as f64),
            max: self.max.max(other.max),
            min: self.min.min(other.min),
            count,
        }
    }
}

/// Roll up a slice of samples
///
/// Never fails; `compute_rollup(&[])` is all zeros.
pub fn compute_rollup(samples: &[f64]) -> Rollup {
    Rollup::from_samples(samples)
}

/// Rolling average with partial windows at the start
///
/// Output index `i` is the mean of `samples[max(0, i + 1 - window_size)..=i]`.
/// The output always has the same length as the input. A `window_size` of 0 is
/// clamped to 1, which returns the input unchanged.
///
/// Runs in O(n) over a compensated running sum.
///
/// # Example
///
/// ```
/// use driftwatch::statistics::rolling_average;
///
/// assert_eq!(rolling_average(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.0, 1.5, 2.5, 3.5]);
/// ```
pub fn rolling_average(samples: &[f64], window_size: usize) -> Vec<f64> {
    let window_size = if window_size == 0 {
        log::warn!("rolling average window size 0 clamped to 1");
        1
    } else {
        window_size
    };

    let mut averages = Vec::with_capacity(samples.len());
    let mut sum = KahanSum::default();
    for (idx, &sample) in samples.iter().enumerate() {
        if idx >= window_size {
            sum.remove(samples[idx - window_size]);
        }
        sum.add(sample);

        let start = (idx + 1).saturating_sub(window_size);
        let average = sum.value() / (idx + 1 - start) as f64;
        if average.is_finite() {
            averages.push(average);
        } else {
            // Overflowed or non-finite running sum: rebuild it from the live window
            let live = &samples[start..=idx];
            sum = KahanSum::default();
            for &v in live {
                sum.add(v);
            }
            averages.push(math::mean(live.iter().copied()));
        }
    }
    averages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_average_long_series_matches_slice_mean() {
        let samples: Vec<f64> = (0..2_000).map(|i| ((i * 7919) % 1009) as f64 * 0.37 - 150.0).collect();
        let out = rolling_average(&samples, 25);
        for (idx, avg) in out.iter().enumerate() {
            let start = (idx + 1).saturating_sub(25);
            let expected = math::mean(samples[start..=idx].iter().copied());
            assert!((avg - expected).abs() < 1e-9, "index {}: {} vs {}", idx, avg, expected);
        }
    }

    #[test]
    fn test_rolling_average_extreme_values_finite() {
        let out = rolling_average(&[1.5e308, 1.5e308, -1.5e308, 1.0], 2);
        assert_eq!(out[0], 1.5e308);
        assert_eq!(out[1], 1.5e308);
        assert_eq!(out[2], 0.0);
        assert!(out.iter().all(|v| v.is_finite()));
        assert!((out[3] + 0.75e308).abs() / 0.75e308 < 1e-12);
    }

    #[test]
    fn test_rollup_basic() {
        let rollup = compute_rollup(&[3.0, 1.0, 2.0]);
        assert!((rollup.average - 2.0).abs() < 1e-12);
        assert_eq!(rollup.max, 3.0);
        assert_eq!(rollup.min, 1.0);
        assert_eq!(rollup.count, 3);
        assert_eq!(rollup.range(), 2.0);
        assert!((rollup.sum() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_rollup_empty() {
        let rollup = compute_rollup(&[]);
        assert_eq!(rollup.average, 0.0);
        assert_eq!(rollup.max, 0.0);
        assert_eq!(rollup.min, 0.0);
        assert_eq!(rollup.count, 0);
        assert!(rollup.is_empty());
        assert_eq!(rollup.range(), 0.0);
    }

    #[test]
    fn test_rollup_negative_values() {
        // max/min must not be biased towards the 0.0 empty default
        let rollup = compute_rollup(&[-3.0, -1.0]);
        assert_eq!(rollup.max, -1.0);
        assert_eq!(rollup.min, -3.0);
    }

    #[test]
    fn test_rollup_merge() {
        let left = compute_rollup(&[1.0, 2.0, 3.0]);
        let right = compute_rollup(&[4.0, 5.0, 6.0]);
        let merged = left.merge(&right);
        let direct = compute_rollup(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(merged.count, direct.count);
        assert!((merged.average - direct.average).abs() < 1e-12);
        assert_eq!(merged.max, 6.0);
        assert_eq!(merged.min, 1.0);
    }

    #[test]
    fn test_rollup_merge_empty() {
        let left = compute_rollup(&[1.0, 2.0]);
        assert_eq!(left.merge(&Rollup::default()), left);
        assert_eq!(Rollup::default().merge(&left), left);
    }

    #[test]
    fn test_rolling_average_partial_windows() {
        assert_eq!(
            rolling_average(&[1.0, 2.0, 3.0, 4.0], 2),
            vec![1.0, 1.5, 2.5, 3.5]
        );
    }

    #[test]
    fn test_rolling_average_window_larger_than_input() {
        let out = rolling_average(&[2.0, 4.0, 6.0], 10);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rolling_average_zero_window() {
        let input = [5.0, 1.0, 3.0];
        assert_eq!(rolling_average(&input, 0), input.to_vec());
        assert_eq!(rolling_average(&input, 1), input.to_vec());
    }

    #[test]
    fn test_rolling_average_empty() {
        assert!(rolling_average(&[], 3).is_empty());
    }
}
