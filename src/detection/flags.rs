//! Index-flagging detectors over whole sequences

use crate::math;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Default threshold for [`detect_spikes`] callers that have no tuned value
pub const DEFAULT_SPIKE_THRESHOLD: f64 = 0.2;

/// Default tolerance for [`detect_drift`] callers that have no tuned value
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.1;

/// Default z-score threshold for batch and windowed scoring
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Indices where the sample is strictly above `threshold`
///
/// No smoothing is applied.
///
/// ```
/// use driftwatch::detection::threshold_anomalies;
///
/// assert_eq!(threshold_anomalies(&[0.1, 0.3, 0.05], 0.2), vec![1]);
/// ```
pub fn threshold_anomalies(samples: &[f64], threshold: f64) -> Vec<usize> {
    samples
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > threshold)
        .map(|(idx, _)| idx)
        .collect()
}

/// Fault-analysis name for [`threshold_anomalies`]
pub fn detect_spikes(samples: &[f64], threshold: f64) -> Vec<usize> {
    threshold_anomalies(samples, threshold)
}

/// Indices where `current` deviates from `baseline` by more than `tolerance`
///
/// Only the common prefix `0..min(baseline.len(), current.len())` is
/// compared. Extra trailing samples on either side are ignored, never
/// flagged.
///
/// ```
/// use driftwatch::detection::detect_drift;
///
/// let baseline = [1.0, 1.0, 1.0];
/// let current = [1.05, 1.5, 0.7, 9.0];
/// assert_eq!(detect_drift(&baseline, &current, 0.1), vec![1, 2]);
/// ```
pub fn detect_drift(baseline: &[f64], current: &[f64], tolerance: f64) -> Vec<usize> {
    baseline
        .iter()
        .zip(current.iter())
        .enumerate()
        .filter(|&(_, (&b, &c))| math::abs(c - b) > tolerance)
        .map(|(idx, _)| idx)
        .collect()
}

/// Batch z-score detector over the whole input
///
/// Mean and population standard deviation come from the entire slice rather
/// than a rolling window. A flat input uses a sigma of `1.0`. Empty input
/// flags nothing.
pub fn zscore_anomalies(samples: &[f64], z_threshold: f64) -> Vec<usize> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mu = math::mean(samples.iter().copied());
    let sigma = math::population_stddev(samples.iter().copied(), mu);

    samples
        .iter()
        .enumerate()
        .filter(|&(_, &v)| math::zscore(v, mu, sigma) > z_threshold)
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_strict() {
        assert_eq!(threshold_anomalies(&[0.1, 0.3, 0.05], 0.2), vec![1]);
        // Equal to the threshold is not a spike
        assert!(threshold_anomalies(&[0.2, 0.2], 0.2).is_empty());
        assert!(threshold_anomalies(&[], 0.2).is_empty());
    }

    #[test]
    fn test_detect_spikes_default() {
        let metrics = [0.05, 0.21, 0.19, 0.9];
        assert_eq!(detect_spikes(&metrics, DEFAULT_SPIKE_THRESHOLD), vec![1, 3]);
    }

    #[test]
    fn test_drift_truncates_to_shorter() {
        let baseline = [0.0, 0.0];
        let current = [0.0, 0.5, 10.0, 10.0];
        assert_eq!(detect_drift(&baseline, &current, 0.1), vec![1]);
        assert_eq!(detect_drift(&current, &baseline, 0.1), vec![1]);
    }

    #[test]
    fn test_drift_strict_tolerance() {
        let baseline = [1.0, 2.0];
        let current = [1.5, 2.5];
        assert!(detect_drift(&baseline, &current, 0.5).is_empty());
        assert_eq!(detect_drift(&baseline, &current, 0.4), vec![0, 1]);
    }

    #[test]
    fn test_drift_empty() {
        assert!(detect_drift(&[], &[1.0, 2.0], DEFAULT_DRIFT_TOLERANCE).is_empty());
    }

    #[test]
    fn test_zscore_anomalies() {
        let mut samples = vec![1.0; 20];
        samples.push(50.0);
        assert_eq!(zscore_anomalies(&samples, DEFAULT_Z_THRESHOLD), vec![20]);
    }

    #[test]
    fn test_zscore_flat_and_empty() {
        assert!(zscore_anomalies(&[4.0, 4.0, 4.0], 0.0).is_empty());
        assert!(zscore_anomalies(&[], 1.0).is_empty());
    }
}
