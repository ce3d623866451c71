//! Series preprocessing: min-max scaling, clamping and fixed-size chunks

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Min-max scale a series into `[0, 1]`
///
/// A flat series (zero span) is divided by `1.0` instead, so every value maps
/// to `0.0`. Empty input gives empty output.
///
/// # Example
///
/// ```
/// use driftwatch::statistics::normalize;
///
/// assert_eq!(normalize(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize(&[7.0, 7.0]), vec![0.0, 0.0]);
/// ```
pub fn normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let (min, max) = values
        .iter()
        .fold((values[0], values[0]), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let span = max - min;
    if span == 0.0 {
        return values.iter().map(|&v| v - min).collect();
    }
    if span.is_finite() {
        values.iter().map(|&v| (v - min) / span).collect()
    } else {
        // Finite bounds whose difference overflowed
        let half_span = max * 0.5 - min * 0.5;
        values
            .iter()
            .map(|&v| (v * 0.5 - min * 0.5) / half_span)
            .collect()
    }
}

/// Clamp every value into `[lower, upper]`
///
/// Computed as `max(lower, min(upper, v))`, so an inverted range yields
/// `lower` everywhere rather than panicking.
pub fn clamp(values: &[f64], lower: f64, upper: f64) -> Vec<f64> {
    values.iter().map(|&v| v.min(upper).max(lower)).collect()
}

/// Split a series into consecutive, non-overlapping chunks of `window` samples
///
/// The last chunk is shorter when the length is not a multiple of `window`.
/// A `window` of 0 is clamped to 1.
///
/// # Example
///
/// ```
/// use driftwatch::statistics::sliding_window;
///
/// let chunks = sliding_window(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
/// assert_eq!(chunks, vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]]);
/// ```
pub fn sliding_window(values: &[f64], window: usize) -> Vec<Vec<f64>> {
    let window = if window == 0 {
        log::warn!("sliding window size 0 clamped to 1");
        1
    } else {
        window
    };

    values.chunks(window).map(|chunk| chunk.to_vec()).collect()
}
