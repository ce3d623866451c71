//! Core traits and error types
//!
//! Windowed scorers implement [`Scorer`]; configuration problems surface as
//! [`ConfigError`] on the strict construction paths.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Invalid scorer or window configuration
///
/// The permissive constructors clamp instead of returning this; it is only
/// produced by explicit validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Window capacity must be at least 1
    ZeroCapacity,
    /// Threshold is NaN or negative
    InvalidThreshold(f64),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "window capacity must be at least 1"),
            ConfigError::InvalidThreshold(t) => {
                write!(f, "invalid z-score threshold: {}", t)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Lifecycle of a windowed scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    /// Window not yet at capacity, every score is `0.0`
    Filling,
    /// Window at capacity, scores are real z-scores
    Steady,
}

/// Stateful per-sample anomaly scorer
///
/// Scoring mutates the scorer: batch helpers are equivalent to repeated
/// [`update`](Scorer::update) calls and continue from whatever history the
/// scorer already holds.
pub trait Scorer: Clone + Debug {
    /// Feed one sample and return its anomaly score
    fn update(&mut self, sample: f64) -> f64;

    /// Reset to an empty history
    fn clear(&mut self);

    /// Total number of samples fed since creation or the last clear
    fn samples_seen(&self) -> u64;

    /// Current lifecycle state
    fn state(&self) -> EngineState;

    /// Score a batch in order
    fn bulk_score(&mut self, samples: &[f64]) -> Vec<f64> {
        samples.iter().map(|&s| self.update(s)).collect()
    }

    /// Indices of samples whose score is strictly above `z_threshold`
    fn flag_anomalies(&mut self, samples: &[f64], z_threshold: f64) -> Vec<usize> {
        self.bulk_score(samples)
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > z_threshold)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Check if scores are real z-scores yet
    fn is_steady(&self) -> bool {
        self.state() == EngineState::Steady
    }
}
