//! Windowed z-score scoring engine

use crate::detection::{self, DEFAULT_Z_THRESHOLD};
use crate::math;
use crate::statistics::{self, Rollup};
use crate::traits::{ConfigError, EngineState, Scorer};
use crate::window::RollingWindow;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Default rolling window capacity
pub const DEFAULT_CAPACITY: usize = 5;

/// Engine configuration
///
/// # Example
///
/// ```
/// use driftwatch::anomaly::EngineConfig;
///
/// let config = EngineConfig::new(30).with_anomaly_z(2.5);
/// assert_eq!(config.capacity, 30);
/// assert!(config.validate().is_ok());
/// assert!(EngineConfig::new(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Rolling window capacity; the engine is steady once this many samples arrived
    pub capacity: usize,
    /// Z-score threshold used by [`StreamingStatsEngine::flag_configured`]
    pub anomaly_z: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            anomaly_z: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Config with the given capacity and the default threshold
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_anomaly_z(mut self, anomaly_z: f64) -> Self {
        self.anomaly_z = anomaly_z;
        self
    }

    /// Strict check, for callers that want rejection instead of clamping
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.anomaly_z.is_nan() || self.anomaly_z < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.anomaly_z));
        }
        Ok(())
    }
}

/// Streaming statistics engine over a bounded rolling window
///
/// Each [`update`](Self::update) pushes a sample into the window (evicting the
/// oldest once full) and scores it as `|x - mean| / population_stddev` over the
/// window contents, including the sample itself. Until the window first
/// reaches capacity the engine is [`EngineState::Filling`] and every score is
/// `0.0`; from then on it stays [`EngineState::Steady`].
///
/// The engine also exposes the crate's pure helpers (rolling average, rollup,
/// drift and threshold flags) as associated functions. Those never read or
/// touch the window.
///
/// # Example
///
/// ```
/// use driftwatch::anomaly::StreamingStatsEngine;
///
/// let mut engine = StreamingStatsEngine::new(3);
/// let scores = engine.bulk_score(&[10.0, 10.0, 10.0, 20.0]);
///
/// assert_eq!(&scores[..3], &[0.0, 0.0, 0.0]);
/// assert!((scores[3] - 2f64.sqrt()).abs() < 1e-9);
/// assert!(engine.is_steady());
/// ```
///
/// Batch calls are cumulative: a second `bulk_score` continues from the window
/// left by the first. Call [`clear`](Self::clear) between unrelated series, or
/// use one engine per monitored stream.
#[derive(Clone, Debug)]
pub struct StreamingStatsEngine {
    window: RollingWindow,
    anomaly_z: f64,
    state: EngineState,
    /// Samples fed since creation or the last clear
    seen: u64,
}

impl Default for StreamingStatsEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl StreamingStatsEngine {
    /// Create an engine with the given window capacity
    ///
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(EngineConfig::new(capacity))
    }

    /// Create an engine from a config, normalizing invalid values
    ///
    /// Capacity 0 becomes 1; a NaN or negative `anomaly_z` falls back to the
    /// default threshold.
    pub fn with_config(config: EngineConfig) -> Self {
        let anomaly_z = if config.anomaly_z.is_nan() || config.anomaly_z < 0.0 {
            log::warn!(
                "invalid anomaly_z {} replaced by {}",
                config.anomaly_z,
                DEFAULT_Z_THRESHOLD
            );
            DEFAULT_Z_THRESHOLD
        } else {
            config.anomaly_z
        };

        Self {
            window: RollingWindow::new(config.capacity),
            anomaly_z,
            state: EngineState::Filling,
            seen: 0,
        }
    }

    /// Create an engine, rejecting invalid config instead of clamping
    pub fn try_with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Effective (normalized) configuration
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            capacity: self.window.capacity(),
            anomaly_z: self.anomaly_z,
        }
    }

    /// Feed one sample and return its anomaly score
    ///
    /// Returns `0.0` while the window is filling. A flat window (zero
    /// deviation) uses a sigma of `1.0`. Non-finite input yields `NaN`;
    /// validating samples is the caller's job.
    pub fn update(&mut self, sample: f64) -> f64 {
        self.seen += 1;
        self.window.push(sample);

        if !self.window.is_full() {
            log::trace!(
                "filling: {}/{} samples",
                self.window.len(),
                self.window.capacity()
            );
            return 0.0;
        }

        if self.state == EngineState::Filling {
            self.state = EngineState::Steady;
            log::debug!("engine steady after {} samples", self.seen);
        }

        let (mu, sigma) = self.window.moments();
        let score = math::zscore(sample, mu, sigma);
        log::trace!("sample={} mean={} sigma={} score={}", sample, mu, sigma, score);
        score
    }

    /// Score a batch in order, continuing from the current window
    pub fn bulk_score(&mut self, samples: &[f64]) -> Vec<f64> {
        Scorer::bulk_score(self, samples)
    }

    /// Score model outputs or latency metrics watched alongside a primary model
    pub fn score_outputs(&mut self, outputs: &[f64]) -> Vec<f64> {
        self.bulk_score(outputs)
    }

    /// Indices whose windowed score is strictly above `z_threshold`
    pub fn flag_anomalies(&mut self, samples: &[f64], z_threshold: f64) -> Vec<usize> {
        Scorer::flag_anomalies(self, samples, z_threshold)
    }

    /// [`flag_anomalies`](Self::flag_anomalies) at the configured threshold
    pub fn flag_configured(&mut self, samples: &[f64]) -> Vec<usize> {
        self.flag_anomalies(samples, self.anomaly_z)
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_steady(&self) -> bool {
        Scorer::is_steady(self)
    }

    /// Window capacity
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Samples currently in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Read-only view of the window
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Samples fed since creation or the last clear
    pub fn samples_seen(&self) -> u64 {
        self.seen
    }

    /// Empty the window and return to [`EngineState::Filling`]
    pub fn clear(&mut self) {
        log::debug!("engine cleared after {} samples", self.seen);
        self.window.clear();
        self.state = EngineState::Filling;
        self.seen = 0;
    }

    /// See [`statistics::rolling_average`]
    pub fn rolling_average(samples: &[f64], window_size: usize) -> Vec<f64> {
        statistics::rolling_average(samples, window_size)
    }

    /// See [`statistics::compute_rollup`]
    pub fn compute_rollup(samples: &[f64]) -> Rollup {
        statistics::compute_rollup(samples)
    }

    /// See [`detection::detect_drift`]
    pub fn detect_drift(baseline: &[f64], current: &[f64], tolerance: f64) -> Vec<usize> {
        detection::detect_drift(baseline, current, tolerance)
    }

    /// See [`detection::threshold_anomalies`]
    pub fn threshold_anomalies(samples: &[f64], threshold: f64) -> Vec<usize> {
        detection::threshold_anomalies(samples, threshold)
    }
}

impl Scorer for StreamingStatsEngine {
    fn update(&mut self, sample: f64) -> f64 {
        StreamingStatsEngine::update(self, sample)
    }

    fn clear(&mut self) {
        StreamingStatsEngine::clear(self);
    }

    fn samples_seen(&self) -> u64 {
        self.seen
    }

    fn state(&self) -> EngineState {
        self.state
    }
}
