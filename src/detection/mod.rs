//! Stateless anomaly detectors
//!
//! Each detector takes whole sequences and returns the 0-based indices it
//! flags. Comparisons are strict: a value exactly on the threshold is never
//! flagged.
//!
//! # Detectors
//!
//! - [`threshold_anomalies`] / [`detect_spikes`]: raw value above a threshold
//! - [`detect_drift`]: element-wise deviation from a baseline
//! - [`zscore_anomalies`]: z-score against the whole batch
//!
//! For windowed, streaming z-scores see [`StreamingStatsEngine`](crate::anomaly::StreamingStatsEngine).

mod flags;

pub use flags::{
    detect_drift, detect_spikes, threshold_anomalies, zscore_anomalies, DEFAULT_DRIFT_TOLERANCE,
    DEFAULT_SPIKE_THRESHOLD, DEFAULT_Z_THRESHOLD,
};
