//! Streaming anomaly scoring
//!
//! [`StreamingStatsEngine`] turns a live or batch stream of health metrics into
//! per-sample z-scores over a bounded rolling window.
//!
//! # Example
//!
//! ```
//! use driftwatch::anomaly::{EngineConfig, StreamingStatsEngine};
//!
//! let mut engine = StreamingStatsEngine::with_config(EngineConfig::new(8).with_anomaly_z(2.0));
//!
//! let npu_temp = [61.0, 62.0, 61.5, 62.5, 61.0, 62.0, 61.5, 62.0, 61.8, 75.0];
//! let flagged = engine.flag_configured(&npu_temp);
//! assert_eq!(flagged, vec![9]);
//! ```
//!
//! One engine owns one window. To watch several streams, keep one engine per
//! stream; to share an engine across threads, wrap it in a mutex.

mod engine;

pub use engine::{EngineConfig, StreamingStatsEngine, DEFAULT_CAPACITY};
pub use crate::traits::EngineState;
