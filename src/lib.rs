//! # Driftwatch
//!
//! Streaming statistics for health metrics of monitored compute systems.
//!
//! Driftwatch turns ordered series of scalar readings (NPU utilization,
//! latency, memory pressure, model outputs under fault injection) into
//! rollups, rolling averages and anomaly flags. It does no I/O: collectors,
//! exporters and dashboards feed it `f64` slices and consume what it returns.
//!
//! ## Features
//!
//! - **Windowed Anomaly Scoring**: z-scores over a bounded rolling window
//! - **Stateless Detectors**: threshold, baseline drift and batch z-score flags
//! - **Summaries**: rollups and rolling averages with partial leading windows
//! - **Preprocessing**: min-max scaling, clamping and fixed-size chunking
//! - **Fault Propagation**: deterministic injection-to-monitor chains
//!
//! ## Quick Start
//!
//! ```rust
//! use driftwatch::prelude::*;
//!
//! // Score a latency stream over a window of 4 samples
//! let mut engine = StreamingStatsEngine::new(4);
//! let latency_ms = [20.0, 21.0, 20.5, 19.5, 20.0, 48.0];
//! let scores = engine.bulk_score(&latency_ms);
//! assert_eq!(&scores[..3], &[0.0, 0.0, 0.0]);
//! assert!(scores[5] > 1.5);
//!
//! // Pure helpers need no engine state
//! let rollup = compute_rollup(&latency_ms);
//! assert_eq!(rollup.count, 6);
//! assert_eq!(threshold_anomalies(&latency_ms, 30.0), vec![5]);
//! ```
//!
//! ## Concurrency
//!
//! Everything is synchronous and CPU-bound. A [`StreamingStatsEngine`] owns its
//! window exclusively; use one engine per monitored stream, or guard a shared
//! engine with a mutex.
//!
//! ## Feature Flags
//!
//! Algorithm families:
//! - `anomaly` (default): windowed z-score engine (pulls in `statistics` and `detection`)
//! - `statistics` (default): rollups and rolling averages
//! - `detection` (default): threshold, drift and batch z-score detectors
//! - `propagation`: fault propagation chains
//! - `full`: Enable all algorithm families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization of configs, windows and summaries

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;

// Core traits and the window are always available
pub mod traits;
pub mod window;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "detection")]
#[cfg_attr(docsrs, doc(cfg(feature = "detection")))]
pub mod detection;

#[cfg(feature = "anomaly")]
#[cfg_attr(docsrs, doc(cfg(feature = "anomaly")))]
pub mod anomaly;

#[cfg(feature = "propagation")]
#[cfg_attr(docsrs, doc(cfg(feature = "propagation")))]
pub mod propagation;

pub mod prelude {
    pub use crate::traits::*;
    pub use crate::window::RollingWindow;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::{compute_rollup, rolling_average, Rollup};

    #[cfg(feature = "detection")]
    pub use crate::detection::{detect_drift, detect_spikes, threshold_anomalies, zscore_anomalies};

    #[cfg(feature = "anomaly")]
    pub use crate::anomaly::{EngineConfig, StreamingStatsEngine};

    #[cfg(feature = "propagation")]
    pub use crate::propagation::{build_propagation, render_ascii_graph, PropagationLink};
}

#[cfg(feature = "anomaly")]
pub use anomaly::{EngineConfig, StreamingStatsEngine};

#[cfg(feature = "statistics")]
pub use statistics::Rollup;

pub use traits::{ConfigError, EngineState, Scorer};
pub use window::RollingWindow;
