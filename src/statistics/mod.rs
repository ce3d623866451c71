//! Pure summaries over sample sequences
//!
//! This module provides rollups, rolling averages and the preprocessing
//! helpers (min-max scaling, clamping, fixed-size chunks) applied to metric
//! series before analysis. Nothing here holds state between calls.
//!
//! # Example
//!
//! ```
//! use driftwatch::statistics::{compute_rollup, rolling_average};
//!
//! let latency_ms = [12.0, 14.0, 13.0, 40.0, 12.5];
//!
//! let rollup = compute_rollup(&latency_ms);
//! println!("avg={} max={} min={} n={}", rollup.average, rollup.max, rollup.min, rollup.count);
//!
//! let smoothed = rolling_average(&latency_ms, 3);
//! assert_eq!(smoothed.len(), latency_ms.len());
//! ```

mod preprocess;
mod rollup;

pub use preprocess::{clamp, normalize, sliding_window};
pub use rollup::{compute_rollup, rolling_average, Rollup};
