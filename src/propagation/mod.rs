//! Fault propagation tracing
//!
//! Describes, deterministically, how faults injected into a sequence of
//! components reach the monitored metrics, and renders the result for logs
//! and reports.
//!
//! # Example
//!
//! ```
//! use driftwatch::propagation::{build_propagation, render_ascii_graph, DEFAULT_ATTENUATION};
//!
//! let links = build_propagation(&["layer_2", "layer_5"], &["npu_util", "hbm_usage"], DEFAULT_ATTENUATION);
//! println!("{}", render_ascii_graph(&links));
//! ```

mod chain;

pub use chain::{
    build_propagation, render_ascii_graph, summarize_propagation, PropagationLink,
    PropagationSummary, Signal, DEFAULT_ATTENUATION, INPUT_NODE,
};
