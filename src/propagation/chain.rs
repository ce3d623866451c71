//! Fault propagation chains

use crate::math;
use core::fmt::{self, Write};

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Default per-hop attenuation of an injected fault signal
pub const DEFAULT_ATTENUATION: f64 = 0.8;

/// Root node every chain starts from
pub const INPUT_NODE: &str = "input";

/// Kind of edge in a propagation chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Signal {
    /// Fault injected into the target node
    Inject,
    /// Target node observes the upstream fault
    Observe,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Inject => "inject",
            Signal::Observe => "observe",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directed hop of a fault signal
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropagationLink {
    pub source: String,
    pub target: String,
    pub signal: Signal,
    /// Remaining signal strength on this hop, in `(0, 1]` for attenuation in `(0, 1]`
    pub intensity: f64,
}

/// Build the deterministic chain of links from injected faults to monitors
///
/// Injections are chained in order starting from [`INPUT_NODE`]; hop `i`
/// carries `attenuation^i`. Every monitor then observes the last node in the
/// chain at `attenuation^(injections + 1)`.
///
/// ```
/// use driftwatch::propagation::{build_propagation, Signal};
///
/// let links = build_propagation(&["conv1", "fc2"], &["latency"], 0.5);
/// assert_eq!(links.len(), 3);
/// assert_eq!(links[0].source, "input");
/// assert_eq!(links[1].intensity, 0.5);
/// assert_eq!(links[2].signal, Signal::Observe);
/// assert_eq!(links[2].source, "fc2");
/// assert_eq!(links[2].intensity, 0.125);
/// ```
pub fn build_propagation<I, M>(
    injections: &[I],
    monitored: &[M],
    attenuation: f64,
) -> Vec<PropagationLink>
where
    I: AsRef<str>,
    M: AsRef<str>,
{
    let mut links = Vec::with_capacity(injections.len() + monitored.len());
    let mut previous = String::from(INPUT_NODE);

    for (idx, injection) in injections.iter().enumerate() {
        let target = String::from(injection.as_ref());
        links.push(PropagationLink {
            source: previous,
            target: target.clone(),
            signal: Signal::Inject,
            intensity: math::powi(attenuation, idx as i32),
        });
        previous = target;
    }

    let observed = math::powi(attenuation, injections.len() as i32 + 1);
    for monitor in monitored {
        links.push(PropagationLink {
            source: previous.clone(),
            target: String::from(monitor.as_ref()),
            signal: Signal::Observe,
            intensity: observed,
        });
    }

    links
}

/// Propagation chain plus the metric values it impacted
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropagationSummary {
    pub links: Vec<PropagationLink>,
    /// Metric name and sampled value, in the order given
    pub impacted_metrics: Vec<(String, f64)>,
}

impl PropagationSummary {
    /// Readable path: one line per link, then a `metrics:` line if any
    ///
    /// ```
    /// use driftwatch::propagation::{build_propagation, summarize_propagation};
    ///
    /// let links = build_propagation(&["layer_3"], &["npu_util"], 0.8);
    /// let summary = summarize_propagation(links, [("npu_util", 0.4127)]);
    /// assert_eq!(
    ///     summary.as_path(),
    ///     "input -[inject:1.00]-> layer_3\n\
    ///      layer_3 -[observe:0.64]-> npu_util\n\
    ///      metrics: npu_util=0.413"
    /// );
    /// ```
    pub fn as_path(&self) -> String {
        let mut out = String::new();
        for link in &self.links {
            push_line(&mut out);
            // Writing into a String cannot fail
            let _ = write!(
                out,
                "{} -[{}:{:.2}]-> {}",
                link.source, link.signal, link.intensity, link.target
            );
        }

        if !self.impacted_metrics.is_empty() {
            push_line(&mut out);
            out.push_str("metrics: ");
            for (idx, (name, value)) in self.impacted_metrics.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}={:.3}", name, value);
            }
        }

        out
    }
}

/// Pair a chain with the metric samples observed during the fault run
///
/// Metric names are unique in the summary. A repeated name keeps the
/// position of its first occurrence and the value of its last.
pub fn summarize_propagation<L, M, K>(links: L, metric_samples: M) -> PropagationSummary
where
    L: IntoIterator<Item = PropagationLink>,
    M: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut impacted_metrics: Vec<(String, f64)> = Vec::new();
    for (name, value) in metric_samples {
        let name = name.as_ref();
        match impacted_metrics.iter_mut().find(|(seen, _)| seen.as_str() == name) {
            Some(entry) => entry.1 = value,
            None => impacted_metrics.push((String::from(name), value)),
        }
    }

    PropagationSummary {
        links: links.into_iter().collect(),
        impacted_metrics,
    }
}

/// Compact ASCII rendering, one `src --signal(0.00)--> dst` line per link
pub fn render_ascii_graph(links: &[PropagationLink]) -> String {
    let mut out = String::new();
    for link in links {
        push_line(&mut out);
        let _ = write!(
            out,
            "{} --{}({:.2})--> {}",
            link.source, link.signal, link.intensity, link.target
        );
    }
    out
}

fn push_line(out: &mut String) {
    if !out.is_empty() {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_intensities() {
        let links = build_propagation(&["a", "b", "c"], &["m1", "m2"], 0.5);
        assert_eq!(links.len(), 5);

        let hops: Vec<_> = links.iter().map(|l| (l.source.as_str(), l.target.as_str())).collect();
        assert_eq!(
            hops,
            vec![("input", "a"), ("a", "b"), ("b", "c"), ("c", "m1"), ("c", "m2")]
        );
        assert_eq!(links[0].intensity, 1.0);
        assert_eq!(links[1].intensity, 0.5);
        assert_eq!(links[2].intensity, 0.25);
        // Observers sit one hop past the last injection
        assert_eq!(links[3].intensity, 0.0625);
        assert_eq!(links[4].intensity, 0.0625);
    }

    #[test]
    fn test_no_injections() {
        let links = build_propagation::<&str, _>(&[], &["temp"], DEFAULT_ATTENUATION);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source, INPUT_NODE);
        assert_eq!(links[0].signal, Signal::Observe);
        assert!((links[0].intensity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_ascii_graph() {
        let links = build_propagation(&["layer_0"], &["latency"], 0.8);
        assert_eq!(
            render_ascii_graph(&links),
            "input --inject(1.00)--> layer_0\nlayer_0 --observe(0.64)--> latency"
        );
        assert_eq!(render_ascii_graph(&[]), "");
    }

    #[test]
    fn test_path_without_metrics() {
        let links = build_propagation(&["x"], &[] as &[&str], 0.9);
        let summary = summarize_propagation(links, core::iter::empty::<(&str, f64)>());
        assert_eq!(summary.as_path(), "input -[inject:1.00]-> x");
    }

    #[test]
    fn test_path_metrics_keep_order() {
        let summary = summarize_propagation(
            Vec::new(),
            vec![("zeta", 1.0), ("alpha", 0.5)],
        );
        assert_eq!(summary.as_path(), "metrics: zeta=1.000, alpha=0.500");
    }

    #[test]
    fn test_repeated_metric_keeps_last_value() {
        let summary = summarize_propagation(
            Vec::new(),
            vec![("a", 1.0), ("b", 3.0), ("a", 2.0)],
        );
        assert_eq!(
            summary.impacted_metrics,
            vec![("a".to_string(), 2.0), ("b".to_string(), 3.0)]
        );
        assert_eq!(summary.as_path(), "metrics: a=2.000, b=3.000");
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Inject.to_string(), "inject");
        assert_eq!(Signal::Observe.to_string(), "observe");
    }
}
