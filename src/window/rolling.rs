//! Bounded FIFO of the most recent samples

use crate::math;

#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;

/// Fixed-capacity rolling window of `f64` samples
///
/// Insertion order is preserved. Once the window holds `capacity` samples,
/// every push evicts the oldest one, so `len() <= capacity()` always holds.
///
/// # Example
///
/// ```
/// use driftwatch::window::RollingWindow;
///
/// let mut window = RollingWindow::new(3);
/// for v in [1.0, 2.0, 3.0] {
///     assert_eq!(window.push(v), None);
/// }
/// assert_eq!(window.push(4.0), Some(1.0));
/// assert_eq!(window.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
/// assert!((window.mean() - 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RollingWindow {
    /// Maximum number of samples retained, at least 1
    capacity: usize,
    /// Oldest sample at the front
    samples: VecDeque<f64>,
}

impl RollingWindow {
    /// Create an empty window
    ///
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            log::warn!("rolling window capacity 0 clamped to 1");
            1
        } else {
            capacity
        };

        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, returning the evicted one if the window was full
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if the window holds `capacity` samples
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.samples.iter().copied()
    }

    /// Most recently pushed sample
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Mean of the retained samples, `0.0` when empty
    pub fn mean(&self) -> f64 {
        math::mean(self.iter())
    }

    /// Population standard deviation of the retained samples
    pub fn population_stddev(&self) -> f64 {
        self.moments().1
    }

    /// Mean and population standard deviation, computing the mean once
    pub fn moments(&self) -> (f64, f64) {
        let mu = self.mean();
        (mu, math::population_stddev(self.iter(), mu))
    }

    /// Drop all samples, keeping the capacity
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RollingWindow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("RollingWindow", 2)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("samples", &self.samples)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RollingWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[cfg(not(feature = "std"))]
        use alloc::vec::Vec;

        #[derive(serde::Deserialize)]
        struct WindowData {
            capacity: usize,
            samples: Vec<f64>,
        }

        let data = WindowData::deserialize(deserializer)?;
        // Replaying through push keeps the newest `capacity` samples.
        let mut window = RollingWindow::new(data.capacity);
        for sample in data.samples {
            window.push(sample);
        }
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_evict() {
        let mut window = RollingWindow::new(2);
        assert!(window.is_empty());
        assert_eq!(window.push(1.0), None);
        assert!(!window.is_full());
        assert_eq!(window.push(2.0), None);
        assert!(window.is_full());
        assert_eq!(window.push(3.0), Some(1.0));
        assert_eq!(window.len(), 2);
        assert_eq!(window.latest(), Some(3.0));
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut window = RollingWindow::new(0);
        assert_eq!(window.capacity(), 1);
        window.push(5.0);
        assert_eq!(window.push(6.0), Some(5.0));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_moments() {
        let mut window = RollingWindow::new(3);
        for v in [10.0, 10.0, 10.0, 20.0] {
            window.push(v);
        }
        assert!((window.mean() - 40.0 / 3.0).abs() < 1e-12);
        let expected = (200.0f64 / 9.0).sqrt();
        assert!((window.population_stddev() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_moments_match_accessors() {
        let mut window = RollingWindow::new(4);
        for v in [3.0, 1.0, 4.0, 1.0, 5.0] {
            window.push(v);
        }
        let (mu, sigma) = window.moments();
        assert_eq!(mu, window.mean());
        assert_eq!(sigma, window.population_stddev());
    }

    #[test]
    fn test_extreme_values_finite_moments() {
        let mut window = RollingWindow::new(2);
        window.push(1.5e308);
        window.push(-1.5e308);
        let (mu, sigma) = window.moments();
        assert_eq!(mu, 0.0);
        assert!((sigma - 1.5e308).abs() / 1.5e308 < 1e-12);
    }

    #[test]
    fn test_empty_moments() {
        let window = RollingWindow::new(4);
        assert_eq!(window.mean(), 0.0);
        assert_eq!(window.population_stddev(), 0.0);
        assert_eq!(window.latest(), None);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut window = RollingWindow::new(3);
        window.push(1.0);
        window.push(2.0);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 3);
    }
}
