//! Bounded sample windows
//!
//! The window is the only mutable piece of state in the crate. It is owned by
//! exactly one scorer and never shared.
//!
//! # Example
//!
//! ```
//! use driftwatch::window::RollingWindow;
//!
//! let mut window = RollingWindow::new(5);
//! for v in 0..10 {
//!     window.push(v as f64);
//! }
//! assert_eq!(window.len(), 5);
//! assert_eq!(window.iter().next(), Some(5.0));
//! ```

mod rolling;

pub use rolling::RollingWindow;
