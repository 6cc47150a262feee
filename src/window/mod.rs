//! Time-windowed accumulators
//!
//! Counters, peaks and troughs that restart every window without any shared
//! timer: each accumulator owns the instant its current window opened.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use watchstats::window::TimeWindowAccumulator;
//!
//! let mut peak = TimeWindowAccumulator::peak(0.0_f64, Duration::from_secs(30)).unwrap();
//!
//! peak.update(12.5);
//! peak.update(3.0);
//! assert_eq!(peak.current(), 12.5);
//! ```

mod accumulator;

pub use accumulator::{Combine, TimeWindowAccumulator};
