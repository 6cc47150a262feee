//! Stream sampling algorithms
//!
//! This module provides a bounded random sample of a stream that can be
//! queried for order statistics.
//! Useful when you need percentiles but can't store all data.
//!
//! # Example
//!
//! ```
//! use watchstats::sampling::Reservoir;
//!
//! let mut reservoir = Reservoir::<f64>::with_seed(10, 42).unwrap();
//!
//! // Stream a million samples, keep a uniform sample of 10
//! for i in 0..1_000_000 {
//!     reservoir.add(i as f64);
//! }
//!
//! // Each sample had equal probability of being retained
//! assert_eq!(reservoir.len(), 10);
//! let median = reservoir.median().unwrap();
//! assert!(median >= reservoir.min().unwrap());
//! ```

mod reservoir;

pub use reservoir::Reservoir;
