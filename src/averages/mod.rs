//! Time-decayed averages
//!
//! Averages whose memory is expressed as a half-life in wall-clock time
//! rather than a fixed smoothing constant, so irregular polling intervals
//! are weighted correctly.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use watchstats::averages::ExponentialMovingAverage;
//!
//! let mut load = ExponentialMovingAverage::new(Duration::from_secs(60)).unwrap();
//!
//! load.accept(0.75);
//! assert_eq!(load.value().unwrap(), 0.75);
//! ```

mod ema;

pub use ema::ExponentialMovingAverage;
