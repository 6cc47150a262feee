//! # Watchstats
//!
//! Streaming statistics primitives for health monitoring.
//!
//! Watchstats turns raw, high-frequency attribute samples into decision-ready
//! signals without retaining unbounded history. Every primitive updates in
//! O(1) or O(log capacity) time and uses a fixed amount of memory regardless
//! of stream length.
//!
//! ## Features
//!
//! - **Order Statistics**: Median, quantiles, rank and membership over a
//!   bounded random sample with [`Reservoir`]
//! - **Windowed Accumulators**: Sums, peaks and troughs that reset every
//!   window with [`TimeWindowAccumulator`]
//! - **Decayed Averages**: Half-life moving averages that handle irregular
//!   sampling intervals with [`ExponentialMovingAverage`]
//! - **Correlation**: Online Pearson coefficient with [`OnlineCorrelation`]
//!
//! ## Quick Start
//!
//! ```rust
//! use watchstats::prelude::*;
//!
//! // Track response-time percentiles in bounded memory
//! let mut latencies = Reservoir::<f64>::with_seed(512, 7).unwrap();
//! for ms in [12.0, 15.0, 11.0, 140.0, 13.0] {
//!     latencies.add(ms);
//! }
//! println!("p50: {}", latencies.median().unwrap());
//! println!("max: {}", latencies.max().unwrap());
//! ```
//!
//! ## Concurrency
//!
//! All primitives are single-writer values with no internal locking. Give each
//! metric series its own instance, or wrap a shared one in a `Mutex`.
//!
//! ## Time
//!
//! Time-based primitives read a monotonic [`Clock`](clock::Clock). The default
//! is [`MonotonicClock`](clock::MonotonicClock); tests drive a
//! [`ManualClock`](clock::ManualClock) instead of sleeping.
//!
//! ## Feature Flags
//!
//! Algorithm families (pick what you need):
//! - `sampling` (default): Reservoir with order statistics
//! - `window` (default): Time-windowed accumulators
//! - `averages` (default): Half-life exponential moving average
//! - `correlation` (default): Online Pearson correlation
//! - `full`: Enable all algorithm families and serde
//!
//! Platform features:
//! - `serde`: Enable serialization of configs and correlation state

#![cfg_attr(docsrs, feature(doc_cfg))]

// Core modules always available
pub mod clock;
pub mod error;
pub mod math;
pub mod traits;

#[cfg(any(
    feature = "sampling",
    feature = "window",
    feature = "averages",
    feature = "correlation"
))]
pub mod config;

#[cfg(feature = "sampling")]
#[cfg_attr(docsrs, doc(cfg(feature = "sampling")))]
pub mod sampling;

#[cfg(feature = "window")]
#[cfg_attr(docsrs, doc(cfg(feature = "window")))]
pub mod window;

#[cfg(feature = "averages")]
#[cfg_attr(docsrs, doc(cfg(feature = "averages")))]
pub mod averages;

#[cfg(feature = "correlation")]
#[cfg_attr(docsrs, doc(cfg(feature = "correlation")))]
pub mod correlation;

pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, MonotonicClock};
    pub use crate::error::StatsError;
    pub use crate::math::Numeric;
    pub use crate::traits::*;

    #[cfg(feature = "sampling")]
    pub use crate::sampling::Reservoir;

    #[cfg(feature = "window")]
    pub use crate::window::{Combine, TimeWindowAccumulator};

    #[cfg(feature = "averages")]
    pub use crate::averages::ExponentialMovingAverage;

    #[cfg(feature = "correlation")]
    pub use crate::correlation::OnlineCorrelation;
}

pub use error::{Result, StatsError};

#[cfg(feature = "sampling")]
pub use sampling::Reservoir;

#[cfg(feature = "window")]
pub use window::{Combine, TimeWindowAccumulator};

#[cfg(feature = "averages")]
pub use averages::ExponentialMovingAverage;

#[cfg(feature = "correlation")]
pub use correlation::OnlineCorrelation;
