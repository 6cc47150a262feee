//! Correlation between co-varying series
//!
//! # Example
//!
//! ```
//! use watchstats::correlation::OnlineCorrelation;
//!
//! let mut corr = OnlineCorrelation::new();
//!
//! for (heap_mb, gc_ms) in [(10.0, 20.0), (5.0, 6.0), (3.0, 10.0), (90.0, 67.0)] {
//!     corr.apply(heap_mb, gc_ms);
//! }
//!
//! assert!(corr.coefficient() > 0.9);
//! ```

mod pearson;

pub use pearson::OnlineCorrelation;
