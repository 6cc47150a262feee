//! Error types shared by every statistic in the crate
//!
//! Configuration errors surface from constructors and are not recoverable for
//! the value being built. Query errors on empty state are routine in a live
//! monitoring system and mean "not enough data yet".

use thiserror::Error;

/// Errors raised by construction and querying of streaming statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Query on a collection that holds no values
    #[error("collection is empty")]
    EmptyCollection,

    /// Rank or position beyond the retained size
    #[error("index {index} out of range for {len} retained values")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of retained values
        len: usize,
    },

    /// Estimator queried before it received any input
    #[error("no observations recorded")]
    NoObservations,

    /// Construction parameter outside its valid domain
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Quantile level outside `[0, 1]`
    #[error("quantile level must be within [0, 1], got {0}")]
    InvalidQuantile(f64),
}

impl StatsError {
    /// True for errors that only mean "not enough data yet"
    pub fn is_empty_state(&self) -> bool {
        matches!(self, StatsError::EmptyCollection | StatsError::NoObservations)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, StatsError>;
