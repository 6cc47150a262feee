//! Core traits for streaming statistics
//!
//! Every primitive implements [`Statistic`]. Order-statistics containers add
//! [`OrderStatistics`], and callers that pick the statistic at runtime go
//! through [`Reducible`] with a [`ReduceOperation`].

use core::fmt::Debug;

use crate::error::Result;

/// Statistic selected dynamically by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReduceOperation {
    /// Smallest retained value
    Min,
    /// Largest retained value
    Max,
    /// Arithmetic mean of retained values
    Mean,
    /// Sum of retained values
    Sum,
    /// Interpolated 50th percentile
    Median,
    /// Number of retained values
    Count,
}

impl ReduceOperation {
    /// All operations, in declaration order
    pub const ALL: [ReduceOperation; 6] = [
        ReduceOperation::Min,
        ReduceOperation::Max,
        ReduceOperation::Mean,
        ReduceOperation::Sum,
        ReduceOperation::Median,
        ReduceOperation::Count,
    ];
}

/// Core trait for all streaming statistics
pub trait Statistic: Debug {
    /// Number of inputs processed
    fn count(&self) -> u64;

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Check if no input has been processed
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Order-statistics queries over a retained, sorted population
pub trait OrderStatistics: Statistic {
    /// The value type being tracked
    type Value: Copy;

    /// Interpolated value at quantile level `q` (0.0 to 1.0)
    ///
    /// q=0.5 returns the median
    fn quantile(&self, q: f64) -> Result<f64>;

    /// Fraction of retained values strictly below `value` (0.0 to 1.0)
    fn rank(&self, value: Self::Value) -> Result<f64>;

    /// Smallest retained value
    fn min(&self) -> Result<Self::Value>;

    /// Largest retained value
    fn max(&self) -> Result<Self::Value>;

    /// Interpolated 50th percentile
    fn median(&self) -> Result<f64> {
        self.quantile(0.5)
    }

    /// Several quantiles at once
    fn quantiles(&self, levels: &[f64]) -> Result<Vec<f64>> {
        levels.iter().map(|&q| self.quantile(q)).collect()
    }
}

/// Uniform `f64` accessor for a dynamically chosen statistic
pub trait Reducible {
    /// Evaluate `op` against the current state
    fn apply_as_double(&self, op: ReduceOperation) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_operations_distinct() {
        for (i, a) in ReduceOperation::ALL.iter().enumerate() {
            for b in &ReduceOperation::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_operation_serde_names() {
        let json = serde_json::to_string(&ReduceOperation::Median).unwrap();
        assert_eq!(json, "\"median\"");
        let op: ReduceOperation = serde_json::from_str("\"sum\"").unwrap();
        assert_eq!(op, ReduceOperation::Sum);
    }
}
