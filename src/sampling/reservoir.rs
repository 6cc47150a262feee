//! Reservoir sampling with order-statistics queries
//!
//! A [`Reservoir`] keeps a fixed-size uniform random sample of an unbounded
//! numeric stream and answers rank, quantile and membership questions about
//! that sample in logarithmic time.

use core::cmp::Ordering;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::{Result, StatsError};
use crate::math::{self, Numeric};
use crate::traits::{OrderStatistics, ReduceOperation, Reducible, Statistic};

/// Bounded uniform sample kept in sorted order
///
/// # Algorithm
///
/// Algorithm R (Vitter, 1985):
/// 1. Fill reservoir with first k items
/// 2. For each subsequent item i (1-indexed):
///    - Generate random j in [0, i)
///    - If j < k, replace reservoir[j] with item i
///
/// Replacement targets a reservoir *slot*, not a sorted rank, so the slots
/// live in their own vector. A second vector holds the same values in
/// ascending order and is repaired in place on every replacement: the evicted
/// value is located by binary search and the elements between its position
/// and the new value's position shift by one.
///
/// Once more than `capacity` values have been offered, each one is retained
/// with probability `capacity / count_seen`.
///
/// # Example
///
/// ```
/// use watchstats::sampling::Reservoir;
///
/// let mut reservoir = Reservoir::<i64>::with_seed(100, 7).unwrap();
///
/// for latency in 0..10_000 {
///     reservoir.add(latency);
/// }
///
/// assert_eq!(reservoir.len(), 100);
/// assert_eq!(reservoir.count_seen(), 10_000);
///
/// let p99 = reservoir.quantile(0.99).unwrap();
/// assert!(p99 >= reservoir.quantile(0.5).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct Reservoir<T: Numeric, R: Rng = ChaCha8Rng> {
    /// Maximum sample size
    capacity: usize,
    /// Number of values offered, not capped
    count_seen: u64,
    /// Sample indexed by reservoir slot
    slots: Vec<T>,
    /// Sample in ascending order
    sorted: Vec<T>,
    /// Random source for replacement decisions
    rng: R,
}

impl<T: Numeric> Reservoir<T, ChaCha8Rng> {
    /// Create a reservoir seeded from OS entropy
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_rng(capacity, ChaCha8Rng::from_entropy())
    }

    /// Create a reservoir with a reproducible random source
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self> {
        Self::with_rng(capacity, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<T: Numeric, R: Rng> Reservoir<T, R> {
    /// Create a reservoir drawing replacement decisions from `rng`
    pub fn with_rng(capacity: usize, rng: R) -> Result<Self> {
        if capacity == 0 {
            return Err(StatsError::InvalidConfiguration(
                "reservoir capacity must be at least 1".into(),
            ));
        }
        debug!(capacity, "reservoir created");

        Ok(Self {
            capacity,
            count_seen: 0,
            slots: Vec::with_capacity(capacity),
            sorted: Vec::with_capacity(capacity),
            rng,
        })
    }

    /// Offer a value to the reservoir
    ///
    /// NaN and infinities are rejected and do not count as seen.
    pub fn add(&mut self, value: T) {
        if !value.is_finite() {
            debug!(?value, "reservoir rejected non-finite sample");
            return;
        }
        let value = value.canonical();

        self.count_seen += 1;

        if self.slots.len() < self.capacity {
            self.slots.push(value);
            let pos = self.upper_bound(value);
            self.sorted.insert(pos, value);
            return;
        }

        let j = self.rng.gen_range(0..self.count_seen);
        if j < self.capacity as u64 {
            let slot = j as usize;
            let evicted = core::mem::replace(&mut self.slots[slot], value);
            self.repair_sorted(evicted, value);
            trace!(slot, count_seen = self.count_seen, "reservoir slot replaced");
        }
    }

    /// Swap one occurrence of `evicted` for `value` in the sorted view
    fn repair_sorted(&mut self, evicted: T, value: T) {
        let from = self.lower_bound(evicted);
        debug_assert!(
            from < self.sorted.len() && self.sorted[from].total_cmp(&evicted) == Ordering::Equal,
            "evicted value missing from sorted view"
        );
        let to = self.upper_bound(value);

        if to > from {
            self.sorted[from..to].rotate_left(1);
            self.sorted[to - 1] = value;
        } else {
            self.sorted[to..=from].rotate_right(1);
            self.sorted[to] = value;
        }
    }

    /// First sorted position whose value is not less than `value`
    fn lower_bound(&self, value: T) -> usize {
        self.sorted
            .partition_point(|x| x.total_cmp(&value) == Ordering::Less)
    }

    /// First sorted position whose value is greater than `value`
    fn upper_bound(&self, value: T) -> usize {
        self.sorted
            .partition_point(|x| x.total_cmp(&value) != Ordering::Greater)
    }

    fn require_data(&self) -> Result<()> {
        if self.sorted.is_empty() {
            Err(StatsError::EmptyCollection)
        } else {
            Ok(())
        }
    }

    /// Value at ascending sorted position `rank`
    pub fn get(&self, rank: usize) -> Result<T> {
        self.sorted
            .get(rank)
            .copied()
            .ok_or(StatsError::IndexOutOfRange {
                index: rank,
                len: self.sorted.len(),
            })
    }

    /// Smallest retained value
    pub fn min(&self) -> Result<T> {
        self.sorted.first().copied().ok_or(StatsError::EmptyCollection)
    }

    /// Largest retained value
    pub fn max(&self) -> Result<T> {
        self.sorted.last().copied().ok_or(StatsError::EmptyCollection)
    }

    /// Sum of the retained sample, saturating for integer types
    pub fn sum(&self) -> Result<T> {
        self.require_data()?;
        Ok(self
            .sorted
            .iter()
            .fold(T::ZERO, |acc, &v| acc.saturating_add(v)))
    }

    /// Arithmetic mean of the retained sample (not of the full stream)
    pub fn mean(&self) -> Result<f64> {
        self.require_data()?;
        // Widened to f64, so integer samples cannot overflow here
        let total: f64 = self.sorted.iter().map(|v| v.to_f64()).sum();
        Ok(total / self.sorted.len() as f64)
    }

    /// Linearly interpolated order statistic at level `q`
    ///
    /// Interpolates between ranks `floor(q * (n - 1))` and its ceiling.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(StatsError::InvalidQuantile(q));
        }
        self.require_data()?;

        let pos = q * (self.sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let lo_value = self.sorted[lo].to_f64();
        if lo == hi {
            return Ok(lo_value);
        }
        Ok(math::lerp(lo_value, self.sorted[hi].to_f64(), pos - lo as f64))
    }

    /// Interpolated 50th percentile
    pub fn median(&self) -> Result<f64> {
        self.quantile(0.5)
    }

    /// Sorted rank of an element equal to `value`, if one is retained
    pub fn find(&self, value: T) -> Option<usize> {
        let pos = self.lower_bound(value);
        match self.sorted.get(pos) {
            Some(found) if found.total_cmp(&value) == Ordering::Equal => Some(pos),
            _ => None,
        }
    }

    /// Fraction of retained values `>= value`
    pub fn fraction_at_least(&self, value: T) -> Result<f64> {
        self.require_data()?;
        let n = self.sorted.len();
        Ok((n - self.lower_bound(value)) as f64 / n as f64)
    }

    /// Fraction of retained values `<= value`
    pub fn fraction_at_most(&self, value: T) -> Result<f64> {
        self.require_data()?;
        Ok(self.upper_bound(value) as f64 / self.sorted.len() as f64)
    }

    /// Fraction of retained values strictly below `value`
    pub fn rank(&self, value: T) -> Result<f64> {
        self.require_data()?;
        Ok(self.lower_bound(value) as f64 / self.sorted.len() as f64)
    }

    /// Retained sample in ascending order
    pub fn sample(&self) -> &[T] {
        &self.sorted
    }

    /// Iterate the retained sample in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.sorted.iter()
    }

    /// Get the reservoir capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current sample size
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Check if no value is retained
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Check if reservoir is full
    pub fn is_full(&self) -> bool {
        self.sorted.len() >= self.capacity
    }

    /// Number of values ever offered (non-finite values excluded)
    pub fn count_seen(&self) -> u64 {
        self.count_seen
    }

    /// Probability that any given offered value is currently retained
    pub fn sampling_probability(&self) -> f64 {
        if self.count_seen == 0 {
            0.0
        } else {
            ((self.capacity as f64) / (self.count_seen as f64)).min(1.0)
        }
    }
}

impl<T: Numeric, R: Rng + core::fmt::Debug> Statistic for Reservoir<T, R> {
    fn count(&self) -> u64 {
        self.count_seen
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + (self.slots.capacity() + self.sorted.capacity()) * core::mem::size_of::<T>()
    }
}

impl<T: Numeric, R: Rng + core::fmt::Debug> OrderStatistics for Reservoir<T, R> {
    type Value = T;

    fn quantile(&self, q: f64) -> Result<f64> {
        Reservoir::quantile(self, q)
    }

    fn rank(&self, value: T) -> Result<f64> {
        Reservoir::rank(self, value)
    }

    fn min(&self) -> Result<T> {
        Reservoir::min(self)
    }

    fn max(&self) -> Result<T> {
        Reservoir::max(self)
    }
}

impl<T: Numeric, R: Rng> Reducible for Reservoir<T, R> {
    fn apply_as_double(&self, op: ReduceOperation) -> Result<f64> {
        match op {
            ReduceOperation::Min => self.min().map(Numeric::to_f64),
            ReduceOperation::Max => self.max().map(Numeric::to_f64),
            ReduceOperation::Mean => self.mean(),
            ReduceOperation::Sum => self.sum().map(Numeric::to_f64),
            ReduceOperation::Median => self.median(),
            ReduceOperation::Count => Ok(self.len() as f64),
        }
    }
}
