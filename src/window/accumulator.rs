//! Time-windowed accumulator
//!
//! A single numeric cell folded by a fixed [`Combine`] rule. The cell resets to
//! its base value whenever an update lands at or after the end of the current
//! window.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::error::{Result, StatsError};
use crate::math::Numeric;
use crate::traits::Statistic;

/// Fold rule applied on every update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Combine {
    /// Running total (integers saturate)
    Sum,
    /// Running peak
    Max,
    /// Running trough
    Min,
}

impl Combine {
    /// Fold `delta` into `acc`
    #[inline]
    pub fn apply<T: Numeric>(self, acc: T, delta: T) -> T {
        match self {
            Combine::Sum => acc.saturating_add(delta),
            Combine::Max => acc.max_of(delta),
            Combine::Min => acc.min_of(delta),
        }
    }
}

/// Numeric cell that auto-resets once per time window
///
/// The window opens at construction and re-opens at the instant of the first
/// update that observes `now - window_start >= window`. Reads never reset.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use watchstats::clock::ManualClock;
/// use watchstats::window::{Combine, TimeWindowAccumulator};
///
/// let clock = ManualClock::new();
/// let mut errors = TimeWindowAccumulator::with_clock(
///     Combine::Sum,
///     0_u64,
///     Duration::from_secs(60),
///     clock.clone(),
/// )
/// .unwrap();
///
/// errors.update(3);
/// assert_eq!(errors.update(2), 5);
///
/// clock.advance(Duration::from_secs(60));
/// assert_eq!(errors.update(1), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TimeWindowAccumulator<T: Numeric, C: Clock = MonotonicClock> {
    combine: Combine,
    /// Reset value
    base: T,
    window: Duration,
    current: T,
    window_start: Instant,
    /// Updates applied since construction
    updates: u64,
    clock: C,
}

impl<T: Numeric> TimeWindowAccumulator<T, MonotonicClock> {
    /// Accumulator on the system monotonic clock
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidConfiguration`] if `window` is zero.
    pub fn new(combine: Combine, base: T, window: Duration) -> Result<Self> {
        Self::with_clock(combine, base, window, MonotonicClock)
    }

    /// Running total seeded at `base`
    pub fn adder(base: T, window: Duration) -> Result<Self> {
        Self::new(Combine::Sum, base, window)
    }

    /// Running maximum seeded at `floor`
    pub fn peak(floor: T, window: Duration) -> Result<Self> {
        Self::new(Combine::Max, floor, window)
    }

    /// Running minimum seeded at `ceiling`, usually `T::MAX_VALUE`
    pub fn min(ceiling: T, window: Duration) -> Result<Self> {
        Self::new(Combine::Min, ceiling, window)
    }
}

impl<T: Numeric, C: Clock> TimeWindowAccumulator<T, C> {
    /// Accumulator reading time from `clock`
    pub fn with_clock(combine: Combine, base: T, window: Duration, clock: C) -> Result<Self> {
        if window.is_zero() {
            return Err(StatsError::InvalidConfiguration(
                "accumulator window must be positive".into(),
            ));
        }
        if !base.is_finite() {
            return Err(StatsError::InvalidConfiguration(
                "accumulator base must be finite".into(),
            ));
        }
        debug!(?combine, ?base, ?window, "time window accumulator created");

        let window_start = clock.now();
        Ok(Self {
            combine,
            base,
            window,
            current: base,
            window_start,
            updates: 0,
            clock,
        })
    }

    /// Fold `delta` into the cell, resetting first if the window has elapsed
    ///
    /// Returns the new value. A NaN or infinite delta is ignored.
    pub fn update(&mut self, delta: T) -> T {
        if !delta.is_finite() {
            debug!(?delta, "accumulator rejected non-finite delta");
            return self.current;
        }

        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= self.window {
            trace!(previous = ?self.current, ?elapsed, "accumulator window rolled over");
            self.current = self.combine.apply(self.base, delta);
            self.window_start = now;
        } else {
            self.current = self.combine.apply(self.current, delta);
        }
        self.updates += 1;
        self.current
    }

    /// Current value, without checking the window
    pub fn current(&self) -> T {
        self.current
    }

    /// Reset value
    pub fn base(&self) -> T {
        self.base
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Instant the current window opened
    pub fn window_start(&self) -> Instant {
        self.window_start
    }

    /// Fold rule
    pub fn combine(&self) -> Combine {
        self.combine
    }
}

impl<T: Numeric, C: Clock + core::fmt::Debug> Statistic for TimeWindowAccumulator<T, C> {
    fn count(&self) -> u64 {
        self.updates
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const WINDOW: Duration = Duration::from_millis(500);

    fn manual<T: Numeric>(
        combine: Combine,
        base: T,
    ) -> (TimeWindowAccumulator<T, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let acc = TimeWindowAccumulator::with_clock(combine, base, WINDOW, clock.clone()).unwrap();
        (acc, clock)
    }

    #[test]
    fn test_adder_window() {
        let (mut acc, clock) = manual(Combine::Sum, 5_i64);

        assert_eq!(acc.update(10), 15);
        assert_eq!(acc.update(5), 20);

        clock.advance(Duration::from_millis(501));
        assert_eq!(acc.update(5), 10);
        assert_eq!(acc.count(), 3);
    }

    #[test]
    fn test_peak_window() {
        let (mut acc, clock) = manual(Combine::Max, 0_i64);

        assert_eq!(acc.update(3), 3);
        assert_eq!(acc.update(1), 3);
        assert_eq!(acc.update(7), 7);

        clock.advance(Duration::from_millis(600));
        assert_eq!(acc.update(1), 1);
    }

    #[test]
    fn test_min_window() {
        let (mut acc, clock) = manual(Combine::Min, i64::MAX);

        assert_eq!(acc.update(5), 5);
        assert_eq!(acc.update(9), 5);
        assert_eq!(acc.update(-2), -2);

        clock.advance(Duration::from_secs(1));
        assert_eq!(acc.update(9), 9);
    }

    #[test]
    fn test_reset_exactly_at_boundary() {
        let (mut acc, clock) = manual(Combine::Sum, 0_u32);

        acc.update(4);
        clock.advance(WINDOW - Duration::from_nanos(1));
        assert_eq!(acc.update(4), 8);

        clock.advance(Duration::from_nanos(1));
        assert_eq!(acc.update(4), 4);
    }

    #[test]
    fn test_window_restarts_at_reset_instant() {
        let (mut acc, clock) = manual(Combine::Sum, 0_i64);

        clock.advance(Duration::from_millis(700));
        assert_eq!(acc.update(1), 1);
        let restarted = acc.window_start();

        // 400ms after the reset, 1100ms after construction: same window
        clock.advance(Duration::from_millis(400));
        assert_eq!(acc.update(1), 2);
        assert_eq!(acc.window_start(), restarted);
    }

    #[test]
    fn test_reads_never_reset() {
        let (mut acc, clock) = manual(Combine::Sum, 0_i64);

        acc.update(42);
        clock.advance(Duration::from_secs(10));

        assert_eq!(acc.current(), 42);
        assert_eq!(acc.current(), 42);
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = TimeWindowAccumulator::adder(0_i64, Duration::ZERO).unwrap_err();
        assert!(matches!(err, StatsError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_non_finite_base_rejected() {
        for base in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = TimeWindowAccumulator::peak(base, WINDOW).unwrap_err();
            assert!(matches!(err, StatsError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let (mut acc, _clock) = manual(Combine::Sum, 1.5_f64);

        assert_eq!(acc.update(1.0), 2.5);
        assert_eq!(acc.update(f64::NAN), 2.5);
        assert_eq!(acc.update(f64::INFINITY), 2.5);
        assert_eq!(acc.update(f64::NEG_INFINITY), 2.5);
        assert_eq!(acc.count(), 1);
    }

    #[test]
    fn test_sum_saturates() {
        let (mut acc, _clock) = manual(Combine::Sum, i64::MAX - 1);

        assert_eq!(acc.update(5), i64::MAX);
        assert_eq!(acc.update(5), i64::MAX);
    }

    #[test]
    fn test_monotonic_clock_window() {
        let window = Duration::from_millis(100);
        let mut acc = TimeWindowAccumulator::adder(5_i64, window).unwrap();

        assert_eq!(acc.update(10), 15);
        assert_eq!(acc.update(5), 20);

        std::thread::sleep(window + Duration::from_millis(50));
        assert_eq!(acc.update(5), 10);
    }

    #[test]
    fn test_accessors() {
        let (acc, _clock) = manual(Combine::Max, -1_i32);

        assert_eq!(acc.base(), -1);
        assert_eq!(acc.current(), -1);
        assert_eq!(acc.window(), WINDOW);
        assert_eq!(acc.combine(), Combine::Max);
        assert!(acc.is_empty());
    }
}
