//! Half-life exponential moving average
//!
//! Decay factor for elapsed time Δt is:
//!     w = 2^(-Δt / half_life)
//! and a new sample is blended as `value * (1 - w) + previous * w`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{Result, StatsError};
use crate::math;
use crate::traits::Statistic;

/// Exponential moving average parameterized by a half-life
///
/// The decay applied to the previous estimate depends only on the time since
/// the last accepted sample, never on how many samples arrived. Two samples
/// at the same instant therefore leave the estimate unchanged.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use watchstats::averages::ExponentialMovingAverage;
/// use watchstats::clock::ManualClock;
///
/// let clock = ManualClock::new();
/// let half_life = Duration::from_secs(2);
/// let mut avg = ExponentialMovingAverage::with_clock(half_life, clock.clone()).unwrap();
///
/// avg.accept(10.0);
/// clock.advance(half_life);
/// avg.accept(0.0);
///
/// // One half-life later the old estimate carries half the weight
/// assert!((avg.value().unwrap() - 5.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialMovingAverage<C: Clock = MonotonicClock> {
    half_life: Duration,
    /// Current estimate, absent until the first sample
    value: Option<f64>,
    last_update: Option<Instant>,
    observations: u64,
    clock: C,
}

impl ExponentialMovingAverage<MonotonicClock> {
    /// EMA on the system monotonic clock
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidConfiguration`] if `half_life` is zero.
    pub fn new(half_life: Duration) -> Result<Self> {
        Self::with_clock(half_life, MonotonicClock)
    }
}

impl<C: Clock> ExponentialMovingAverage<C> {
    /// EMA reading time from `clock`
    pub fn with_clock(half_life: Duration, clock: C) -> Result<Self> {
        if half_life.is_zero() {
            return Err(StatsError::InvalidConfiguration(
                "EMA half-life must be positive".into(),
            ));
        }
        debug!(?half_life, "exponential moving average created");

        Ok(Self {
            half_life,
            value: None,
            last_update: None,
            observations: 0,
            clock,
        })
    }

    /// Blend a sample observed now
    pub fn accept(&mut self, value: f64) {
        let now = self.clock.now();
        self.accept_at(value, now);
    }

    /// Blend a sample observed at `at`
    ///
    /// A timestamp earlier than the last update counts as zero elapsed time.
    /// NaN and infinities are ignored.
    pub fn accept_at(&mut self, value: f64, at: Instant) {
        if !value.is_finite() {
            debug!(value, "EMA rejected non-finite sample");
            return;
        }

        match (self.value, self.last_update) {
            (Some(previous), Some(last)) => {
                let w = self.decay_weight(at.saturating_duration_since(last));
                self.value = Some(value * (1.0 - w) + previous * w);
                self.last_update = Some(last.max(at));
            }
            _ => {
                self.value = Some(value);
                self.last_update = Some(at);
            }
        }
        self.observations += 1;
    }

    /// Current estimate
    ///
    /// # Errors
    ///
    /// [`StatsError::NoObservations`] before the first sample.
    pub fn value(&self) -> Result<f64> {
        self.value.ok_or(StatsError::NoObservations)
    }

    /// Weight the previous estimate keeps after `elapsed`
    pub fn decay_weight(&self, elapsed: Duration) -> f64 {
        math::decay_weight(elapsed, self.half_life)
    }

    /// Time for a sample's weight to halve
    pub fn half_life(&self) -> Duration {
        self.half_life
    }

    /// Instant of the most recent sample
    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }

    /// Number of samples blended in
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Whether no sample has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

impl<C: Clock + core::fmt::Debug> Statistic for ExponentialMovingAverage<C> {
    fn count(&self) -> u64 {
        self.observations
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}
