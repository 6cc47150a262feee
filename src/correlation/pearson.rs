//! Online Pearson correlation
//!
//! Keeps Welford-style running means and co-moments of a paired stream, so the
//! coefficient is available at any time without storing samples.

use tracing::debug;

use crate::math;
use crate::traits::Statistic;

/// Pearson correlation estimator using Welford's algorithm
///
/// Five scalars are sufficient statistics: the count, both means, the
/// co-moment `c_xy` and the two sums of squared deviations. The coefficient is
/// `c_xy / sqrt(c_xx * c_yy)`, defined as 0 with fewer than two pairs or when
/// either series has zero variance.
///
/// # Example
///
/// ```
/// use watchstats::correlation::OnlineCorrelation;
///
/// let mut corr = OnlineCorrelation::new();
///
/// for x in 0..10 {
///     let x = x as f64;
///     corr.apply(x, 2.0 * x + 1.0);
/// }
///
/// assert!((corr.coefficient() - 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnlineCorrelation {
    /// Number of pairs seen
    n: u64,
    mean_x: f64,
    mean_y: f64,
    /// Sum of (x - mean_x) * (y - mean_y)
    c_xy: f64,
    /// Sum of squared differences from mean_x
    c_xx: f64,
    /// Sum of squared differences from mean_y
    c_yy: f64,
}

impl OnlineCorrelation {
    /// Create an estimator with no observations
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair and return the updated coefficient
    ///
    /// Pairs containing NaN or an infinity are ignored.
    pub fn apply(&mut self, x: f64, y: f64) -> f64 {
        if !x.is_finite() || !y.is_finite() {
            debug!(x, y, "correlation rejected non-finite pair");
            return self.coefficient();
        }

        self.n += 1;
        let n = self.n as f64;

        let dx = x - self.mean_x;
        self.mean_x += dx / n;
        let dy = y - self.mean_y;
        self.mean_y += dy / n;

        self.c_xy += dx * (y - self.mean_y);
        self.c_xx += dx * (x - self.mean_x);
        self.c_yy += dy * (y - self.mean_y);

        self.coefficient()
    }

    /// Current coefficient in `[-1, 1]`
    pub fn coefficient(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let denom = (self.c_xx * self.c_yy).sqrt();
        if denom == 0.0 || !denom.is_finite() {
            return 0.0;
        }
        math::clamp_unit(self.c_xy / denom)
    }

    /// Number of pairs seen
    pub fn count(&self) -> u64 {
        self.n
    }

    /// Running mean of the first series
    pub fn mean_x(&self) -> f64 {
        self.mean_x
    }

    /// Running mean of the second series
    pub fn mean_y(&self) -> f64 {
        self.mean_y
    }

    /// Population covariance
    pub fn covariance(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.c_xy / self.n as f64
        }
    }

    /// Population variance of x
    pub fn variance_x(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.c_xx / self.n as f64
        }
    }

    /// Population variance of y
    pub fn variance_y(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.c_yy / self.n as f64
        }
    }

    /// Forget all observations
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Statistic for OnlineCorrelation {
    fn count(&self) -> u64 {
        self.n
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let mut corr = OnlineCorrelation::new();
        for x in [1.0, 2.0, 3.0, 7.0, -4.0] {
            corr.apply(x, 2.0 * x + 1.0);
        }
        assert!((corr.coefficient() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_negative() {
        let mut corr = OnlineCorrelation::new();
        for x in [1.0, 2.0, 3.0, 4.0] {
            corr.apply(x, -3.0 * x + 10.0);
        }
        assert!((corr.coefficient() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_known_pairs() {
        let mut corr = OnlineCorrelation::new();
        let mut last = 0.0;
        for (x, y) in [(10.0, 20.0), (5.0, 6.0), (3.0, 10.0), (90.0, 67.0)] {
            last = corr.apply(x, y);
        }
        assert!((last - 0.987).abs() < 0.01, "coefficient {}", last);
        assert_eq!(last, corr.coefficient());
    }

    #[test]
    fn test_fewer_than_two_pairs() {
        let mut corr = OnlineCorrelation::new();
        assert_eq!(corr.coefficient(), 0.0);

        assert_eq!(corr.apply(1.0, 2.0), 0.0);
        assert_eq!(corr.count(), 1);
    }

    #[test]
    fn test_zero_variance() {
        let mut corr = OnlineCorrelation::new();
        for x in [1.0, 2.0, 3.0] {
            corr.apply(x, 5.0);
        }
        assert_eq!(corr.coefficient(), 0.0);
    }

    #[test]
    fn test_moments() {
        let mut corr = OnlineCorrelation::new();
        for (x, y) in [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)] {
            corr.apply(x, y);
        }

        assert!((corr.mean_x() - 2.0).abs() < 1e-12);
        assert!((corr.mean_y() - 4.0).abs() < 1e-12);
        assert!((corr.variance_x() - 2.0 / 3.0).abs() < 1e-12);
        assert!((corr.variance_y() - 8.0 / 3.0).abs() < 1e-12);
        assert!((corr.covariance() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_numerical_stability() {
        // Large offsets would cancel catastrophically with raw sums
        let mut corr = OnlineCorrelation::new();
        let base = 1e9;
        for i in 0..1000 {
            let x = base + i as f64;
            corr.apply(x, 3.0 * x);
        }
        assert!((corr.coefficient() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nan_ignored() {
        let mut corr = OnlineCorrelation::new();
        corr.apply(1.0, 1.0);
        corr.apply(f64::NAN, 2.0);
        corr.apply(2.0, f64::NAN);
        corr.apply(2.0, 2.0);

        assert_eq!(corr.count(), 2);
        assert!((corr.coefficient() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_infinite_pair_ignored() {
        let mut corr = OnlineCorrelation::new();
        corr.apply(1.0, 2.0);
        corr.apply(f64::INFINITY, 3.0);
        corr.apply(2.0, f64::NEG_INFINITY);
        corr.apply(2.0, 4.0);
        corr.apply(3.0, 6.0);

        assert_eq!(corr.count(), 3);
        assert!(corr.mean_x().is_finite() && corr.mean_y().is_finite());
        assert!((corr.coefficient() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut corr = OnlineCorrelation::new();
        corr.apply(1.0, 1.0);
        corr.apply(2.0, 3.0);

        corr.reset();

        assert!(corr.is_empty());
        assert_eq!(corr, OnlineCorrelation::new());
    }
}
