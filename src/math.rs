//! Shared numeric helpers
//!
//! [`Numeric`] is the element bound for the generic primitives. It gives
//! integers and floats one total ordering, overflow-safe addition and a
//! lossless-enough widening to `f64` for aggregate queries.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::time::Duration;

/// Machine number usable as a sample value
pub trait Numeric: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Additive identity
    const ZERO: Self;
    /// Smallest representable value
    const MIN_VALUE: Self;
    /// Largest representable value
    const MAX_VALUE: Self;

    /// Widen to `f64` for aggregate arithmetic
    fn to_f64(self) -> f64;

    /// Total order; floats order NaN after every number and treat
    /// `-0.0` and `0.0` as equal
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Addition that clamps at the type bounds instead of wrapping
    fn saturating_add(self, other: Self) -> Self;

    /// Whether the value is neither NaN nor infinite (always true for integers)
    fn is_finite(self) -> bool {
        true
    }

    /// Canonical representative of the value; folds `-0.0` into `0.0`
    fn canonical(self) -> Self {
        self
    }

    /// Larger of two values under [`Numeric::total_cmp`]
    #[inline]
    fn max_of(self, other: Self) -> Self {
        match self.total_cmp(&other) {
            Ordering::Less => other,
            _ => self,
        }
    }

    /// Smaller of two values under [`Numeric::total_cmp`]
    #[inline]
    fn min_of(self, other: Self) -> Self {
        match self.total_cmp(&other) {
            Ordering::Greater => other,
            _ => self,
        }
    }
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            const ZERO: Self = 0;
            const MIN_VALUE: Self = <$t>::MIN;
            const MAX_VALUE: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            #[inline]
            fn saturating_add(self, other: Self) -> Self {
                <$t>::saturating_add(self, other)
            }
        }
    )*};
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            const ZERO: Self = 0.0;
            const MIN_VALUE: Self = <$t>::MIN;
            const MAX_VALUE: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                if self == other {
                    Ordering::Equal
                } else {
                    <$t>::total_cmp(self, other)
                }
            }

            #[inline]
            fn saturating_add(self, other: Self) -> Self {
                self + other
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            #[inline]
            fn canonical(self) -> Self {
                // IEEE 754: -0.0 + 0.0 == +0.0
                self + 0.0
            }
        }
    )*};
}

impl_numeric_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_numeric_float!(f32, f64);

/// Linear interpolation between `a` and `b` at fraction `t`
///
/// An infinite `a` is kept for every `t < 1`, so the result never
/// becomes NaN for ordered endpoints.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t <= 0.0 || a == b || a.is_infinite() {
        if t >= 1.0 {
            b
        } else {
            a
        }
    } else if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Weight left on an old observation after `elapsed`, given `half_life`
///
/// `2^(-elapsed / half_life)`; 1.0 for zero elapsed time.
#[inline]
pub fn decay_weight(elapsed: Duration, half_life: Duration) -> f64 {
    let hl = half_life.as_secs_f64();
    if hl <= 0.0 {
        return 0.0;
    }
    (-elapsed.as_secs_f64() / hl).exp2()
}

/// Clamp to `[-1, 1]`, passing NaN through
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x > 1.0 {
        1.0
    } else if x < -1.0 {
        -1.0
    } else {
        x
    }
}

/// Approximate equality with an absolute tolerance
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
