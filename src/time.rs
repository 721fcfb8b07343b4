//! Time trait for the numeric timestamp types a series can be keyed by.
//!
//! Uses the sealed trait pattern to restrict implementations to i32, i64, u32, u64 and f64.

use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

/// Private module to seal the trait - users cannot implement `Time` for other types
mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for f64 {}
}

/// Trait for timestamps (and intervals between them) accepted by `Series`.
///
/// Times and intervals share one type: an interval is simply the difference
/// of two times. Comparisons are exact, there is no epsilon handling.
///
/// Any value of the type is a valid time. Spans wider than the type can
/// hold (`i64::MIN` to `i64::MAX`, say) saturate at its maximum when
/// measured with [`Time::gap`].
pub trait Time:
    private::Sealed
    + Copy
    + Debug
    + Display
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
{
    /// The zero interval
    const ZERO: Self;

    /// The unit interval (one tick of an integer clock, `1.0` for floats)
    const UNIT: Self;

    /// Convert to f64 for interpolation arithmetic
    fn to_f64(self) -> f64;

    /// Whether this value takes part in a total order (false for NaN)
    fn is_ordered(self) -> bool;

    /// `self - earlier` for `earlier <= self`, saturating instead of overflowing
    fn gap(self, earlier: Self) -> Self;

    /// First point of the grid `origin + k * spacing` at or after `self`
    ///
    /// Caller must ensure `origin < self` and `spacing > 0`.
    fn ceil_to_grid(self, origin: Self, spacing: Self) -> Self;
}

macro_rules! impl_integer_time {
    ($($ty:ty),*) => {
        $(
            impl Time for $ty {
                const ZERO: Self = 0;
                const UNIT: Self = 1;

                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn is_ordered(self) -> bool {
                    true
                }

                #[inline]
                fn gap(self, earlier: Self) -> Self {
                    self.saturating_sub(earlier)
                }

                #[inline]
                fn ceil_to_grid(self, origin: Self, spacing: Self) -> Self {
                    let rem = self.gap(origin) % spacing;
                    if rem == 0 {
                        self
                    } else {
                        self.saturating_add(spacing - rem)
                    }
                }
            }
        )*
    };
}

impl_integer_time!(i32, i64, u32, u64);

impl Time for f64 {
    const ZERO: Self = 0.0;
    const UNIT: Self = 1.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn is_ordered(self) -> bool {
        !self.is_nan()
    }

    #[inline]
    fn gap(self, earlier: Self) -> Self {
        self - earlier
    }

    #[inline]
    fn ceil_to_grid(self, origin: Self, spacing: Self) -> Self {
        let k = (self - origin) / spacing;
        let nearest = k.round();
        // A target already on the grid must not be pushed a whole spacing
        // further by rounding noise in the division
        let k = if (k - nearest).abs() < 1e-9 { nearest } else { k.ceil() };
        origin + k * spacing
    }
}

/// Fraction of the way `t` lies from `t0` to `t1`
///
/// Caller must ensure `t0 <= t <= t1` and `t0 < t1`.
#[inline]
pub(crate) fn fraction<T: Time>(t: T, t0: T, t1: T) -> f64 {
    t.gap(t0).to_f64() / t1.gap(t0).to_f64()
}
