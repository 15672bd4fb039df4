use num_traits as num;
use std::fmt;

/// The operations a histogram needs from the type backing its counts array. Widening to `f64` is
/// used for mean and deviation math, widening to `u64` for totals and percentile thresholds, and
/// `FromPrimitive` lets counts harvested from one histogram be replayed into another. Saturating
/// addition keeps a narrow counter pinned at its maximum instead of wrapping when a bin overflows.
pub trait Counter:
    num::Num
    + num::ToPrimitive
    + num::FromPrimitive
    + num::Saturating
    + Copy
    + PartialOrd<Self>
    + fmt::Debug
{
    /// Counter as a f64.
    fn as_f64(&self) -> f64;
    /// Counter as a u64.
    fn as_u64(&self) -> u64;
}

impl Counter for u8 {
    #[inline]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
}

impl Counter for u16 {
    #[inline]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
}

impl Counter for u32 {
    #[inline]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
}

impl Counter for u64 {
    #[inline]
    fn as_f64(&self) -> f64 {
        *self as f64
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        *self
    }
}
