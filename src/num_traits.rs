use core::ops::Neg;

/// Bounds a value to a closed interval.
///
/// Unlike `clamp`, this never panics on inverted bounds and passes `NaN` through unchanged,
/// which is what the control path expects from the actuator and bias limits.
pub trait Saturate: Sized {
    /// Bounds the value to `[min, max]`.
    fn saturate(self, min: Self, max: Self) -> Self;

    /// Bounds the value to `[-limit, limit]`.
    fn saturate_symmetric(self, limit: Self) -> Self;
}

impl<T> Saturate for T
where
    T: Copy + PartialOrd + Neg<Output = T>,
{
    #[inline(always)]
    fn saturate(self, min: T, max: T) -> T {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }

    #[inline(always)]
    fn saturate_symmetric(self, limit: T) -> T {
        self.saturate(-limit, limit)
    }
}
