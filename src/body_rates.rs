use crate::impl_standard_traits;
use core::ops::{Mul, Sub};

/// Angular rates around the body axes, e.g. a gyroscope reading or a rate setpoint.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct BodyRates<T> {
    /// The angular rate around the roll axis.
    pub roll: T,
    /// The angular rate around the pitch axis.
    pub pitch: T,
    /// The angular rate around the yaw axis.
    pub yaw: T,
}

impl<T> BodyRates<T> {
    /// Initializes a new [`BodyRates`] instance.
    #[inline(always)]
    pub const fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self { roll, pitch, yaw }
    }
}

impl<T> Mul<T> for BodyRates<T>
where
    T: Mul<T, Output = T> + Clone,
{
    type Output = BodyRates<T>;

    fn mul(self, rhs: T) -> Self::Output {
        Self {
            roll: self.roll * rhs.clone(),
            pitch: self.pitch * rhs.clone(),
            yaw: self.yaw * rhs,
        }
    }
}

impl<T> Sub for BodyRates<T>
where
    T: Sub<T, Output = T>,
{
    type Output = BodyRates<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            roll: self.roll - rhs.roll,
            pitch: self.pitch - rhs.pitch,
            yaw: self.yaw - rhs.yaw,
        }
    }
}

impl_standard_traits!(BodyRates, T, roll, pitch, yaw);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index() {
        let rates = BodyRates::<f32>::new(1.0, 2.0, 3.0);
        assert_eq!(rates[0], 1.0);
        assert_eq!(rates[1], 2.0);
        assert_eq!(rates[2], 3.0);
    }

    #[test]
    fn test_error() {
        let setpoint = BodyRates::new(200.0_f32, 0.0, -50.0);
        let measured = BodyRates::new(150.0_f32, 10.0, -50.0);
        assert_eq!(setpoint - measured, BodyRates::new(50.0, -10.0, 0.0));
    }

    #[test]
    fn test_scale() {
        let rates = BodyRates::new(1.0_f32, -2.0, 0.5) * 2.0;
        assert_eq!(rates, BodyRates::new(2.0, -4.0, 1.0));
    }
}
