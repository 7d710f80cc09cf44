use crate::impl_standard_traits;
use crate::ParameterError;
use num_traits::Float;

/// The state and control weights of the rate/torque LQR.
///
/// `q_rate` and `q_torque` penalize rate error and torque respectively. The torque weight is
/// scaled by the actuator gain `e^beta` when applied, so the same value transfers between
/// frames of different authority. Workable values for 5" multirotors are around
/// `q_rate = 1e-5`, `q_torque = 1.3333e-4`.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct RegulatorWeights<T> {
    /// Weight of the rate error state.
    pub q_rate: T,
    /// Weight of the torque state, before scaling by the actuator gain.
    pub q_torque: T,
    /// Weight of the control effort.
    pub r: T,
}

impl<T> RegulatorWeights<T> {
    /// Initializes a new [`RegulatorWeights`] instance.
    #[inline(always)]
    pub const fn new(q_rate: T, q_torque: T, r: T) -> Self {
        Self {
            q_rate,
            q_torque,
            r,
        }
    }

    /// Checks that the weights define a well-posed regulator problem.
    pub fn validate(&self) -> Result<(), ParameterError>
    where
        T: Float,
    {
        if self.r.is_nan() || self.r <= T::zero() {
            return Err(ParameterError::NonPositiveControlWeight);
        }
        if self.q_rate.is_nan() || self.q_rate < T::zero() {
            return Err(ParameterError::NegativeWeight);
        }
        if self.q_torque.is_nan() || self.q_torque < T::zero() {
            return Err(ParameterError::NegativeWeight);
        }
        Ok(())
    }
}

impl_standard_traits!(RegulatorWeights, T, q_rate, q_torque, r);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(
            RegulatorWeights::new(1e-5_f32, 1.3333e-4, 1.0).validate(),
            Ok(())
        );
        assert_eq!(
            RegulatorWeights::new(1e-5_f32, 1.3333e-4, 0.0).validate(),
            Err(ParameterError::NonPositiveControlWeight)
        );
        assert_eq!(
            RegulatorWeights::new(-1e-5_f32, 1.3333e-4, 1.0).validate(),
            Err(ParameterError::NegativeWeight)
        );
    }
}
