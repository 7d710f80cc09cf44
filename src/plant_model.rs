use crate::impl_standard_traits;
use crate::ParameterError;
use num_traits::Float;

/// The identified first-order model of one axis.
///
/// The axis is modeled as an actuator command driving a torque through a first-order lag of
/// time constant `tau`, with the torque integrating into the body rate at gain `e^beta`.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct PlantModel<T> {
    /// The natural logarithm of the actuator gain.
    pub beta: T,
    /// The torque time constant, in seconds.
    pub tau: T,
    /// The control loop sample period, in seconds.
    pub sample_time: T,
}

impl<T> PlantModel<T> {
    /// Initializes a new [`PlantModel`] instance.
    ///
    /// ## Arguments
    /// * `beta` - The natural logarithm of the actuator gain.
    /// * `tau` - The torque time constant, in seconds. Must be positive.
    /// * `sample_time` - The control loop sample period, in seconds. Must be positive.
    #[inline(always)]
    pub const fn new(beta: T, tau: T, sample_time: T) -> Self {
        Self {
            beta,
            tau,
            sample_time,
        }
    }

    /// Returns the actuator gain, `e^beta`.
    #[inline]
    pub fn gain(&self) -> T
    where
        T: Float,
    {
        self.beta.exp()
    }

    /// Returns the per-sample torque decay, `e^(-Ts/tau)`.
    #[inline]
    pub fn decay(&self) -> T
    where
        T: Float,
    {
        (-self.sample_time / self.tau).exp()
    }

    /// Checks that the model describes a physical, causal axis.
    pub fn validate(&self) -> Result<(), ParameterError>
    where
        T: Float,
    {
        if !self.beta.is_finite() {
            return Err(ParameterError::NonFiniteGain);
        }
        if self.tau.is_nan() || self.tau <= T::zero() {
            return Err(ParameterError::NonPositiveTimeConstant);
        }
        if self.sample_time.is_nan() || self.sample_time <= T::zero() {
            return Err(ParameterError::NonPositiveSamplePeriod);
        }
        Ok(())
    }
}

impl_standard_traits!(PlantModel, T, beta, tau, sample_time);

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gain_and_decay() {
        let model = PlantModel::new(0.0_f64, 0.05, 0.0025);
        assert_eq!(model.gain(), 1.0);
        assert_relative_eq!(model.decay(), 0.951229424500714, max_relative = 1e-14);
    }

    #[test]
    fn test_validate() {
        assert_eq!(PlantModel::new(10.0_f32, 0.05, 0.0025).validate(), Ok(()));
        assert_eq!(
            PlantModel::new(10.0_f32, 0.0, 0.0025).validate(),
            Err(ParameterError::NonPositiveTimeConstant)
        );
        assert_eq!(
            PlantModel::new(10.0_f32, 0.05, -0.0025).validate(),
            Err(ParameterError::NonPositiveSamplePeriod)
        );
        assert_eq!(
            PlantModel::new(f32::NAN, 0.05, 0.0025).validate(),
            Err(ParameterError::NonFiniteGain)
        );
        assert_eq!(
            PlantModel::new(10.0_f32, f32::NAN, 0.0025).validate(),
            Err(ParameterError::NonPositiveTimeConstant)
        );
    }
}
