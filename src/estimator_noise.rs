use crate::impl_standard_traits;
use crate::ParameterError;
use num_traits::Float;

/// The noise model and bias clamp of the rate/torque/bias Kalman filter.
///
/// The process noise weights were found by experimentation; `r = 1000` is a workable
/// starting point for raw gyroscope input.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct EstimatorNoise<T> {
    /// Process noise of the rate state.
    pub q_rate: T,
    /// Process noise of the torque state.
    pub q_torque: T,
    /// Process noise of the bias state.
    pub q_bias: T,
    /// Measurement noise of the rate signal.
    pub r: T,
    /// Symmetric limit applied to the bias estimate after every correction.
    pub bias_limit: T,
}

impl<T> EstimatorNoise<T> {
    /// Initializes a new [`EstimatorNoise`] instance.
    ///
    /// ## Arguments
    /// * `q_rate` - Process noise of the rate state.
    /// * `q_torque` - Process noise of the torque state.
    /// * `q_bias` - Process noise of the bias state.
    /// * `r` - Measurement noise of the rate signal. Must be positive.
    /// * `bias_limit` - Symmetric limit of the bias estimate.
    #[inline(always)]
    pub const fn new(q_rate: T, q_torque: T, q_bias: T, r: T, bias_limit: T) -> Self {
        Self {
            q_rate,
            q_torque,
            q_bias,
            r,
            bias_limit,
        }
    }

    /// Checks that the noise model is a valid covariance description.
    pub fn validate(&self) -> Result<(), ParameterError>
    where
        T: Float,
    {
        if self.r.is_nan() || self.r <= T::zero() {
            return Err(ParameterError::NonPositiveMeasurementNoise);
        }
        for q in [self.q_rate, self.q_torque, self.q_bias] {
            if q.is_nan() || q < T::zero() {
                return Err(ParameterError::NegativeWeight);
            }
        }
        if self.bias_limit.is_nan() || self.bias_limit < T::zero() {
            return Err(ParameterError::NegativeBiasLimit);
        }
        Ok(())
    }
}

impl_standard_traits!(EstimatorNoise, T, q_rate, q_torque, q_bias, r, bias_limit);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(
            EstimatorNoise::new(10.0_f32, 1e-3, 1e-3, 100.0, 0.5).validate(),
            Ok(())
        );
        assert_eq!(
            EstimatorNoise::new(10.0_f32, 1e-3, 1e-3, 0.0, 0.5).validate(),
            Err(ParameterError::NonPositiveMeasurementNoise)
        );
        assert_eq!(
            EstimatorNoise::new(10.0_f32, -1e-3, 1e-3, 100.0, 0.5).validate(),
            Err(ParameterError::NegativeWeight)
        );
        assert_eq!(
            EstimatorNoise::new(10.0_f32, 1e-3, 1e-3, 100.0, -0.5).validate(),
            Err(ParameterError::NegativeBiasLimit)
        );
    }

    #[test]
    fn test_zero_bias_limit_is_valid() {
        let noise = EstimatorNoise::new(1.0_f64, 0.0, 0.0, 1.0, 0.0);
        assert_eq!(noise.validate(), Ok(()));
    }
}
