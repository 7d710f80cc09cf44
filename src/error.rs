use thiserror::Error;

/// A parameter set that cannot describe a physical axis.
///
/// The controller itself never validates its inputs; construction with invalid values yields
/// meaningless (but finite-cost) numbers. Callers that load parameters from a settings store
/// can use the `validate` methods to reject them up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// The torque time constant `tau` must be strictly positive.
    #[error("the torque time constant must be positive")]
    NonPositiveTimeConstant,
    /// The sample period `Ts` must be strictly positive.
    #[error("the sample period must be positive")]
    NonPositiveSamplePeriod,
    /// The actuator gain exponent `beta` must be finite.
    #[error("the actuator gain exponent must be finite")]
    NonFiniteGain,
    /// The estimator measurement noise `r` must be strictly positive.
    #[error("the measurement noise must be positive")]
    NonPositiveMeasurementNoise,
    /// The regulator control weight `r` must be strictly positive.
    #[error("the control weight must be positive")]
    NonPositiveControlWeight,
    /// Process noise and state weights must not be negative.
    #[error("process noise and state weights must not be negative")]
    NegativeWeight,
    /// The bias limit must not be negative.
    #[error("the bias limit must not be negative")]
    NegativeBiasLimit,
}
