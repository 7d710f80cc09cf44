use crate::lqr::LinearQuadraticRegulator;
use crate::rtkf::RateTorqueKalmanFilter;
use crate::{EstimatorNoise, LqgController, ParameterError, PlantModel, RegulatorWeights};
use num_traits::Float;

/// Everything needed to build the controller of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisParameters<T> {
    /// The identified actuator and torque model.
    pub plant: PlantModel<T>,
    /// The estimator noise model.
    pub estimator: EstimatorNoise<T>,
    /// The regulator weights.
    pub regulator: RegulatorWeights<T>,
}

impl<T> AxisParameters<T> {
    /// Initializes a new [`AxisParameters`] instance.
    #[inline(always)]
    pub const fn new(
        plant: PlantModel<T>,
        estimator: EstimatorNoise<T>,
        regulator: RegulatorWeights<T>,
    ) -> Self {
        Self {
            plant,
            estimator,
            regulator,
        }
    }

    /// Checks the plant model, the estimator noise and the regulator weights, in that order.
    pub fn validate(&self) -> Result<(), ParameterError>
    where
        T: Float,
    {
        self.plant.validate()?;
        self.estimator.validate()?;
        self.regulator.validate()
    }

    /// Builds an unsolved [`LqgController`] from the parameters without validating them.
    pub fn build(&self) -> LqgController<T>
    where
        T: Float,
    {
        LqgController::new(
            RateTorqueKalmanFilter::new(&self.plant, &self.estimator),
            LinearQuadraticRegulator::new(&self.plant, &self.regulator),
        )
    }

    /// Validates the parameters and builds an unsolved [`LqgController`] from them.
    pub fn try_build(&self) -> Result<LqgController<T>, ParameterError>
    where
        T: Float,
    {
        self.validate()?;
        Ok(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> AxisParameters<f32> {
        AxisParameters::new(
            PlantModel::new(10.0, 0.05, 0.0025),
            EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5),
            RegulatorWeights::new(1e-5, 1.3333e-4, 1.0),
        )
    }

    #[test]
    fn test_build_is_unsolved() {
        let lqg = parameters().build();
        assert!(!lqg.is_solved());
        assert_eq!(lqg.rtkf().solver_iterations(), 0);
        assert_eq!(lqg.lqr().solver_iterations(), 0);
        assert_eq!(lqg.lqr().plant(), &parameters().plant);
    }

    #[test]
    fn test_try_build() {
        assert!(parameters().try_build().is_ok());

        let mut invalid = parameters();
        invalid.plant.tau = 0.0;
        assert_eq!(
            invalid.try_build().err(),
            Some(ParameterError::NonPositiveTimeConstant)
        );
    }

    #[test]
    fn test_validate_reports_first_error() {
        let mut invalid = parameters();
        invalid.estimator.r = -1.0;
        invalid.regulator.r = 0.0;
        assert_eq!(
            invalid.validate(),
            Err(ParameterError::NonPositiveMeasurementNoise)
        );
    }
}
