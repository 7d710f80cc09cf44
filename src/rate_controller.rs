use crate::{ActuatorCommands, Axis, AxisParameters, BodyRates, LqgController, RtkfState};
use num_traits::Float;

/// A body rate controller running one independent [`LqgController`] per axis.
#[derive(Debug, Clone)]
pub struct RateController<T> {
    roll: LqgController<T>,
    pitch: LqgController<T>,
    yaw: LqgController<T>,
}

impl<T> RateController<T> {
    /// Initializes a new instance of the [`RateController`] struct from per-axis controllers.
    pub const fn new(roll: LqgController<T>, pitch: LqgController<T>, yaw: LqgController<T>) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Builds an unsolved controller from per-axis parameters without validating them.
    pub fn from_parameters(
        roll: &AxisParameters<T>,
        pitch: &AxisParameters<T>,
        yaw: &AxisParameters<T>,
    ) -> Self
    where
        T: Float,
    {
        Self::new(roll.build(), pitch.build(), yaw.build())
    }

    /// Runs one control tick on every axis.
    ///
    /// ## Arguments
    /// * `signal` - The measured body rates.
    /// * `setpoint` - The desired body rates.
    pub fn controller(&mut self, signal: BodyRates<T>, setpoint: BodyRates<T>) -> ActuatorCommands<T>
    where
        T: Float,
    {
        ActuatorCommands::new(
            self.roll.controller(signal.roll, setpoint.roll),
            self.pitch.controller(signal.pitch, setpoint.pitch),
            self.yaw.controller(signal.yaw, setpoint.yaw),
        )
    }

    /// Advances the covariance solvers of every axis that is not yet solved.
    pub fn run_covariance(&mut self, iterations: u32)
    where
        T: Float,
    {
        self.roll.run_covariance(iterations);
        self.pitch.run_covariance(iterations);
        self.yaw.run_covariance(iterations);
    }

    /// Returns `true` once every axis is solved.
    pub fn is_solved(&self) -> bool {
        self.roll.is_solved() && self.pitch.is_solved() && self.yaw.is_solved()
    }

    /// Gets the controller of one axis.
    pub fn axis(&self, axis: Axis) -> &LqgController<T> {
        match axis {
            Axis::Roll => &self.roll,
            Axis::Pitch => &self.pitch,
            Axis::Yaw => &self.yaw,
        }
    }

    /// Gets the controller of one axis for modification.
    pub fn axis_mut(&mut self, axis: Axis) -> &mut LqgController<T> {
        match axis {
            Axis::Roll => &mut self.roll,
            Axis::Pitch => &mut self.pitch,
            Axis::Yaw => &mut self.yaw,
        }
    }

    /// Seeds every axis estimator with an initial rate.
    pub fn set_x0(&mut self, rates: BodyRates<T>)
    where
        T: Float,
    {
        self.roll.set_x0(rates.roll);
        self.pitch.set_x0(rates.pitch);
        self.yaw.set_x0(rates.yaw);
    }

    /// Gets the estimated rate, torque and bias of every axis, in roll, pitch, yaw order.
    pub fn estimates(&self) -> [RtkfState<T>; 3]
    where
        T: Copy,
    {
        [
            self.roll.rtkf_state(),
            self.pitch.rtkf_state(),
            self.yaw.rtkf_state(),
        ]
    }

    /// Gets the estimated body rates.
    pub fn rate_estimate(&self) -> BodyRates<T>
    where
        T: Copy,
    {
        let [roll, pitch, yaw] = self.estimates();
        BodyRates::new(roll.rate, pitch.rate, yaw.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EstimatorNoise, PlantModel, RegulatorWeights};

    fn parameters(beta: f64) -> AxisParameters<f64> {
        AxisParameters::new(
            PlantModel::new(beta, 0.05, 0.0025),
            EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5),
            RegulatorWeights::new(1e-5, 1.3333e-4, 1.0),
        )
    }

    fn controller() -> RateController<f64> {
        RateController::from_parameters(&parameters(10.0), &parameters(10.0), &parameters(9.0))
    }

    #[test]
    fn test_run_covariance_solves_all_axes() {
        let mut controller = controller();
        assert!(!controller.is_solved());

        for _ in 0..10 {
            controller.run_covariance(100);
        }

        assert!(controller.is_solved());
        for axis in Axis::ALL {
            assert!(controller.axis(axis).is_solved());
        }
    }

    #[test]
    fn test_axes_are_independent() {
        let mut controller = controller();
        controller.run_covariance(1000);

        let commands = controller.controller(
            BodyRates::new(0.0, 0.0, 0.0),
            BodyRates::new(100.0, 0.0, 0.0),
        );

        assert!(commands.roll > 0.0);
        assert_eq!(commands.pitch, 0.0);
        assert_eq!(commands.yaw, 0.0);
        assert_eq!(controller.axis(Axis::Pitch).rtkf_state(), RtkfState::default());
    }

    #[test]
    fn test_axes_use_their_own_plant() {
        let mut controller = controller();
        controller.run_covariance(1000);

        let roll = controller.axis(Axis::Roll).lqr().gains();
        let yaw = controller.axis(Axis::Yaw).lqr().gains();
        assert_ne!(roll, yaw);
    }

    #[test]
    fn test_commands_are_saturated() {
        let mut controller = controller();
        controller.run_covariance(1000);

        for k in 0..100 {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            let commands = controller.controller(
                BodyRates::default(),
                BodyRates::new(1e6, -1e6, 1e6) * sign,
            );
            for i in 0..commands.len() {
                assert!(commands[i].abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_retune_single_axis() {
        let mut controller = controller();
        controller.run_covariance(1000);

        controller
            .axis_mut(Axis::Yaw)
            .lqr_mut()
            .update(&RegulatorWeights::new(1e-5, 1e-4, 1e-2));

        assert!(!controller.is_solved());
        assert!(controller.axis(Axis::Roll).is_solved());
        controller.run_covariance(1000);
        assert!(controller.is_solved());
    }

    #[test]
    fn test_set_x0() {
        let mut controller = controller();
        controller.set_x0(BodyRates::new(1.0, -2.0, 3.0));

        assert_eq!(controller.rate_estimate(), BodyRates::new(1.0, -2.0, 3.0));
        let [roll, pitch, yaw] = controller.estimates();
        assert_eq!(roll, RtkfState::new(1.0, 0.0, 0.0));
        assert_eq!(pitch, RtkfState::new(-2.0, 0.0, 0.0));
        assert_eq!(yaw, RtkfState::new(3.0, 0.0, 0.0));
    }
}
