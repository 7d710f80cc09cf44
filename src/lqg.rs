//! The per-axis LQG controller, coupling one RTKF and one LQR.

use num_traits::Float;

use crate::lqr::LinearQuadraticRegulator;
use crate::rtkf::{RateTorqueKalmanFilter, RtkfState};
use crate::{Saturate, SolverStatus};

/// A closed-loop rate controller for a single axis.
///
/// Each tick, the estimator is driven with the measured rate and the controller's own
/// previous output; the regulator gains are then applied to the estimated rate error and
/// torque, offset by the estimated bias.
///
/// ```text
/// X = rtkf(signal, u₋₁)
/// u = X₂ - K₀ (X₀ - setpoint) - K₁ X₁,  clamped to [-1, 1]
/// ```
#[derive(Debug, Clone)]
pub struct LqgController<T> {
    rtkf: RateTorqueKalmanFilter<T>,
    lqr: LinearQuadraticRegulator<T>,
}

impl<T> LqgController<T> {
    /// Initializes a new instance of the [`LqgController`] struct.
    ///
    /// ## Arguments
    /// * `rtkf` - The estimator of the axis.
    /// * `lqr` - The regulator of the axis.
    pub const fn new(rtkf: RateTorqueKalmanFilter<T>, lqr: LinearQuadraticRegulator<T>) -> Self {
        Self { rtkf, lqr }
    }

    /// Splits the controller into its estimator and regulator.
    pub fn into_parts(self) -> (RateTorqueKalmanFilter<T>, LinearQuadraticRegulator<T>) {
        (self.rtkf, self.lqr)
    }
}

impl<T> LqgController<T> {
    /// Runs one control tick and returns the normalized actuator command in `[-1, 1]`.
    ///
    /// ## Arguments
    /// * `signal` - The measured rate.
    /// * `setpoint` - The desired rate.
    pub fn controller(&mut self, signal: T, setpoint: T) -> T
    where
        T: Float,
    {
        let estimate = self.rtkf.predict(signal, self.lqr.control());
        let gains = self.lqr.gains();

        let rate_error = estimate.rate - setpoint;
        let u = (estimate.bias - gains.rate * rate_error - gains.torque * estimate.torque)
            .saturate_symmetric(T::one());

        self.lqr.set_control(u);
        u
    }

    /// Advances the covariance solvers that are not yet solved by `iterations` steps each.
    ///
    /// Meant for a low-priority warm-up task; once both solvers are solved this is a no-op.
    pub fn run_covariance(&mut self, iterations: u32)
    where
        T: Float,
    {
        if !self.rtkf.is_solved() {
            self.rtkf.stabilize(iterations);
        }
        if !self.lqr.is_solved() {
            self.lqr.stabilize(iterations);
        }
    }

    /// Returns `true` if both the estimator and the regulator are solved.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.rtkf.is_solved() && self.lqr.is_solved()
    }

    /// Gets the combined solver status.
    #[inline]
    pub fn status(&self) -> SolverStatus {
        if self.is_solved() {
            SolverStatus::Solved
        } else {
            SolverStatus::Solving
        }
    }

    /// Seeds the estimator with an initial rate, clearing torque and bias.
    pub fn set_x0(&mut self, x0: T)
    where
        T: Float,
    {
        self.rtkf.set_state(RtkfState::new(x0, T::zero(), T::zero()));
    }

    /// Gets the estimated rate, torque and bias.
    #[inline]
    pub fn rtkf_state(&self) -> RtkfState<T>
    where
        T: Copy,
    {
        self.rtkf.state()
    }

    /// Gets the last actuator command.
    #[inline]
    pub fn command(&self) -> T
    where
        T: Copy,
    {
        self.lqr.control()
    }

    /// Gets the estimator.
    #[inline]
    pub fn rtkf(&self) -> &RateTorqueKalmanFilter<T> {
        &self.rtkf
    }

    /// Gets the estimator for modification.
    #[inline]
    pub fn rtkf_mut(&mut self) -> &mut RateTorqueKalmanFilter<T> {
        &mut self.rtkf
    }

    /// Gets the regulator.
    #[inline]
    pub fn lqr(&self) -> &LinearQuadraticRegulator<T> {
        &self.lqr
    }

    /// Gets the regulator for modification, e.g. to retune its weights in flight.
    #[inline]
    pub fn lqr_mut(&mut self) -> &mut LinearQuadraticRegulator<T> {
        &mut self.lqr
    }
}
