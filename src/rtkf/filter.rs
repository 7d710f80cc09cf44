use num_traits::Float;

use crate::macros::debug;
use crate::matrix::{ColumnVector3, Matrix, Matrix3};
use crate::rtkf::types::*;
use crate::{EstimatorNoise, PlantModel, Saturate, SolverStatus};

/// A steady-state Kalman filter estimating rate, torque and bias of one axis.
///
/// The filter gain is obtained by iterating the covariance recursion through
/// [`stabilize`](Self::stabilize) during warm-up; [`predict`](Self::predict) then only
/// applies the fixed gain, keeping the per-tick cost constant.
#[derive(Debug, Clone)]
pub struct RateTorqueKalmanFilter<T> {
    /// The state transition matrix A.
    state_transition: Matrix3<T>,
    /// The input matrix B.
    input: ColumnVector3<T>,
    /// The Kalman gain K.
    kalman_gain: ColumnVector3<T>,
    /// The estimate covariance P.
    covariance: Matrix3<T>,
    /// The diagonal process noise Q.
    process_noise: Matrix3<T>,
    /// The measurement noise R.
    measurement_noise: T,
    /// The state estimate X = [rate, torque, bias].
    state: ColumnVector3<T>,
    bias_limit: T,
    solver_iterations: u32,
    solution_limit: u32,
}

impl<T> RateTorqueKalmanFilter<T> {
    /// Initializes a new instance of the [`RateTorqueKalmanFilter`] struct.
    ///
    /// The state, covariance and gain start at zero; call [`stabilize`](Self::stabilize)
    /// until [`is_solved`](Self::is_solved) before relying on the estimate.
    ///
    /// ## Arguments
    /// * `plant` - The identified axis model. `tau` and `sample_time` must be positive.
    /// * `noise` - The process and measurement noise, and the bias limit. `r` must be positive.
    pub fn new(plant: &PlantModel<T>, noise: &EstimatorNoise<T>) -> Self
    where
        T: Float,
    {
        let (state_transition, input) =
            Self::initialize_matrices(plant.gain(), plant.tau, plant.sample_time);

        Self {
            state_transition,
            input,
            kalman_gain: ColumnVector3::zero(),
            covariance: Matrix3::zero(),
            process_noise: Matrix3::diagonal([noise.q_rate, noise.q_torque, noise.q_bias]),
            measurement_noise: noise.r,
            state: ColumnVector3::zero(),
            bias_limit: noise.bias_limit,
            solver_iterations: 0,
            solution_limit: RTKF_SOLUTION_LIMIT,
        }
    }

    /// Replaces the number of covariance iterations required for [`is_solved`](Self::is_solved).
    pub fn with_solution_limit(mut self, solution_limit: u32) -> Self {
        self.solution_limit = solution_limit;
        self
    }

    /// Builds the exact discretization of the first-order torque lag with a random-walk bias.
    ///
    /// ```text
    /// A = [ 1   g(τ - τe)   g(τ - τe) - Ts·g ]    B = [ Ts·g - g(τ - τe) ]
    ///     [ 0   e           e - 1            ]        [ 1 - e            ]
    ///     [ 0   0           1                ]        [ 0                ]
    /// ```
    ///
    /// where `e = e^(-Ts/τ)`.
    ///
    /// ## Arguments
    /// * `gain` - The actuator gain, i.e. `e^beta`.
    /// * `tau` - The torque time constant.
    /// * `sample_time` - The sample period Ts.
    pub fn initialize_matrices(gain: T, tau: T, sample_time: T) -> (Matrix3<T>, ColumnVector3<T>)
    where
        T: Float,
    {
        let zero = T::zero();
        let one = T::one();

        let decay = (-sample_time / tau).exp();
        let lag = gain * (tau - tau * decay);

        let state_transition = Matrix3::from_rows([
            [one, lag, lag - sample_time * gain],
            [zero, decay, decay - one],
            [zero, zero, one],
        ]);
        let input = ColumnVector3::column([sample_time * gain - lag, one - decay, zero]);

        (state_transition, input)
    }
}

impl<T> RateTorqueKalmanFilter<T> {
    /// Runs the covariance cycle `iterations` times and advances the iteration count.
    ///
    /// Incremental: warm-up can be spread over many calls.
    pub fn stabilize(&mut self, iterations: u32)
    where
        T: Float,
    {
        let was_solved = self.is_solved();

        for _ in 0..iterations {
            self.covariance_cycle();
        }
        self.solver_iterations = self.solver_iterations.saturating_add(iterations);

        if !was_solved && self.is_solved() {
            debug!("rtkf solved after {=u32} iterations", self.solver_iterations);
        }
    }

    /// Performs one Kalman covariance cycle.
    ///
    /// ```text
    /// P = A P Aᵀ + Q
    /// K = P Hᵀ (R + H P Hᵀ)⁻¹
    /// P = (I - K H) P
    /// ```
    ///
    /// with `H = [1 0 0]`, since only the rate is observed.
    fn covariance_cycle(&mut self)
    where
        T: Float,
    {
        let a = self.state_transition;
        let predicted = a * self.covariance * a.transpose() + self.process_noise;

        let innovation_covariance = predicted.get(0, 0) + self.measurement_noise;
        let mut gain = ColumnVector3::zero();
        for row in 0..STATES {
            gain.set_row(row, predicted.get(row, 0) / innovation_covariance);
        }

        let observation = Matrix::<T, 1, STATES>::from_rows([[T::one(), T::zero(), T::zero()]]);
        self.covariance = (Matrix3::identity() - gain * observation) * predicted;
        self.kalman_gain = gain;
    }

    /// Predicts the next state and corrects it with the measured rate.
    ///
    /// ```text
    /// x̂ = A X + B u
    /// X = x̂ - K (x̂₀ - y)
    /// ```
    ///
    /// The bias correction is additionally weighted by `clamp(1 - u⁴, 0, 1)`, so that large
    /// actuator demands, whose transients the model captures worst, do not leak into the
    /// slow bias estimate. The bias is then limited to `±bias_limit`.
    ///
    /// ## Arguments
    /// * `signal` - The measured rate.
    /// * `input` - The actuator command applied during the previous period.
    pub fn predict(&mut self, signal: T, input: T) -> RtkfState<T>
    where
        T: Float,
    {
        let one = T::one();

        let predicted = self.state_transition * self.state + self.input.scaled(input);
        let innovation = predicted.get_row(0) - signal;

        let input_sq = input * input;
        let bias_weight = (one - input_sq * input_sq).saturate(T::zero(), one);

        let k = &self.kalman_gain;
        let rate = predicted.get_row(0) - k.get_row(0) * innovation;
        let torque = predicted.get_row(1) - k.get_row(1) * innovation;
        let bias = predicted.get_row(2) - k.get_row(2) * innovation * bias_weight;

        self.state = ColumnVector3::column([rate, torque, bias.saturate_symmetric(self.bias_limit)]);
        self.state()
    }
}

impl<T> RateTorqueKalmanFilter<T> {
    /// Returns `true` once at least the solution limit of covariance iterations has run.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.status().is_solved()
    }

    /// Gets the solver status.
    #[inline]
    pub fn status(&self) -> SolverStatus {
        SolverStatus::from_iterations(self.solver_iterations, self.solution_limit)
    }

    /// Gets the number of covariance iterations run so far.
    #[inline]
    pub fn solver_iterations(&self) -> u32 {
        self.solver_iterations
    }

    /// Gets the number of covariance iterations required to be considered solved.
    #[inline]
    pub fn solution_limit(&self) -> u32 {
        self.solution_limit
    }

    /// Gets the current state estimate.
    pub fn state(&self) -> RtkfState<T>
    where
        T: Copy,
    {
        RtkfState::new(
            self.state.get_row(0),
            self.state.get_row(1),
            self.state.get_row(2),
        )
    }

    /// Overwrites the state estimate.
    pub fn set_state(&mut self, state: RtkfState<T>) {
        self.state.set_row(0, state.rate);
        self.state.set_row(1, state.torque);
        self.state.set_row(2, state.bias);
    }

    /// Gets the current Kalman gain, one entry per state.
    pub fn kalman_gain(&self) -> RtkfState<T>
    where
        T: Copy,
    {
        RtkfState::new(
            self.kalman_gain.get_row(0),
            self.kalman_gain.get_row(1),
            self.kalman_gain.get_row(2),
        )
    }

    /// Gets the estimate covariance P.
    #[inline]
    pub fn covariance(&self) -> &Matrix3<T> {
        &self.covariance
    }

    /// Gets the state transition matrix A.
    #[inline]
    pub fn state_transition(&self) -> &Matrix3<T> {
        &self.state_transition
    }

    /// Gets the input matrix B.
    #[inline]
    pub fn input_matrix(&self) -> &ColumnVector3<T> {
        &self.input
    }

    /// Gets the symmetric bias limit.
    #[inline]
    pub fn bias_limit(&self) -> T
    where
        T: Copy,
    {
        self.bias_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn plant() -> PlantModel<f64> {
        PlantModel::new(10.0, 0.05, 0.0025)
    }

    fn noise() -> EstimatorNoise<f64> {
        EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5)
    }

    fn solved_filter() -> RateTorqueKalmanFilter<f64> {
        let mut filter = RateTorqueKalmanFilter::new(&plant(), &noise());
        filter.stabilize(RTKF_SOLUTION_LIMIT);
        filter
    }

    #[test]
    fn test_initialize_matrices_unit_gain() {
        // beta = 0, i.e. e^beta = 1.
        let filter = RateTorqueKalmanFilter::new(
            &PlantModel::new(0.0_f64, 0.05, 0.0025),
            &noise(),
        );

        let a = filter.state_transition();
        assert_eq!(a.get(0, 0), 1.0);
        assert_relative_eq!(a.get(0, 1), 0.0024385287749642964, max_relative = 1e-12);
        assert_relative_eq!(a.get(0, 2), -6.147122503570362e-05, max_relative = 1e-9);
        assert_eq!(a.get(1, 0), 0.0);
        assert_relative_eq!(a.get(1, 1), 0.951229424500714, max_relative = 1e-14);
        assert_relative_eq!(a.get(1, 2), -0.048770575499285984, max_relative = 1e-12);
        assert_eq!(a.get(2, 0), 0.0);
        assert_eq!(a.get(2, 1), 0.0);
        assert_eq!(a.get(2, 2), 1.0);

        let b = filter.input_matrix();
        assert_relative_eq!(b.get_row(0), 6.147122503570362e-05, max_relative = 1e-9);
        assert_relative_eq!(b.get_row(1), 0.048770575499285984, max_relative = 1e-12);
        assert_eq!(b.get_row(2), 0.0);
    }

    #[test]
    fn test_state_transition_upper_triangular() {
        for (beta, tau, ts) in [
            (0.0_f32, 0.05, 0.0025),
            (10.0, 0.05, 0.0025),
            (7.5, 0.02, 0.001),
            (12.0, 0.1, 0.004),
        ] {
            let (a, b) = RateTorqueKalmanFilter::initialize_matrices(beta.exp(), tau, ts);
            assert_eq!(a.get(1, 0), 0.0);
            assert_eq!(a.get(2, 0), 0.0);
            assert_eq!(a.get(2, 1), 0.0);
            assert_eq!(a.get(2, 2), 1.0);
            assert!(a.get(1, 1) > 0.0 && a.get(1, 1) < 1.0);
            assert_eq!(b.get_row(2), 0.0);
        }
    }

    #[test]
    fn test_starts_unsolved() {
        let filter = RateTorqueKalmanFilter::new(&plant(), &noise());
        assert_eq!(filter.status(), SolverStatus::Solving);
        assert_eq!(filter.solver_iterations(), 0);
        assert_eq!(filter.kalman_gain(), RtkfState::default());
        assert_eq!(filter.state(), RtkfState::default());
    }

    #[test]
    fn test_is_solved_after_solution_limit() {
        let mut filter = RateTorqueKalmanFilter::new(&plant(), &noise());
        filter.stabilize(RTKF_SOLUTION_LIMIT - 1);
        assert!(!filter.is_solved());
        filter.stabilize(1);
        assert!(filter.is_solved());
        assert_eq!(filter.solver_iterations(), RTKF_SOLUTION_LIMIT);
    }

    #[test]
    fn test_custom_solution_limit() {
        let mut filter = RateTorqueKalmanFilter::new(&plant(), &noise()).with_solution_limit(10);
        filter.stabilize(9);
        assert!(!filter.is_solved());
        filter.stabilize(1);
        assert!(filter.is_solved());
    }

    #[test]
    fn test_gain_converges_within_solution_limit() {
        let mut filter = RateTorqueKalmanFilter::new(&plant(), &noise());
        filter.stabilize(RTKF_SOLUTION_LIMIT - 1);
        let before = filter.kalman_gain();
        filter.stabilize(1);
        let after = filter.kalman_gain();

        for i in 0..STATES {
            assert_abs_diff_eq!(before[i], after[i], epsilon = 1e-6);
        }

        // Reference values of the fully converged gain.
        assert_relative_eq!(after.rate, 0.48902438433, max_relative = 1e-6);
        assert_relative_eq!(after.torque, 0.00226008839, max_relative = 1e-5);
        assert_relative_eq!(after.bias, -0.00226047698, max_relative = 1e-5);
    }

    #[test]
    fn test_stabilize_is_incremental() {
        let mut once = RateTorqueKalmanFilter::new(&plant(), &noise());
        once.stabilize(150);

        let mut chunked = RateTorqueKalmanFilter::new(&plant(), &noise());
        chunked.stabilize(50);
        chunked.stabilize(50);
        chunked.stabilize(50);

        assert_eq!(once.covariance(), chunked.covariance());
        assert_eq!(once.kalman_gain(), chunked.kalman_gain());
        assert_eq!(once.solver_iterations(), chunked.solver_iterations());
    }

    #[test]
    fn test_covariance_stays_symmetric() {
        let filter = solved_filter();
        let p = filter.covariance();
        for r in 0..STATES {
            for c in 0..STATES {
                assert_relative_eq!(p.get(r, c), p.get(c, r), max_relative = 1e-9, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_predict_tracks_constant_signal() {
        let mut filter = solved_filter();
        let mut state = filter.state();
        for _ in 0..2000 {
            state = filter.predict(1.0, 0.0);
        }

        assert_abs_diff_eq!(state.rate, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(state.torque, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(state.bias, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bias_freezes_under_full_input() {
        for input in [1.0, -1.0] {
            let mut filter = solved_filter();
            filter.set_state(RtkfState::new(0.0, 0.0, 0.2));

            for k in 0..500 {
                let signal = 1000.0 * ((k % 5) as f64 - 2.0);
                let state = filter.predict(signal, input);
                assert_eq!(state.bias, 0.2);
            }
        }
    }

    #[test]
    fn test_bias_stays_within_limit() {
        let mut filter = solved_filter();
        for k in 0..2000 {
            let signal = if (k / 7) % 2 == 0 { -1e4 } else { 1e4 };
            let state = filter.predict(signal, 0.5);
            assert!(state.bias.abs() <= filter.bias_limit());
        }
    }

    #[test]
    fn test_f32_filter_converges() {
        let mut filter = RateTorqueKalmanFilter::new(
            &PlantModel::new(10.0_f32, 0.05, 0.0025),
            &EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5),
        );
        filter.stabilize(RTKF_SOLUTION_LIMIT);
        assert_relative_eq!(filter.kalman_gain().rate, 0.489024, max_relative = 1e-3);
    }
}
