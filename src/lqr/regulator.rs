use num_traits::Float;

use crate::lqr::types::*;
use crate::macros::debug;
use crate::matrix::{ColumnVector2, Matrix2};
use crate::{PlantModel, RegulatorWeights, SolverStatus};

/// A discrete-time LQR for the rate/torque model of one axis.
///
/// The regulator also keeps the last control value fed back by the controller, which the
/// estimator uses as its input on the next tick.
#[derive(Debug, Clone)]
pub struct LinearQuadraticRegulator<T> {
    /// The state transition matrix A.
    state_transition: Matrix2<T>,
    /// The input matrix B.
    input: ColumnVector2<T>,
    /// The feedback gain K.
    gains: LqrGains<T>,
    /// The Riccati solution P.
    covariance: Matrix2<T>,
    /// The diagonal state weights Q.
    state_weights: Matrix2<T>,
    /// The control weight R.
    control_weight: T,
    /// The last control output u.
    control: T,
    /// The model the matrices were built from; `beta` rescales the torque weight on retune.
    plant: PlantModel<T>,
    solver_iterations: u32,
    solution_limit: u32,
}

impl<T> LinearQuadraticRegulator<T> {
    /// Initializes a new instance of the [`LinearQuadraticRegulator`] struct.
    ///
    /// The Riccati solution and the gains start at zero; call [`stabilize`](Self::stabilize)
    /// until [`is_solved`](Self::is_solved).
    ///
    /// ## Arguments
    /// * `plant` - The identified axis model. `tau` and `sample_time` must be positive.
    /// * `weights` - The state and control weights. `r` must be positive.
    pub fn new(plant: &PlantModel<T>, weights: &RegulatorWeights<T>) -> Self
    where
        T: Float,
    {
        let gain = plant.gain();
        let (state_transition, input) =
            Self::initialize_matrices(gain, plant.tau, plant.sample_time);

        Self {
            state_transition,
            input,
            gains: LqrGains::new(T::zero(), T::zero()),
            covariance: Matrix2::zero(),
            state_weights: Matrix2::diagonal([weights.q_rate, weights.q_torque * gain]),
            control_weight: weights.r,
            control: T::zero(),
            plant: *plant,
            solver_iterations: 0,
            solution_limit: LQR_SOLUTION_LIMIT,
        }
    }

    /// Replaces the number of Riccati iterations required for [`is_solved`](Self::is_solved).
    pub fn with_solution_limit(mut self, solution_limit: u32) -> Self {
        self.solution_limit = solution_limit;
        self
    }

    /// Builds the discretized rate/torque model.
    ///
    /// ```text
    /// A = [ 1   -gτ(e - 1) ]    B = [ Ts·g + gτ(e - 1) ]
    ///     [ 0   e          ]        [ 1 - e            ]
    /// ```
    ///
    /// where `e = e^(-Ts/τ)`.
    ///
    /// ## Arguments
    /// * `gain` - The actuator gain, i.e. `e^beta`.
    /// * `tau` - The torque time constant.
    /// * `sample_time` - The sample period Ts.
    pub fn initialize_matrices(gain: T, tau: T, sample_time: T) -> (Matrix2<T>, ColumnVector2<T>)
    where
        T: Float,
    {
        let one = T::one();
        let decay = (-sample_time / tau).exp();

        let state_transition = Matrix2::from_rows([
            [one, -gain * tau * (decay - one)],
            [T::zero(), decay],
        ]);
        let input = ColumnVector2::column([
            sample_time * gain + gain * tau * (decay - one),
            one - decay,
        ]);

        (state_transition, input)
    }
}

impl<T> LinearQuadraticRegulator<T> {
    /// Replaces the weights and restarts the solver.
    ///
    /// The Riccati solution is kept as a warm start, but [`is_solved`](Self::is_solved) reports
    /// `false` until another full solution limit of iterations has run.
    pub fn update(&mut self, weights: &RegulatorWeights<T>)
    where
        T: Float,
    {
        self.state_weights =
            Matrix2::diagonal([weights.q_rate, weights.q_torque * self.plant.gain()]);
        self.control_weight = weights.r;
        self.solver_iterations = 0;

        debug!("lqr weights updated, solver restarted");
    }

    /// Runs the Riccati recursion `iterations` times, then recomputes the gains.
    pub fn stabilize(&mut self, iterations: u32)
    where
        T: Float,
    {
        let was_solved = self.is_solved();

        for _ in 0..iterations {
            self.covariance_cycle();
        }
        self.calculate_gains();
        self.solver_iterations = self.solver_iterations.saturating_add(iterations);

        if !was_solved && self.is_solved() {
            debug!("lqr solved after {=u32} iterations", self.solver_iterations);
        }
    }

    /// Performs one step of the discrete Riccati recursion.
    ///
    /// ```text
    /// P = AᵀPA - AᵀPB (R + BᵀPB)⁻¹ BᵀPA + Q
    /// ```
    fn covariance_cycle(&mut self)
    where
        T: Float,
    {
        let a = self.state_transition;
        let b = self.input;
        let p = self.covariance;
        let at = a.transpose();
        let bt = b.transpose();

        let pa = p * a;
        let btpa = bt * pa;
        let atpb = at * p * b;
        let denominator = self.control_weight + (bt * p * b).get(0, 0);

        self.covariance =
            at * pa - (atpb * btpa).scaled(denominator.recip()) + self.state_weights;
    }

    /// Calculates the gains from the current Riccati solution.
    ///
    /// ```text
    /// K = (R + BᵀPB)⁻¹ BᵀPA
    /// ```
    fn calculate_gains(&mut self)
    where
        T: Float,
    {
        let a = self.state_transition;
        let b = self.input;
        let p = self.covariance;
        let bt = b.transpose();

        let btpa = bt * p * a;
        let denominator = self.control_weight + (bt * p * b).get(0, 0);

        self.gains = LqrGains::new(btpa.get(0, 0) / denominator, btpa.get(0, 1) / denominator);
    }
}

impl<T> LinearQuadraticRegulator<T> {
    /// Gets the current feedback gains.
    ///
    /// Available at any time, also while the solver is still converging.
    #[inline]
    pub fn gains(&self) -> LqrGains<T>
    where
        T: Copy,
    {
        self.gains
    }

    /// Gets the last control output.
    #[inline]
    pub fn control(&self) -> T
    where
        T: Copy,
    {
        self.control
    }

    /// Stores the control output to be used as the estimator input on the next tick.
    #[inline]
    pub fn set_control(&mut self, control: T) {
        self.control = control;
    }

    /// Returns `true` once at least the solution limit of Riccati iterations has run.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.status().is_solved()
    }

    /// Gets the solver status.
    #[inline]
    pub fn status(&self) -> SolverStatus {
        SolverStatus::from_iterations(self.solver_iterations, self.solution_limit)
    }

    /// Gets the number of Riccati iterations run since construction or the last update.
    #[inline]
    pub fn solver_iterations(&self) -> u32 {
        self.solver_iterations
    }

    /// Gets the number of Riccati iterations required to be considered solved.
    #[inline]
    pub fn solution_limit(&self) -> u32 {
        self.solution_limit
    }

    /// Gets the Riccati solution P.
    #[inline]
    pub fn covariance(&self) -> &Matrix2<T> {
        &self.covariance
    }

    /// Gets the state weights Q, with the torque weight already scaled by the actuator gain.
    #[inline]
    pub fn state_weights(&self) -> &Matrix2<T> {
        &self.state_weights
    }

    /// Gets the control weight R.
    #[inline]
    pub fn control_weight(&self) -> T
    where
        T: Copy,
    {
        self.control_weight
    }

    /// Gets the state transition matrix A.
    #[inline]
    pub fn state_transition(&self) -> &Matrix2<T> {
        &self.state_transition
    }

    /// Gets the input matrix B.
    #[inline]
    pub fn input_matrix(&self) -> &ColumnVector2<T> {
        &self.input
    }

    /// Gets the model the regulator was built from.
    #[inline]
    pub fn plant(&self) -> &PlantModel<T> {
        &self.plant
    }
}
