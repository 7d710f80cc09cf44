/// The convergence state of an iterative covariance solver.
///
/// The transition from [`Solving`](SolverStatus::Solving) to [`Solved`](SolverStatus::Solved)
/// is driven by an iteration count threshold only; it is an empirical heuristic, not a
/// measured convergence test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SolverStatus {
    /// The solver has not yet run the required number of iterations.
    #[default]
    Solving,
    /// The solver has run at least the required number of iterations.
    Solved,
}

impl SolverStatus {
    /// Derives the status from an iteration count and the solution limit.
    #[inline]
    pub const fn from_iterations(iterations: u32, limit: u32) -> Self {
        if iterations >= limit {
            Self::Solved
        } else {
            Self::Solving
        }
    }

    /// Returns `true` if the solver is considered converged.
    #[inline]
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iterations() {
        assert_eq!(SolverStatus::from_iterations(0, 150), SolverStatus::Solving);
        assert_eq!(SolverStatus::from_iterations(149, 150), SolverStatus::Solving);
        assert_eq!(SolverStatus::from_iterations(150, 150), SolverStatus::Solved);
        assert_eq!(SolverStatus::from_iterations(u32::MAX, 150), SolverStatus::Solved);
    }

    #[test]
    fn test_zero_limit_is_solved_immediately() {
        assert!(SolverStatus::from_iterations(0, 0).is_solved());
    }
}
