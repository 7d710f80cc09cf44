//! The rate/torque linear-quadratic regulator (LQR).
//!
//! The optimal feedback gain is found by iterating the discrete Riccati recursion instead of
//! solving the DARE in closed form. The results match `dare()`/`dlqr()` closely, and the
//! iteration can be spread over several low-priority calls during warm-up.

mod regulator;
mod types;

pub use regulator::LinearQuadraticRegulator;
pub use types::{LqrGains, LQR_SOLUTION_LIMIT, STATES};
