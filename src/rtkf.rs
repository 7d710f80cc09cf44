//! The rate/torque/bias Kalman filter (RTKF).
//!
//! A steady-state discrete Kalman filter for a single axis, estimating the body rate, the
//! actuator torque and a slowly varying torque bias from a rate measurement and the
//! previous actuator command.

mod filter;
mod types;

pub use filter::RateTorqueKalmanFilter;
pub use types::{RtkfState, RTKF_SOLUTION_LIMIT, STATES};
