//! # rate-lqg
//!
//! A per-axis LQG rate controller for flight control: a steady-state Kalman filter estimating
//! rate, torque and torque bias ([`rtkf`]), coupled with a linear-quadratic regulator on rate
//! and torque ([`lqr`]), both solved by iterating their covariance recursions.
//!
//! ```
//! use rate_lqg::{AxisParameters, EstimatorNoise, PlantModel, RegulatorWeights};
//!
//! let parameters = AxisParameters::new(
//!     PlantModel::new(10.0_f32, 0.05, 0.0025),
//!     EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5),
//!     RegulatorWeights::new(1e-5, 1.3333e-4, 1.0),
//! );
//!
//! let mut lqg = parameters.try_build().unwrap();
//! while !lqg.is_solved() {
//!     lqg.run_covariance(100);
//! }
//!
//! let u = lqg.controller(0.0, 200.0);
//! assert!(u > 0.0 && u <= 1.0);
//! ```

// Enable no_std mode.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod actuator_commands;
mod axis;
mod axis_parameters;
mod body_rates;
mod error;
mod estimator_noise;
mod lqg;
pub mod lqr;
mod macros;
pub mod matrix;
mod num_traits;
mod plant_model;
mod rate_controller;
mod regulator_weights;
pub mod rtkf;
mod solver_status;

pub use crate::actuator_commands::ActuatorCommands;
pub use crate::axis::Axis;
pub use crate::axis_parameters::AxisParameters;
pub use crate::body_rates::BodyRates;
pub use crate::error::ParameterError;
pub use crate::estimator_noise::EstimatorNoise;
pub use crate::lqg::LqgController;
pub use crate::lqr::{LinearQuadraticRegulator, LqrGains};
pub use crate::plant_model::PlantModel;
pub use crate::rate_controller::RateController;
pub use crate::regulator_weights::RegulatorWeights;
pub use crate::rtkf::{RateTorqueKalmanFilter, RtkfState};
pub use crate::solver_status::SolverStatus;

pub use crate::num_traits::*;
