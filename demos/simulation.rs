//! Closed-loop simulation of a three-axis rate controller against its own plant model.
//!
//! Writes a CSV trace of setpoints, measured rates, estimates and commands to stdout:
//!
//! ```text
//! cargo run --example simulation --features std > trace.csv
//! ```

use std::error::Error;
use std::io;

use rate_lqg::matrix::{ColumnVector3, Matrix3};
use rate_lqg::{
    ActuatorCommands, Axis, AxisParameters, BodyRates, EstimatorNoise, PlantModel,
    RateController, RateTorqueKalmanFilter, RegulatorWeights,
};
use serde::Serialize;

const SAMPLE_TIME: f64 = 0.0025;
const DURATION: f64 = 3.0;
const WARMUP_ITERATIONS: u32 = 50;

#[derive(Debug, Serialize)]
struct TraceRow {
    #[serde(rename = "time")]
    time: f64,
    #[serde(rename = "axis")]
    axis: &'static str,
    #[serde(rename = "setpoint")]
    setpoint: f64,
    #[serde(rename = "rate")]
    rate: f64,
    #[serde(rename = "rate_estimate")]
    rate_estimate: f64,
    #[serde(rename = "torque_estimate")]
    torque_estimate: f64,
    #[serde(rename = "bias_estimate")]
    bias_estimate: f64,
    #[serde(rename = "command")]
    command: f64,
}

/// The discretized axis dynamics, with the true torque disturbance as the third state.
struct SimulatedAxis {
    a: Matrix3<f64>,
    b: ColumnVector3<f64>,
    x: ColumnVector3<f64>,
}

impl SimulatedAxis {
    fn new(plant: &PlantModel<f64>, disturbance: f64) -> Self {
        let (a, b) =
            RateTorqueKalmanFilter::initialize_matrices(plant.gain(), plant.tau, plant.sample_time);
        Self {
            a,
            b,
            x: ColumnVector3::column([0.0, 0.0, disturbance]),
        }
    }

    fn rate(&self) -> f64 {
        self.x.get_row(0)
    }

    fn step(&mut self, u: f64) {
        self.x = self.a * self.x + self.b.scaled(u);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let roll = axis_parameters(10.0);
    let pitch = axis_parameters(10.2);
    let yaw = AxisParameters::new(
        PlantModel::new(8.5, 0.09, SAMPLE_TIME),
        EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5),
        RegulatorWeights::new(1e-5, 1.3333e-4, 1.0),
    );

    roll.validate()?;
    pitch.validate()?;
    yaw.validate()?;

    let mut controller = RateController::from_parameters(&roll, &pitch, &yaw);

    // Spread the warm-up over several calls, as a low-priority task would.
    let mut warmup_calls = 0;
    while !controller.is_solved() {
        controller.run_covariance(WARMUP_ITERATIONS);
        warmup_calls += 1;
    }
    eprintln!("Solved after {warmup_calls} warm-up calls of {WARMUP_ITERATIONS} iterations");

    let mut axes = [
        SimulatedAxis::new(&roll.plant, 0.05),
        SimulatedAxis::new(&pitch.plant, -0.02),
        SimulatedAxis::new(&yaw.plant, 0.1),
    ];

    let mut writer = csv::Writer::from_writer(io::stdout());

    let steps = (DURATION / SAMPLE_TIME) as usize;
    for step in 0..steps {
        let time = step as f64 * SAMPLE_TIME;
        let setpoint = setpoint_at(time);
        let signal = BodyRates::new(axes[0].rate(), axes[1].rate(), axes[2].rate());

        let commands = controller.controller(signal, setpoint);
        let estimates = controller.estimates();

        for (i, axis) in Axis::ALL.into_iter().enumerate() {
            let estimate = estimates[i];
            writer.serialize(TraceRow {
                time,
                axis: axis_name(axis),
                setpoint: setpoint[i],
                rate: signal[i],
                rate_estimate: estimate.rate,
                torque_estimate: estimate.torque,
                bias_estimate: estimate.bias,
                command: commands[i],
            })?;
        }

        apply(&mut axes, &commands);
    }

    writer.flush()?;
    Ok(())
}

fn axis_parameters(beta: f64) -> AxisParameters<f64> {
    AxisParameters::new(
        PlantModel::new(beta, 0.05, SAMPLE_TIME),
        EstimatorNoise::new(10.0, 1e-3, 1e-3, 100.0, 0.5),
        RegulatorWeights::new(1e-5, 1.3333e-4, 1.0),
    )
}

/// Rate steps on roll and pitch, a slow sine on yaw.
fn setpoint_at(time: f64) -> BodyRates<f64> {
    let roll = if time < 0.5 { 0.0 } else if time < 1.5 { 360.0 } else { -180.0 };
    let pitch = if (1.0..2.0).contains(&time) { -270.0 } else { 0.0 };
    let yaw = 90.0 * (core::f64::consts::PI * time).sin();
    BodyRates::new(roll, pitch, yaw)
}

fn apply(axes: &mut [SimulatedAxis; 3], commands: &ActuatorCommands<f64>) {
    for (i, axis) in axes.iter_mut().enumerate() {
        axis.step(commands[i]);
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Roll => "roll",
        Axis::Pitch => "pitch",
        Axis::Yaw => "yaw",
    }
}
