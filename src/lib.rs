//! # embedded-cascade
//! A `#![no_std]` flight control cascade for multi-copters.
//!
//! [`Cascade`] runs one control step per tick of the main loop:
//! the position loop, the attitude (angle) loop and the rate loop,
//! each at its own sub-rate of the same tick counter.
//!
//! The control laws are plugged in through the [`solver`] traits
//! (see [`PidCascade`] for the PID implementations).
//!
//! [`Stabilizer`] drives a cascade from an [`embedded_time::Clock`].
//!
//! ```
//! use embedded_cascade::{
//!     solver::TiltEstimate, CascadeConfig, Control, PidCascade, SensorData, Setpoint, State,
//! };
//!
//! let mut cascade = PidCascade::pid(CascadeConfig::default(), TiltEstimate::default()).unwrap();
//!
//! let setpoint = Setpoint {
//!     thrust: 30000.,
//!     ..Setpoint::default()
//! };
//!
//! let mut control = Control::default();
//! for tick in 0..10 {
//!     cascade.update(&mut control, &setpoint, &SensorData::default(), &State::default(), tick);
//! }
//! assert_eq!(control.thrust, 30000.);
//! ```

#![no_std]

#[macro_use]
mod fmt;

pub mod cascade;
pub use cascade::{Cascade, PidCascade, PositionCorrection, PositionSnapshot};

pub mod config;
pub use config::CascadeConfig;

mod error;
pub use error::Error;

pub mod filter;

pub mod mode;

pub mod param;
pub use param::Param;

pub mod rate;
pub use rate::RateDivider;

pub mod solver;

pub mod stabilizer;
pub use stabilizer::Stabilizer;

pub mod telemetry;
pub use telemetry::{Diagnostics, LogVariable};

pub mod types;
pub use types::{Attitude, AxisModes, Control, Mode, SensorData, Setpoint, State};

pub mod yaw;
