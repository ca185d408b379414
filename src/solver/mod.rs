//! Control laws plugged into the cascade.
//!
//! The cascade only depends on the traits in this module, see
//! [`PidAttitudeController`], [`PidRateController`] and
//! [`PidPositionController`] for PID implementations.

use crate::types::{Attitude, Setpoint, State};

mod attitude;
pub use attitude::PidAttitudeController;

pub mod pid;
pub use pid::Pid;

mod position;
pub use position::PidPositionController;

mod rate;
pub use rate::PidRateController;

mod tilt;
pub use tilt::{FixedCompensation, TiltEstimate};

#[cfg(test)]
pub(crate) mod mock;

/// Outer attitude loop: angle error to desired angular rate.
pub trait AttitudeSolver {
    /// Calculate the desired rates (in degrees/second) to move the measured attitude
    /// to the desired attitude (both in degrees).
    fn correct_attitude(&mut self, measured: Attitude, desired: Attitude) -> Attitude;

    /// Reset the accumulated error of the roll angle loop.
    fn reset_roll(&mut self);

    /// Reset the accumulated error of the pitch angle loop.
    fn reset_pitch(&mut self);

    /// Reset the accumulated error of every loop.
    fn reset_all(&mut self);

    /// Returns `true` if the solver is ready to fly.
    fn self_test(&self) -> bool {
        true
    }
}

/// Inner attitude loop: rate error to raw actuator output.
pub trait RateSolver {
    /// Calculate the raw roll, pitch and yaw actuator output from the
    /// measured and desired rates (in degrees/second).
    fn correct_rate(&mut self, gyro: Attitude, desired: Attitude) -> Attitude;

    fn reset_all(&mut self);
}

/// Position loop producing thrust and attitude.
pub trait PositionSolver {
    /// Update `thrust` and `attitude` to follow the position setpoint.
    fn solve(&mut self, thrust: &mut f32, attitude: &mut Attitude, setpoint: &Setpoint, state: &State);

    fn reset_all(&mut self);
}

/// Sensor-fusion accessor for the thrust tilt factor.
pub trait TiltCompensation {
    /// Vertical share of thrust at the current bank angle, in (0, 1].
    /// The cascade divides thrust by this value when compensation is enabled.
    fn inv_thrust_compensation_for_tilt(&self) -> f32;
}

impl<T: AttitudeSolver + ?Sized> AttitudeSolver for &mut T {
    fn correct_attitude(&mut self, measured: Attitude, desired: Attitude) -> Attitude {
        (**self).correct_attitude(measured, desired)
    }

    fn reset_roll(&mut self) {
        (**self).reset_roll()
    }

    fn reset_pitch(&mut self) {
        (**self).reset_pitch()
    }

    fn reset_all(&mut self) {
        (**self).reset_all()
    }

    fn self_test(&self) -> bool {
        (**self).self_test()
    }
}

impl<T: RateSolver + ?Sized> RateSolver for &mut T {
    fn correct_rate(&mut self, gyro: Attitude, desired: Attitude) -> Attitude {
        (**self).correct_rate(gyro, desired)
    }

    fn reset_all(&mut self) {
        (**self).reset_all()
    }
}

impl<T: PositionSolver + ?Sized> PositionSolver for &mut T {
    fn solve(&mut self, thrust: &mut f32, attitude: &mut Attitude, setpoint: &Setpoint, state: &State) {
        (**self).solve(thrust, attitude, setpoint, state)
    }

    fn reset_all(&mut self) {
        (**self).reset_all()
    }
}

impl<T: TiltCompensation + ?Sized> TiltCompensation for &T {
    fn inv_thrust_compensation_for_tilt(&self) -> f32 {
        (**self).inv_thrust_compensation_for_tilt()
    }
}
