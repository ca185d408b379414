use super::{Pid, RateSolver};
use crate::types::Attitude;

/// Largest raw actuator command on each axis.
pub const ACTUATOR_LIMIT: f32 = i16::MAX as f32;

/// Cutoff of the roll and pitch derivative low pass in hz.
pub const DERIVATIVE_CUTOFF_HZ: f32 = 30.;

/// Rate loop with one PID per axis, producing raw actuator commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidRateController {
    pub roll: Pid,
    pub pitch: Pid,
    pub yaw: Pid,
}

impl PidRateController {
    /// Create the controller with the default gains for time-step `dt` in seconds.
    pub fn new(dt: f32) -> Self {
        Self {
            roll: Pid::new(250., 500., 2.5, dt)
                .with_i_limit(33.3)
                .with_output_limit(ACTUATOR_LIMIT)
                .with_derivative_filter(DERIVATIVE_CUTOFF_HZ),
            pitch: Pid::new(250., 500., 2.5, dt)
                .with_i_limit(33.3)
                .with_output_limit(ACTUATOR_LIMIT)
                .with_derivative_filter(DERIVATIVE_CUTOFF_HZ),
            yaw: Pid::new(120., 16.7, 0., dt)
                .with_i_limit(166.7)
                .with_output_limit(ACTUATOR_LIMIT),
        }
    }
}

impl RateSolver for PidRateController {
    fn correct_rate(&mut self, gyro: Attitude, desired: Attitude) -> Attitude {
        Attitude::new(
            self.roll.update(desired.roll, gyro.roll),
            self.pitch.update(desired.pitch, gyro.pitch),
            self.yaw.update(desired.yaw, gyro.yaw),
        )
    }

    fn reset_all(&mut self) {
        self.roll.reset();
        self.pitch.reset();
        self.yaw.reset();
    }
}
