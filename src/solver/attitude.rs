use super::{AttitudeSolver, Pid};
use crate::{types::Attitude, yaw::wrap_180};

/// Angle loop with one PID per axis, producing rates in degrees/second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidAttitudeController {
    pub roll: Pid,
    pub pitch: Pid,
    pub yaw: Pid,
}

impl PidAttitudeController {
    /// Create the controller with the default gains for time-step `dt` in seconds.
    pub fn new(dt: f32) -> Self {
        Self {
            roll: Pid::new(6., 3., 0., dt).with_i_limit(20.),
            pitch: Pid::new(6., 3., 0., dt).with_i_limit(20.),
            yaw: Pid::new(6., 1., 0.35, dt).with_i_limit(360.),
        }
    }
}

impl AttitudeSolver for PidAttitudeController {
    fn correct_attitude(&mut self, measured: Attitude, desired: Attitude) -> Attitude {
        let roll = self.roll.update(desired.roll, measured.roll);
        let pitch = self.pitch.update(desired.pitch, measured.pitch);

        // Take the short way around to the desired heading
        let yaw_error = wrap_180(desired.yaw - measured.yaw);
        let yaw = self.yaw.update_with_error(desired.yaw, measured.yaw, yaw_error);

        Attitude::new(roll, pitch, yaw)
    }

    fn reset_roll(&mut self) {
        self.roll.reset();
    }

    fn reset_pitch(&mut self) {
        self.pitch.reset();
    }

    fn reset_all(&mut self) {
        self.roll.reset();
        self.pitch.reset();
        self.yaw.reset();
    }

    fn self_test(&self) -> bool {
        [self.roll, self.pitch, self.yaw]
            .iter()
            .all(|pid| pid.dt > 0. && pid.kp.is_finite() && pid.ki.is_finite() && pid.kd.is_finite())
    }
}
