use super::{Pid, PositionSolver};
use crate::types::{Attitude, Mode, Setpoint, State};
use num_traits::Float;
use pid_controller::P;

/// Position and velocity loops producing a tilt (in degrees) and raw thrust.
///
/// Axes in [`Mode::Absolute`] follow the setpoint position through a
/// proportional loop that commands a velocity; other axes follow the
/// setpoint velocity directly.
#[derive(Clone, Debug)]
pub struct PidPositionController {
    /// Horizontal position to velocity gain.
    pub xy_position: P<f32>,
    /// Vertical position to velocity gain.
    pub z_position: P<f32>,

    pub x_velocity: Pid,
    pub y_velocity: Pid,
    pub z_velocity: Pid,

    /// Largest horizontal velocity commanded by the position loop (in m/s).
    pub max_xy_velocity: f32,
    /// Largest vertical velocity commanded by the position loop (in m/s).
    pub max_z_velocity: f32,

    /// Largest roll and pitch command (in degrees).
    pub roll_pitch_limit: f32,

    /// Raw thrust needed to hover.
    pub thrust_base: f32,
    /// Lowest raw thrust commanded while in flight.
    pub thrust_min: f32,
    /// Raw thrust per unit of vertical velocity loop output.
    pub thrust_scale: f32,
}

impl PidPositionController {
    /// Create the controller with the default gains for time-step `dt` in seconds.
    pub fn new(dt: f32) -> Self {
        Self {
            xy_position: P { kp: 2. },
            z_position: P { kp: 2. },
            x_velocity: Pid::new(25., 1., 0., dt),
            y_velocity: Pid::new(25., 1., 0., dt),
            z_velocity: Pid::new(25., 15., 0., dt),
            max_xy_velocity: 1.,
            max_z_velocity: 1.,
            roll_pitch_limit: 20.,
            thrust_base: 36000.,
            thrust_min: 20000.,
            thrust_scale: 1000.,
        }
    }
}

/// Velocity (in m/s) for a single axis to track.
fn velocity_cmd(
    mode: Mode,
    p: &P<f32>,
    position_cmd: f32,
    position: f32,
    velocity_cmd: f32,
    max_velocity: f32,
) -> f32 {
    match mode {
        Mode::Absolute => p
            .control(position_cmd, position)
            .max(-max_velocity)
            .min(max_velocity),
        Mode::Velocity | Mode::Disabled => velocity_cmd,
    }
}

impl PositionSolver for PidPositionController {
    fn solve(&mut self, thrust: &mut f32, attitude: &mut Attitude, setpoint: &Setpoint, state: &State) {
        let mode = &setpoint.mode;

        // 1. Calculate the velocity to track on each axis
        let vx_cmd = velocity_cmd(
            mode.x,
            &self.xy_position,
            setpoint.position.x,
            state.position.x,
            setpoint.velocity.x,
            self.max_xy_velocity,
        );
        let vy_cmd = velocity_cmd(
            mode.y,
            &self.xy_position,
            setpoint.position.y,
            state.position.y,
            setpoint.velocity.y,
            self.max_xy_velocity,
        );
        let vz_cmd = velocity_cmd(
            mode.z,
            &self.z_position,
            setpoint.position.z,
            state.position.z,
            setpoint.velocity.z,
            self.max_z_velocity,
        );

        // 2. Calculate the world frame tilt from the horizontal velocity error
        let roll_raw = self.x_velocity.update(vx_cmd, state.velocity.x);
        let pitch_raw = self.y_velocity.update(vy_cmd, state.velocity.y);

        // 3. Rotate the tilt into the body frame by the current heading
        let (sin_yaw, cos_yaw) = state.attitude.yaw.to_radians().sin_cos();
        let limit = self.roll_pitch_limit;
        attitude.pitch = (-(roll_raw * cos_yaw) - pitch_raw * sin_yaw)
            .max(-limit)
            .min(limit);
        attitude.roll = (-(pitch_raw * cos_yaw) + roll_raw * sin_yaw)
            .max(-limit)
            .min(limit);

        // 4. Calculate the thrust around hover from the vertical velocity error
        let thrust_raw = self.z_velocity.update(vz_cmd, state.velocity.z);
        *thrust = (thrust_raw * self.thrust_scale + self.thrust_base).max(self.thrust_min);
    }

    fn reset_all(&mut self) {
        self.x_velocity.reset();
        self.y_velocity.reset();
        self.z_velocity.reset();
    }
}
