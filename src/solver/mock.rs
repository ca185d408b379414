use super::{AttitudeSolver, PositionSolver, RateSolver};
use crate::types::{Attitude, Setpoint, State};

/// Attitude solver returning a fixed rate and an accumulated error per axis.
#[derive(Debug, Default)]
pub struct MockAttitude {
    pub output: Attitude,
    pub calls: u32,
    pub last_desired: Attitude,
    pub accumulated: Attitude,
    pub roll_resets: u32,
    pub pitch_resets: u32,
    pub full_resets: u32,
}

impl AttitudeSolver for MockAttitude {
    fn correct_attitude(&mut self, measured: Attitude, desired: Attitude) -> Attitude {
        self.calls += 1;
        self.last_desired = desired;
        self.accumulated.roll += desired.roll - measured.roll;
        self.accumulated.pitch += desired.pitch - measured.pitch;
        self.accumulated.yaw += desired.yaw - measured.yaw;

        Attitude::new(
            self.output.roll + self.accumulated.roll,
            self.output.pitch + self.accumulated.pitch,
            self.output.yaw,
        )
    }

    fn reset_roll(&mut self) {
        self.roll_resets += 1;
        self.accumulated.roll = 0.;
    }

    fn reset_pitch(&mut self) {
        self.pitch_resets += 1;
        self.accumulated.pitch = 0.;
    }

    fn reset_all(&mut self) {
        self.full_resets += 1;
        self.accumulated = Attitude::default();
    }
}

/// Rate solver echoing the desired rate plus a fixed offset.
#[derive(Debug, Default)]
pub struct MockRate {
    pub offset: Attitude,
    pub calls: u32,
    pub last_gyro: Attitude,
    pub last_desired: Attitude,
    pub full_resets: u32,
}

impl RateSolver for MockRate {
    fn correct_rate(&mut self, gyro: Attitude, desired: Attitude) -> Attitude {
        self.calls += 1;
        self.last_gyro = gyro;
        self.last_desired = desired;
        Attitude::new(
            desired.roll + self.offset.roll,
            desired.pitch + self.offset.pitch,
            desired.yaw + self.offset.yaw,
        )
    }

    fn reset_all(&mut self) {
        self.full_resets += 1;
    }
}

/// Position solver writing a fixed thrust and tilt.
#[derive(Debug, Default)]
pub struct MockPosition {
    pub thrust: f32,
    pub roll: f32,
    pub pitch: f32,
    pub calls: u32,
    pub full_resets: u32,
}

impl PositionSolver for MockPosition {
    fn solve(&mut self, thrust: &mut f32, attitude: &mut Attitude, _setpoint: &Setpoint, _state: &State) {
        self.calls += 1;
        *thrust = self.thrust;
        attitude.roll = self.roll;
        attitude.pitch = self.pitch;
    }

    fn reset_all(&mut self) {
        self.full_resets += 1;
    }
}
