use crate::mode::YawSource;

/// Wrap an angle in degrees into [-180, 180) by whole turns.
pub fn wrap_180(mut degrees: f32) -> f32 {
    while degrees >= 180. {
        degrees -= 360.;
    }
    while degrees < -180. {
        degrees += 360.;
    }
    degrees
}

/// Produces the desired yaw angle from either a rate or an absolute setpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YawIntegrator {
    /// Time-step of the attitude stage in seconds.
    pub dt: f32,
}

impl YawIntegrator {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }

    /// Calculate the next desired yaw (in degrees) from the current one.
    ///
    /// An absolute `yaw_cmd` outside [-180, 180) is wrapped into range.
    pub fn integrate(&self, yaw: f32, source: YawSource, yaw_rate: f32, yaw_cmd: f32) -> f32 {
        match source {
            YawSource::Integrate => wrap_180(yaw + yaw_rate * self.dt),
            YawSource::Absolute => wrap_180(yaw_cmd),
        }
    }
}
