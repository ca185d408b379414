//! Per-axis arbitration between manual passthrough, absolute and rate control.

use crate::types::{AxisModes, Mode};

/// Source of the desired thrust on the z axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThrustSource {
    /// Raw setpoint thrust (manual throttle).
    Setpoint,
    /// Thrust computed by the position solver.
    Position,
}

/// Source of the desired roll and pitch angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TiltSource {
    /// Raw setpoint roll and pitch (manual attitude).
    Setpoint,
    /// Attitude computed by the position solver.
    Position,
}

/// Source of the desired rate on a single attitude axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateSource {
    /// Output of the attitude-angle solver.
    Angle,
    /// Raw setpoint rate, resetting the axis' angle integrator.
    Setpoint,
}

/// How the desired yaw angle is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum YawSource {
    /// Integrate the setpoint yaw rate.
    Integrate,
    /// Take the setpoint's absolute yaw.
    Absolute,
}

/// The control laws selected by a setpoint's modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    pub thrust: ThrustSource,
    pub tilt: TiltSource,
    pub roll: RateSource,
    pub pitch: RateSource,
    pub yaw: YawSource,
}

impl Resolution {
    pub fn new(modes: &AxisModes) -> Self {
        Self {
            thrust: thrust_source(modes.z),
            tilt: tilt_source(modes.x, modes.y),
            roll: rate_source(modes.roll),
            pitch: rate_source(modes.pitch),
            yaw: yaw_source(modes.yaw),
        }
    }
}

pub fn thrust_source(z: Mode) -> ThrustSource {
    if z == Mode::Disabled {
        ThrustSource::Setpoint
    } else {
        ThrustSource::Position
    }
}

/// Manual attitude applies if either horizontal axis is disabled.
pub fn tilt_source(x: Mode, y: Mode) -> TiltSource {
    if x == Mode::Disabled || y == Mode::Disabled {
        TiltSource::Setpoint
    } else {
        TiltSource::Position
    }
}

pub fn rate_source(axis: Mode) -> RateSource {
    if axis == Mode::Velocity {
        RateSource::Setpoint
    } else {
        RateSource::Angle
    }
}

pub fn yaw_source(yaw: Mode) -> YawSource {
    if yaw == Mode::Velocity {
        YawSource::Integrate
    } else {
        YawSource::Absolute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_by_default() {
        let resolution = Resolution::new(&AxisModes::default());
        assert_eq!(resolution.thrust, ThrustSource::Setpoint);
        assert_eq!(resolution.tilt, TiltSource::Setpoint);
        assert_eq!(resolution.roll, RateSource::Angle);
        assert_eq!(resolution.pitch, RateSource::Angle);
        assert_eq!(resolution.yaw, YawSource::Absolute);
    }

    #[test]
    fn one_disabled_horizontal_axis_is_manual() {
        assert_eq!(
            tilt_source(Mode::Absolute, Mode::Disabled),
            TiltSource::Setpoint
        );
        assert_eq!(
            tilt_source(Mode::Velocity, Mode::Absolute),
            TiltSource::Position
        );
    }

    #[test]
    fn rate_axes_are_independent() {
        let modes = AxisModes {
            x: Mode::Absolute,
            y: Mode::Absolute,
            z: Mode::Velocity,
            roll: Mode::Velocity,
            pitch: Mode::Absolute,
            yaw: Mode::Velocity,
        };
        let resolution = Resolution::new(&modes);

        assert_eq!(resolution.thrust, ThrustSource::Position);
        assert_eq!(resolution.tilt, TiltSource::Position);
        assert_eq!(resolution.roll, RateSource::Setpoint);
        assert_eq!(resolution.pitch, RateSource::Angle);
        assert_eq!(resolution.yaw, YawSource::Integrate);
    }
}
