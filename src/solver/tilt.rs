use super::TiltCompensation;
use crate::types::Attitude;
use nalgebra::Rotation3;

/// Smallest factor reported for extreme bank angles.
const MIN_FACTOR: f32 = 0.1;

/// Tilt factor taken from the vertical component of the estimated body z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltEstimate {
    factor: f32,
}

impl Default for TiltEstimate {
    fn default() -> Self {
        Self { factor: 1. }
    }
}

impl TiltEstimate {
    /// Update the factor from the estimated attitude (in degrees).
    pub fn update(&mut self, attitude: &Attitude) {
        let rotation = Rotation3::from_euler_angles(
            attitude.roll.to_radians(),
            attitude.pitch.to_radians(),
            attitude.yaw.to_radians(),
        );
        self.factor = rotation[(2, 2)].max(MIN_FACTOR);
    }
}

impl TiltCompensation for TiltEstimate {
    fn inv_thrust_compensation_for_tilt(&self) -> f32 {
        self.factor
    }
}

/// A constant tilt factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedCompensation(pub f32);

impl Default for FixedCompensation {
    fn default() -> Self {
        Self(1.)
    }
}

impl TiltCompensation for FixedCompensation {
    fn inv_thrust_compensation_for_tilt(&self) -> f32 {
        self.0
    }
}
