use nalgebra::Vector3;

/// Euler angles (or angular rates) in degrees, or degrees per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Attitude {
    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// The control law requested for a single axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// The axis is passed through manually.
    #[default]
    Disabled,
    /// The axis follows an absolute setpoint.
    Absolute,
    /// The axis follows a rate (or velocity) setpoint.
    Velocity,
}

/// Per-axis modes of a [`Setpoint`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisModes {
    pub x: Mode,
    pub y: Mode,
    pub z: Mode,
    pub roll: Mode,
    pub pitch: Mode,
    pub yaw: Mode,
}

/// Commander output for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Setpoint {
    /// Absolute attitude in degrees.
    pub attitude: Attitude,
    /// Attitude rate in degrees/second.
    pub attitude_rate: Attitude,
    /// Raw thrust used when the z axis is disabled.
    pub thrust: f32,
    /// Position in meters.
    pub position: Vector3<f32>,
    /// Velocity in meters/second.
    pub velocity: Vector3<f32>,
    /// Acceleration in meters/second^2.
    pub acceleration: Vector3<f32>,
    pub mode: AxisModes,
}

impl Default for Setpoint {
    fn default() -> Self {
        Self {
            attitude: Attitude::default(),
            attitude_rate: Attitude::default(),
            thrust: 0.,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            mode: AxisModes::default(),
        }
    }
}

/// Estimator output for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct State {
    /// Estimated attitude in degrees.
    pub attitude: Attitude,
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub acceleration: Vector3<f32>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            attitude: Attitude::default(),
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
        }
    }
}

/// Inertial readings for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorData {
    /// Angular rate in degrees/second.
    pub gyro: Vector3<f32>,
    /// Acceleration in g.
    pub acc: Vector3<f32>,
}

impl Default for SensorData {
    fn default() -> Self {
        Self {
            gyro: Vector3::zeros(),
            acc: Vector3::zeros(),
        }
    }
}

/// Raw actuator command handed to the mixer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Control {
    pub thrust: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Control {
    pub fn is_zero(&self) -> bool {
        self.thrust == 0. && self.roll == 0. && self.pitch == 0. && self.yaw == 0.
    }
}
