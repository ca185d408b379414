//! Read-only view of the cascade state for telemetry.

use crate::{
    cascade::{Cascade, PositionCorrection},
    solver::{AttitudeSolver, PositionSolver, RateSolver, TiltCompensation},
    types::Attitude,
};

/// Number of variables in [`Diagnostics::log_variables`].
pub const LOG_VARIABLES: usize = 24;

/// A named value exported to a log.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogVariable {
    pub group: &'static str,
    pub name: &'static str,
    pub value: f32,
}

impl LogVariable {
    const fn new(group: &'static str, name: &'static str, value: f32) -> Self {
        Self { group, name, value }
    }
}

/// Copy of the cascade state at the end of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub actuator_thrust: f32,
    pub attitude_desired: Attitude,
    pub rate_desired: Attitude,
    pub position_correction: PositionCorrection,
}

impl Diagnostics {
    /// The values grouped as `controller`, `attbposc` (before position correction),
    /// `attaposc` (after position correction) and the setpoint `setpointposlog`,
    /// `setpointvellog` and `setpointacclog` captured before position correction.
    pub fn log_variables(&self) -> [LogVariable; LOG_VARIABLES] {
        let before = &self.position_correction.before;
        let after = &self.position_correction.after;
        let setpoint = &before.setpoint;

        [
            LogVariable::new("controller", "actuatorThrust", self.actuator_thrust),
            LogVariable::new("controller", "roll", self.attitude_desired.roll),
            LogVariable::new("controller", "pitch", self.attitude_desired.pitch),
            LogVariable::new("controller", "yaw", self.attitude_desired.yaw),
            LogVariable::new("controller", "rollRate", self.rate_desired.roll),
            LogVariable::new("controller", "pitchRate", self.rate_desired.pitch),
            LogVariable::new("controller", "yawRate", self.rate_desired.yaw),
            LogVariable::new("attbposc", "actuatorThrust", before.actuator_thrust),
            LogVariable::new("attbposc", "roll", before.attitude_desired.roll),
            LogVariable::new("attbposc", "pitch", before.attitude_desired.pitch),
            LogVariable::new("attbposc", "yaw", before.attitude_desired.yaw),
            LogVariable::new("attaposc", "actuatorThrust", after.actuator_thrust),
            LogVariable::new("attaposc", "roll", after.attitude_desired.roll),
            LogVariable::new("attaposc", "pitch", after.attitude_desired.pitch),
            LogVariable::new("attaposc", "yaw", after.attitude_desired.yaw),
            LogVariable::new("setpointposlog", "x", setpoint.position.x),
            LogVariable::new("setpointposlog", "y", setpoint.position.y),
            LogVariable::new("setpointposlog", "z", setpoint.position.z),
            LogVariable::new("setpointvellog", "xdot", setpoint.velocity.x),
            LogVariable::new("setpointvellog", "ydot", setpoint.velocity.y),
            LogVariable::new("setpointvellog", "zdot", setpoint.velocity.z),
            LogVariable::new("setpointacclog", "x2dot", setpoint.acceleration.x),
            LogVariable::new("setpointacclog", "y2dot", setpoint.acceleration.y),
            LogVariable::new("setpointacclog", "z2dot", setpoint.acceleration.z),
        ]
    }

    /// Find a single log variable by group and name.
    pub fn get(&self, group: &str, name: &str) -> Option<f32> {
        self.log_variables()
            .iter()
            .find(|var| var.group == group && var.name == name)
            .map(|var| var.value)
    }
}

impl<A, R, P, T> Cascade<A, R, P, T>
where
    A: AttitudeSolver,
    R: RateSolver,
    P: PositionSolver,
    T: TiltCompensation,
{
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            actuator_thrust: self.actuator_thrust(),
            attitude_desired: self.attitude_desired(),
            rate_desired: self.rate_desired(),
            position_correction: *self.position_correction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostics, LOG_VARIABLES};
    use crate::{
        cascade::Cascade,
        config::CascadeConfig,
        solver::{
            mock::{MockAttitude, MockPosition, MockRate},
            FixedCompensation,
        },
        types::{Attitude, Control, Mode, SensorData, Setpoint, State},
    };
    use nalgebra::Vector3;

    #[test]
    fn names_are_unique_per_group() {
        let vars = Diagnostics::default().log_variables();
        assert_eq!(vars.len(), LOG_VARIABLES);
        for (i, a) in vars.iter().enumerate() {
            for b in &vars[i + 1..] {
                assert!(a.group != b.group || a.name != b.name);
            }
        }
    }

    #[test]
    fn reflects_position_correction() {
        let mut cascade = Cascade::new(
            CascadeConfig::default(),
            MockAttitude::default(),
            MockRate::default(),
            MockPosition {
                thrust: 42000.,
                pitch: 3.,
                ..MockPosition::default()
            },
            FixedCompensation::default(),
        )
        .unwrap();
        cascade.attitude_solver.output = Attitude::new(0., 0., 12.);

        let mut setpoint = Setpoint::default();
        setpoint.mode.x = Mode::Absolute;
        setpoint.mode.y = Mode::Absolute;
        setpoint.mode.z = Mode::Absolute;
        setpoint.position = Vector3::new(1., 2., 3.);
        setpoint.velocity = Vector3::new(0.1, 0.2, 0.3);
        setpoint.acceleration = Vector3::new(0., 0., -9.81);

        let mut control = Control::default();
        cascade.update(&mut control, &setpoint, &SensorData::default(), &State::default(), 0);
        let diagnostics = cascade.diagnostics();

        assert_eq!(diagnostics.get("controller", "actuatorThrust"), Some(42000.));
        assert_eq!(diagnostics.get("controller", "yawRate"), Some(12.));
        assert_eq!(diagnostics.get("attbposc", "actuatorThrust"), Some(0.));
        assert_eq!(diagnostics.get("attaposc", "pitch"), Some(3.));
        assert_eq!(diagnostics.get("setpointposlog", "z"), Some(3.));
        assert_eq!(diagnostics.get("setpointvellog", "ydot"), Some(0.2));
        assert_eq!(diagnostics.get("setpointacclog", "z2dot"), Some(-9.81));
        assert_eq!(diagnostics.get("controller", "missing"), None);
    }
}
