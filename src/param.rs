//! Runtime parameters of the cascade.

use crate::{
    cascade::Cascade,
    solver::{AttitudeSolver, PositionSolver, RateSolver, TiltCompensation},
    Error,
};

/// A runtime settable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Param {
    /// Divide thrust by the tilt factor of the sensor fusion.
    TiltComp,
}

impl Param {
    pub const ALL: [Param; 1] = [Param::TiltComp];

    /// Look up a parameter by its group and name.
    pub fn from_name(group: &str, name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|param| param.group() == group && param.name() == name)
            .ok_or(Error::UnknownParam)
    }

    pub fn group(&self) -> &'static str {
        match self {
            Param::TiltComp => "controller",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Param::TiltComp => "tiltComp",
        }
    }
}

impl<A, R, P, T> Cascade<A, R, P, T>
where
    A: AttitudeSolver,
    R: RateSolver,
    P: PositionSolver,
    T: TiltCompensation,
{
    /// Read a parameter as a `u8`.
    pub fn param(&self, param: Param) -> u8 {
        match param {
            Param::TiltComp => self.tilt_compensation as u8,
        }
    }

    /// Write a parameter from a `u8`, any non-zero value is `true`.
    pub fn set_param(&mut self, param: Param, value: u8) {
        match param {
            Param::TiltComp => self.tilt_compensation = value != 0,
        }
        debug!("param: {}.{} = {=u8}", param.group(), param.name(), value);
    }

    /// Write a parameter addressed by group and name.
    pub fn set_param_by_name(&mut self, group: &str, name: &str, value: u8) -> Result<(), Error> {
        let param = Param::from_name(group, name).map_err(|error| {
            warn!("param: unknown parameter {}.{}", group, name);
            error
        })?;
        self.set_param(param, value);
        Ok(())
    }
}
