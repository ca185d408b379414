use crate::{rate::RateDivider, Error};
use embedded_time::rate::Hertz;

/// Loop rates and runtime flags of the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeConfig {
    /// Rate of the main control loop, one tick per period.
    pub main_rate: Hertz<u32>,

    /// Rate of the attitude and rate stages.
    pub attitude_rate: Hertz<u32>,

    /// Rate of the position stage.
    pub position_rate: Hertz<u32>,

    /// Initial value of the tilt compensation flag.
    pub tilt_compensation: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            main_rate: Hertz(1000),
            attitude_rate: Hertz(500),
            position_rate: Hertz(100),
            tilt_compensation: false,
        }
    }
}

impl CascadeConfig {
    /// Builder method to set `main_rate` and return `self`
    pub fn with_main_rate(mut self, hz: u32) -> Self {
        self.main_rate = Hertz(hz);
        self
    }

    /// Builder method to set `attitude_rate` and return `self`
    pub fn with_attitude_rate(mut self, hz: u32) -> Self {
        self.attitude_rate = Hertz(hz);
        self
    }

    /// Builder method to set `position_rate` and return `self`
    pub fn with_position_rate(mut self, hz: u32) -> Self {
        self.position_rate = Hertz(hz);
        self
    }

    /// Builder method to set `tilt_compensation` and return `self`
    pub fn with_tilt_compensation(mut self, is_enabled: bool) -> Self {
        self.tilt_compensation = is_enabled;
        self
    }

    /// Time step of the attitude stage in seconds.
    pub fn attitude_dt(&self) -> f32 {
        1. / self.attitude_rate.0 as f32
    }

    /// Time step of the position stage in seconds.
    pub fn position_dt(&self) -> f32 {
        1. / self.position_rate.0 as f32
    }

    /// Period of the main loop in microseconds.
    pub fn main_period_us(&self) -> u32 {
        1_000_000 / self.main_rate.0.max(1)
    }

    /// Check the rates and compute the attitude and position dividers.
    ///
    /// The main rate must divide one second into whole microseconds.
    pub fn dividers(&self) -> Result<(RateDivider, RateDivider), Error> {
        let main_hz = self.main_rate.0;
        if main_hz != 0 && 1_000_000 % main_hz != 0 {
            return Err(Error::PeriodNotWhole { main_hz });
        }

        let attitude = RateDivider::new(self.main_rate, self.attitude_rate)?;
        let position = RateDivider::new(self.main_rate, self.position_rate)?;
        Ok((attitude, position))
    }
}
