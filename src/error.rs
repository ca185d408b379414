use embedded_time::{clock, ConversionError};
use thiserror::Error;

/// Errors raised while configuring or driving the cascade.
///
/// The per-tick control path itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("loop rate must be non-zero")]
    ZeroRate,

    #[error("sub rate {sub_hz}hz exceeds the main loop rate {main_hz}hz")]
    RateExceedsMain { main_hz: u32, sub_hz: u32 },

    #[error("main loop rate {main_hz}hz is not a multiple of {sub_hz}hz")]
    RateNotDivisor { main_hz: u32, sub_hz: u32 },

    #[error("main loop rate {main_hz}hz has no whole microsecond period")]
    PeriodNotWhole { main_hz: u32 },

    #[error("unknown parameter")]
    UnknownParam,

    #[error("clock error: {0:?}")]
    Clock(clock::Error),

    #[error("time conversion error: {0:?}")]
    Time(ConversionError),
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}
