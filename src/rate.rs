use crate::Error;
use embedded_time::rate::Hertz;

/// Gates a sub-rate stage to every Nth tick of the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateDivider {
    ticks: u32,
}

impl RateDivider {
    /// Create a divider running `sub_rate` out of `main_rate`.
    ///
    /// The main rate must be an exact multiple of the sub rate so the
    /// phase of the stage depends on the tick value alone.
    pub fn new(main_rate: Hertz<u32>, sub_rate: Hertz<u32>) -> Result<Self, Error> {
        let (main_hz, sub_hz) = (main_rate.0, sub_rate.0);
        if main_hz == 0 || sub_hz == 0 {
            return Err(Error::ZeroRate);
        }
        if sub_hz > main_hz {
            return Err(Error::RateExceedsMain { main_hz, sub_hz });
        }
        if main_hz % sub_hz != 0 {
            return Err(Error::RateNotDivisor { main_hz, sub_hz });
        }

        Ok(Self {
            ticks: main_hz / sub_hz,
        })
    }

    /// Ticks of the main loop between each run of the stage.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Returns `true` if the stage runs at `tick`.
    pub fn is_due(&self, tick: u32) -> bool {
        tick % self.ticks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::RateDivider;
    use crate::Error;
    use embedded_time::rate::Hertz;

    #[test]
    fn attitude_and_position_phase() {
        let attitude = RateDivider::new(Hertz(1000), Hertz(500)).unwrap();
        let position = RateDivider::new(Hertz(1000), Hertz(100)).unwrap();

        let attitude_ticks: [u32; 5] = [0, 2, 4, 6, 8];
        for tick in 0..10 {
            assert_eq!(attitude.is_due(tick), attitude_ticks.contains(&tick));
        }
        assert!(position.is_due(0));
        assert!(!position.is_due(5));
        assert!(position.is_due(10));
        assert!(position.is_due(u32::MAX - 5));
    }

    #[test]
    fn same_rate_runs_every_tick() {
        let divider = RateDivider::new(Hertz(250), Hertz(250)).unwrap();
        assert_eq!(divider.ticks(), 1);
        assert!((0..20).all(|tick| divider.is_due(tick)));
    }

    #[test]
    fn rejects_invalid_rates() {
        assert!(matches!(
            RateDivider::new(Hertz(1000), Hertz(0)),
            Err(Error::ZeroRate)
        ));
        assert!(matches!(
            RateDivider::new(Hertz(100), Hertz(500)),
            Err(Error::RateExceedsMain { main_hz: 100, sub_hz: 500 })
        ));
        assert!(matches!(
            RateDivider::new(Hertz(1000), Hertz(300)),
            Err(Error::RateNotDivisor { main_hz: 1000, sub_hz: 300 })
        ));
    }
}
