use crate::{
    cascade::Cascade,
    solver::{AttitudeSolver, PositionSolver, RateSolver, TiltCompensation},
    types::{Control, SensorData, Setpoint, State},
    CascadeConfig, Error,
};
use embedded_time::{duration::Microseconds, Clock};

/// The last tick that ran and the clock time its period began at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LastTick {
    tick: u32,
    start_us: u32,
}

/// Drives a [`Cascade`] from a clock, deriving the tick counter from the elapsed time.
///
/// Elapsed time is measured from the last tick with wrapping arithmetic,
/// so the counter keeps advancing across a wrap of the microsecond clock
/// as long as `step` is called at least once per wrap.
pub struct Stabilizer<C, A, R, P, T> {
    pub cascade: Cascade<A, R, P, T>,
    clock: C,
    loop_period_us: u32,
    last_tick: Option<LastTick>,
    observed_ticks: u32,
    missed_ticks: u32,
}

impl<C, A, R, P, T> Stabilizer<C, A, R, P, T>
where
    C: Clock<T = u32>,
    A: AttitudeSolver,
    R: RateSolver,
    P: PositionSolver,
    T: TiltCompensation,
{
    pub fn new(config: &CascadeConfig, cascade: Cascade<A, R, P, T>, clock: C) -> Self {
        Self {
            cascade,
            clock,
            loop_period_us: config.main_period_us().max(1),
            last_tick: None,
            observed_ticks: 0,
            missed_ticks: 0,
        }
    }

    /// Run the cascade for the current tick.
    ///
    /// Returns the tick that ran, or `None` if the current tick already ran.
    pub fn step(
        &mut self,
        control: &mut Control,
        setpoint: &Setpoint,
        sensors: &SensorData,
        state: &State,
    ) -> Result<Option<u32>, Error> {
        let now_us = self.micros_since_epoch()?.0;

        let next = match self.last_tick {
            None => LastTick {
                tick: 0,
                start_us: now_us,
            },
            Some(last) => {
                let elapsed = now_us.wrapping_sub(last.start_us) / self.loop_period_us;
                if elapsed == 0 {
                    trace!("stabilizer: tick {=u32} already ran", last.tick);
                    return Ok(None);
                }

                let missed = elapsed - 1;
                let tick = last.tick.wrapping_add(elapsed);
                if missed > 0 {
                    warn!("stabilizer: missed {=u32} ticks before {=u32}", missed, tick);
                    self.missed_ticks = self.missed_ticks.saturating_add(missed);
                }

                LastTick {
                    tick,
                    start_us: last.start_us.wrapping_add(elapsed * self.loop_period_us),
                }
            }
        };

        self.cascade.update(control, setpoint, sensors, state, next.tick);
        self.last_tick = Some(next);
        self.observed_ticks = self.observed_ticks.saturating_add(1);

        Ok(Some(next.tick))
    }

    /// Ticks skipped between runs so far.
    pub fn missed_ticks(&self) -> u32 {
        self.missed_ticks
    }

    /// Ratio of skipped to completed ticks.
    pub fn loss_ratio(&self) -> f32 {
        if self.observed_ticks == 0 {
            0.
        } else {
            self.missed_ticks as f32 / self.observed_ticks as f32
        }
    }

    fn micros_since_epoch(&self) -> Result<Microseconds<u32>, Error> {
        let instant = self.clock.try_now()?;
        Microseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::Stabilizer;
    use crate::{
        cascade::Cascade,
        config::CascadeConfig,
        solver::{
            mock::{MockAttitude, MockPosition, MockRate},
            FixedCompensation,
        },
        types::{Control, SensorData, Setpoint, State},
    };
    use core::cell::Cell;
    use embedded_time::{clock, rate::Fraction, Clock, Instant};

    struct MicrosClock(Cell<u32>);

    impl Clock for MicrosClock {
        type T = u32;

        const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

        fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
            Ok(Instant::new(self.0.get()))
        }
    }

    type MockStabilizer =
        Stabilizer<MicrosClock, MockAttitude, MockRate, MockPosition, FixedCompensation>;

    fn stabilizer(start_us: u32) -> MockStabilizer {
        let config = CascadeConfig::default();
        let cascade = Cascade::new(
            config,
            MockAttitude::default(),
            MockRate::default(),
            MockPosition::default(),
            FixedCompensation::default(),
        )
        .unwrap();
        Stabilizer::new(&config, cascade, MicrosClock(Cell::new(start_us)))
    }

    fn step(stabilizer: &mut MockStabilizer) -> Option<u32> {
        let setpoint = Setpoint {
            thrust: 30000.,
            ..Setpoint::default()
        };
        let mut control = Control::default();
        stabilizer
            .step(&mut control, &setpoint, &SensorData::default(), &State::default())
            .unwrap()
    }

    #[test]
    fn ticks_follow_clock() {
        let mut stabilizer = stabilizer(5_000);
        assert_eq!(step(&mut stabilizer), Some(0));

        stabilizer.clock.0.set(6_000);
        assert_eq!(step(&mut stabilizer), Some(1));

        stabilizer.clock.0.set(6_999);
        assert_eq!(step(&mut stabilizer), None);

        stabilizer.clock.0.set(7_000);
        assert_eq!(step(&mut stabilizer), Some(2));

        assert_eq!(stabilizer.cascade.attitude_solver.calls, 2);
        assert_eq!(stabilizer.missed_ticks(), 0);
        assert_eq!(stabilizer.loss_ratio(), 0.);
    }

    #[test]
    fn counts_missed_ticks() {
        let mut stabilizer = stabilizer(0);
        step(&mut stabilizer);

        stabilizer.clock.0.set(4_000);
        assert_eq!(step(&mut stabilizer), Some(4));

        assert_eq!(stabilizer.missed_ticks(), 3);
        assert_eq!(stabilizer.loss_ratio(), 1.5);
    }

    #[test]
    fn keeps_ticking_across_clock_wrap() {
        let mut stabilizer = stabilizer(u32::MAX - 1_500);
        assert_eq!(step(&mut stabilizer), Some(0));

        for expected in 1..2_000u32 {
            let now_us = stabilizer.clock.0.get().wrapping_add(1_000);
            stabilizer.clock.0.set(now_us);
            assert_eq!(step(&mut stabilizer), Some(expected));
        }

        assert_eq!(stabilizer.cascade.attitude_solver.calls, 1_000);
        assert_eq!(stabilizer.missed_ticks(), 0);
    }

    #[test]
    fn period_phase_survives_late_steps() {
        let start_us = u32::MAX - 500;
        let mut stabilizer = stabilizer(start_us);
        step(&mut stabilizer);

        // Late inside tick 1, then on time for tick 2 after the wrap
        stabilizer.clock.0.set(start_us.wrapping_add(1_900));
        assert_eq!(step(&mut stabilizer), Some(1));

        stabilizer.clock.0.set(start_us.wrapping_add(2_000));
        assert_eq!(step(&mut stabilizer), Some(2));
        assert_eq!(stabilizer.missed_ticks(), 0);
    }
}
