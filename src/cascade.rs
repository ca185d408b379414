//! The tick-driven position → attitude → rate cascade.

use crate::{
    config::CascadeConfig,
    mode::{RateSource, Resolution, ThrustSource, TiltSource},
    rate::RateDivider,
    solver::{
        AttitudeSolver, PidAttitudeController, PidPositionController, PidRateController,
        PositionSolver, RateSolver, TiltCompensation,
    },
    types::{Attitude, AxisModes, Control, SensorData, Setpoint, State},
    yaw::{wrap_180, YawIntegrator},
    Error,
};

/// Cascade inputs and outputs around one run of the position solver.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionSnapshot {
    pub actuator_thrust: f32,
    pub attitude_desired: Attitude,
    pub setpoint: Setpoint,
    pub state: State,
}

/// Snapshots taken immediately before and after the position solver ran.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionCorrection {
    pub before: PositionSnapshot,
    pub after: PositionSnapshot,
}

/// A cascade running the PID solvers.
pub type PidCascade<T> =
    Cascade<PidAttitudeController, PidRateController, PidPositionController, T>;

/// Composes the position, attitude and rate solvers into one control step per tick.
///
/// The attitude stage runs every `main_rate / attitude_rate` ticks and
/// the position stage every `main_rate / position_rate` ticks, so which
/// stages run depends on the tick value alone.
pub struct Cascade<A, R, P, T> {
    pub attitude_solver: A,
    pub rate_solver: R,
    pub position_solver: P,
    pub sensor_fusion: T,

    attitude_divider: RateDivider,
    position_divider: RateDivider,
    yaw_integrator: YawIntegrator,

    attitude_desired: Attitude,
    rate_desired: Attitude,
    actuator_thrust: f32,

    /// Raw roll, pitch and yaw from the last attitude tick.
    actuator: Attitude,

    position_correction: PositionCorrection,
    pub(crate) tilt_compensation: bool,

    modes: AxisModes,
    is_disarmed: bool,
}

impl<T: TiltCompensation> PidCascade<T> {
    /// Create a cascade of PID solvers with default gains for the configured rates.
    pub fn pid(config: CascadeConfig, sensor_fusion: T) -> Result<Self, Error> {
        Self::new(
            config,
            PidAttitudeController::new(config.attitude_dt()),
            PidRateController::new(config.attitude_dt()),
            PidPositionController::new(config.position_dt()),
            sensor_fusion,
        )
    }
}

impl<A, R, P, T> Cascade<A, R, P, T>
where
    A: AttitudeSolver,
    R: RateSolver,
    P: PositionSolver,
    T: TiltCompensation,
{
    pub fn new(
        config: CascadeConfig,
        attitude_solver: A,
        rate_solver: R,
        position_solver: P,
        sensor_fusion: T,
    ) -> Result<Self, Error> {
        let (attitude_divider, position_divider) = config.dividers()?;
        info!(
            "cascade: main {=u32}hz, attitude every {=u32} ticks, position every {=u32} ticks",
            config.main_rate.0,
            attitude_divider.ticks(),
            position_divider.ticks()
        );

        Ok(Self {
            attitude_solver,
            rate_solver,
            position_solver,
            sensor_fusion,
            attitude_divider,
            position_divider,
            yaw_integrator: YawIntegrator::new(config.attitude_dt()),
            attitude_desired: Attitude::default(),
            rate_desired: Attitude::default(),
            actuator_thrust: 0.,
            actuator: Attitude::default(),
            position_correction: PositionCorrection::default(),
            tilt_compensation: config.tilt_compensation,
            modes: AxisModes::default(),
            is_disarmed: true,
        })
    }

    /// Returns `true` if the solvers are ready to fly.
    pub fn self_test(&self) -> bool {
        self.attitude_solver.self_test()
    }

    /// Run one tick of the cascade and overwrite `control` with the actuator command.
    pub fn update(
        &mut self,
        control: &mut Control,
        setpoint: &Setpoint,
        sensors: &SensorData,
        state: &State,
        tick: u32,
    ) {
        if setpoint.mode != self.modes {
            debug!("cascade: modes changed at tick {=u32}: {}", tick, setpoint.mode);
            self.modes = setpoint.mode;
        }
        let resolution = Resolution::new(&setpoint.mode);
        let is_attitude_tick = self.attitude_divider.is_due(tick);

        if is_attitude_tick {
            self.attitude_desired.yaw = self.yaw_integrator.integrate(
                self.attitude_desired.yaw,
                resolution.yaw,
                setpoint.attitude_rate.yaw,
                setpoint.attitude.yaw,
            );
        }

        if self.position_divider.is_due(tick) {
            self.correct_position(setpoint, state);
        }

        if is_attitude_tick {
            self.correct_attitude(&resolution, setpoint, sensors, state);
        }

        control.roll = self.actuator.roll;
        control.pitch = self.actuator.pitch;
        control.yaw = self.actuator.yaw;
        control.thrust = self.compensated_thrust();

        self.safety_reset(control, state, tick);
    }

    fn correct_position(&mut self, setpoint: &Setpoint, state: &State) {
        self.position_correction.before = self.snapshot(setpoint, state);

        self.position_solver.solve(
            &mut self.actuator_thrust,
            &mut self.attitude_desired,
            setpoint,
            state,
        );

        self.position_correction.after = self.snapshot(setpoint, state);
    }

    fn snapshot(&self, setpoint: &Setpoint, state: &State) -> PositionSnapshot {
        PositionSnapshot {
            actuator_thrust: self.actuator_thrust,
            attitude_desired: self.attitude_desired,
            setpoint: *setpoint,
            state: *state,
        }
    }

    fn correct_attitude(
        &mut self,
        resolution: &Resolution,
        setpoint: &Setpoint,
        sensors: &SensorData,
        state: &State,
    ) {
        // 1. Switch between manual and automatic thrust and tilt
        if resolution.thrust == ThrustSource::Setpoint {
            self.actuator_thrust = setpoint.thrust;
        }
        if resolution.tilt == TiltSource::Setpoint {
            self.attitude_desired.roll = setpoint.attitude.roll;
            self.attitude_desired.pitch = setpoint.attitude.pitch;
        }

        // 2. Calculate the desired rates from the attitude error
        self.rate_desired = self
            .attitude_solver
            .correct_attitude(state.attitude, self.attitude_desired);

        // 3. Rate controlled axes bypass the angle loop.
        //    The angle integrator is cleared so no stale error is applied
        //    once the axis returns to absolute mode.
        if resolution.roll == RateSource::Setpoint {
            self.rate_desired.roll = setpoint.attitude_rate.roll;
            self.attitude_solver.reset_roll();
        }
        if resolution.pitch == RateSource::Setpoint {
            self.rate_desired.pitch = setpoint.attitude_rate.pitch;
            self.attitude_solver.reset_pitch();
        }

        // 4. Calculate the actuator output from the rate error.
        //    Gyro pitch is negated into the rate loop and yaw negated out of it.
        // TODO: subtract the estimated gyro drift before the rate loop
        let gyro = Attitude::new(sensors.gyro.x, -sensors.gyro.y, sensors.gyro.z);
        let output = self.rate_solver.correct_rate(gyro, self.rate_desired);

        self.actuator = Attitude::new(output.roll, output.pitch, -output.yaw);
    }

    fn compensated_thrust(&self) -> f32 {
        if self.tilt_compensation {
            self.actuator_thrust / self.sensor_fusion.inv_thrust_compensation_for_tilt()
        } else {
            self.actuator_thrust
        }
    }

    fn safety_reset(&mut self, control: &mut Control, state: &State, tick: u32) {
        let is_disarmed = control.thrust == 0.;
        if is_disarmed != self.is_disarmed {
            if is_disarmed {
                info!("cascade: thrust cut at tick {=u32}, resetting controllers", tick);
            } else {
                info!("cascade: thrust resumed at tick {=u32}", tick);
            }
            self.is_disarmed = is_disarmed;
        }

        if is_disarmed {
            *control = Control::default();
            self.actuator = Attitude::default();

            self.attitude_solver.reset_all();
            self.rate_solver.reset_all();
            self.position_solver.reset_all();

            // Continue integrating yaw from the actual heading
            self.attitude_desired.yaw = wrap_180(state.attitude.yaw);
        }
    }

    /// `true` if the last tick commanded zero thrust.
    pub fn is_disarmed(&self) -> bool {
        self.is_disarmed
    }

    /// Thrust before tilt compensation.
    pub fn actuator_thrust(&self) -> f32 {
        self.actuator_thrust
    }

    /// Desired attitude in degrees.
    pub fn attitude_desired(&self) -> Attitude {
        self.attitude_desired
    }

    /// Desired attitude rate in degrees/second.
    pub fn rate_desired(&self) -> Attitude {
        self.rate_desired
    }

    pub fn position_correction(&self) -> &PositionCorrection {
        &self.position_correction
    }

    pub fn tilt_compensation(&self) -> bool {
        self.tilt_compensation
    }

    pub fn set_tilt_compensation(&mut self, is_enabled: bool) {
        self.tilt_compensation = is_enabled;
    }

    /// Ticks between runs of the attitude and position stages.
    pub fn dividers(&self) -> (RateDivider, RateDivider) {
        (self.attitude_divider, self.position_divider)
    }
}
