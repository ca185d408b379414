use crate::filter::LowPassFilter;

/// Terms of the last PID update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Info {
    pub target: f32,
    pub actual: f32,
    pub error: f32,
    pub p: f32,
    pub i: f32,
    pub d: f32,
}

/// PID controller with a clamped integrator and a filtered derivative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pid {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,

    /// Absolute limit of the integral term.
    pub i_limit: f32,

    /// Absolute limit of the output, 0 for none.
    pub output_limit: f32,

    /// Timestep in seconds
    pub dt: f32,

    pub info: Info,
    integrator: f32,
    prev_error: f32,
    derivative: LowPassFilter<f32>,
    reset_derivative: bool,
}

impl Pid {
    pub fn new(kp: f32, ki: f32, kd: f32, dt: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            i_limit: f32::INFINITY,
            output_limit: 0.,
            dt,
            info: Info::default(),
            integrator: 0.,
            prev_error: 0.,
            derivative: LowPassFilter::new(0., 0.),
            reset_derivative: true,
        }
    }

    /// Builder method to set `i_limit` and return `self`
    pub fn with_i_limit(mut self, i_limit: f32) -> Self {
        self.i_limit = i_limit;
        self
    }

    /// Builder method to set `output_limit` and return `self`
    pub fn with_output_limit(mut self, output_limit: f32) -> Self {
        self.output_limit = output_limit;
        self
    }

    /// Builder method to low pass the derivative at `cutoff_freq` (in hz) and return `self`
    pub fn with_derivative_filter(mut self, cutoff_freq: f32) -> Self {
        self.derivative = LowPassFilter::new(1. / self.dt, cutoff_freq);
        self
    }

    pub fn integrator(&self) -> f32 {
        self.integrator
    }

    /// Returns `true` if no error has accumulated since the last reset.
    pub fn is_reset(&self) -> bool {
        self.integrator == 0. && self.prev_error == 0. && self.reset_derivative
    }

    /// Clear the integrator and derivative history.
    pub fn reset(&mut self) {
        self.integrator = 0.;
        self.prev_error = 0.;
        self.derivative.reset(0.);
        self.reset_derivative = true;
    }

    /// Calculate the output for a target and measurement.
    pub fn update(&mut self, target: f32, measurement: f32) -> f32 {
        self.update_with_error(target, measurement, target - measurement)
    }

    /// Calculate the output for an error computed by the caller,
    /// e.g. an angle error wrapped to a half turn.
    pub fn update_with_error(&mut self, target: f32, measurement: f32, error: f32) -> f32 {
        // don't process inf or NaN
        if !error.is_finite() {
            return 0.;
        }

        let derivative = if self.reset_derivative {
            self.reset_derivative = false;
            0.
        } else if self.dt > 0. {
            self.derivative.apply((error - self.prev_error) / self.dt)
        } else {
            0.
        };
        self.prev_error = error;

        if self.ki != 0. && self.dt > 0. {
            self.integrator = (self.integrator + error * self.dt)
                .max(-self.i_limit)
                .min(self.i_limit);
        } else {
            self.integrator = 0.;
        }

        let p_out = self.kp * error;
        let i_out = self.ki * self.integrator;
        let d_out = self.kd * derivative;

        self.info = Info {
            target,
            actual: measurement,
            error,
            p: p_out,
            i: i_out,
            d: d_out,
        };

        let output = p_out + i_out + d_out;
        if self.output_limit > 0. {
            output.max(-self.output_limit).min(self.output_limit)
        } else {
            output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pid;
    use approx::assert_relative_eq;

    #[test]
    fn proportional() {
        let mut pid = Pid::new(2., 0., 0., 0.01);
        assert_relative_eq!(pid.update(3., 1.), 4.);
        assert_relative_eq!(pid.info.p, 4.);
    }

    #[test]
    fn integrator_is_clamped() {
        let mut pid = Pid::new(0., 1., 0., 0.1).with_i_limit(0.25);
        for _ in 0..10 {
            pid.update(1., 0.);
        }
        assert_relative_eq!(pid.integrator(), 0.25);
        assert_relative_eq!(pid.update(1., 0.), 0.25);
    }

    #[test]
    fn derivative_skips_first_update() {
        let mut pid = Pid::new(0., 0., 1., 0.1);
        assert_eq!(pid.update(1., 0.), 0.);
        assert_relative_eq!(pid.update(2., 0.), 10.);
    }

    #[test]
    fn filtered_derivative_lags_raw() {
        let mut raw = Pid::new(0., 0., 1., 0.01);
        let mut filtered = Pid::new(0., 0., 1., 0.01).with_derivative_filter(10.);

        for error in [0., 1.] {
            raw.update(error, 0.);
            filtered.update(error, 0.);
        }
        assert_relative_eq!(raw.info.d, 100.);
        assert!(filtered.info.d > 0. && filtered.info.d < raw.info.d);

        // Constant error decays the filtered derivative towards zero
        let previous = filtered.info.d;
        filtered.update(1., 0.);
        assert!(filtered.info.d < previous);

        filtered.reset();
        assert!(filtered.is_reset());
        assert_eq!(filtered.update(1., 0.), 0.);
    }

    #[test]
    fn reset_clears_history() {
        let mut pid = Pid::new(1., 1., 1., 0.1);
        pid.update(1., 0.);
        pid.update(2., 0.);
        assert!(!pid.is_reset());

        pid.reset();
        assert!(pid.is_reset());
        assert_relative_eq!(pid.update(1., 0.), 1. + 0.1);
    }

    #[test]
    fn output_limit() {
        let mut pid = Pid::new(100., 0., 0., 0.1).with_output_limit(5.);
        assert_eq!(pid.update(1., 0.), 5.);
        assert_eq!(pid.update(-1., 0.), -5.);
    }

    #[test]
    fn ignores_infinite_input() {
        let mut pid = Pid::new(1., 1., 0., 0.1);
        assert_eq!(pid.update(f32::INFINITY, 0.), 0.);
        assert_eq!(pid.integrator(), 0.);
    }
}
