use num_traits::{Float, FloatConst};

/// First order low pass filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LowPassFilter<T> {
    output: T,
    alpha: T,
}

impl<T: Float + FloatConst> LowPassFilter<T> {
    /// Create a filter for a sample rate and cutoff frequency (in hz).
    /// A non-positive cutoff passes samples through unchanged.
    pub fn new(sample_freq: T, cutoff_freq: T) -> Self {
        let alpha = if sample_freq <= T::zero() {
            T::one()
        } else {
            alpha(T::one() / sample_freq, cutoff_freq)
        };
        Self {
            output: T::zero(),
            alpha,
        }
    }

    pub fn apply(&mut self, sample: T) -> T {
        self.output = self.output + (sample - self.output) * self.alpha;
        self.output
    }

    pub fn output(&self) -> T {
        self.output
    }

    pub fn reset(&mut self, value: T) {
        self.output = value;
    }
}

/// Smoothing factor of a first order filter with time-step `dt` in seconds.
pub fn alpha<T: Float + FloatConst>(dt: T, cutoff_freq: T) -> T {
    if cutoff_freq <= T::zero() || dt <= T::zero() {
        return T::one();
    }

    let rc = T::one() / ((T::PI() + T::PI()) * cutoff_freq);
    (dt / (dt + rc)).min(T::one()).max(T::zero())
}
