//! Simulation time accumulator
//!
//! Visual animation runs on its own clock: wall-clock deltas are scaled by
//! a user-controlled rate before being added. The clock never advances on
//! its own, only when sampled.

/// Rate-scaled, resettable simulation clock
#[derive(Clone, Debug)]
pub struct SimulationClock {
    /// Simulation-domain time
    accumulated: f64,
    /// Wall-clock time of the previous sample (seconds, host epoch)
    last_sample: Option<f64>,
    /// Multiplier applied to wall-clock deltas
    rate: f64,
    /// Rate of the secondary (liquid) motion channel, read directly by the shader
    secondary_rate: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    /// Create a clock at zero with both rates at 1.0
    ///
    /// The first sample only establishes the wall-clock baseline.
    pub fn new() -> Self {
        Self {
            accumulated: 0.0,
            last_sample: None,
            rate: 1.0,
            secondary_rate: 1.0,
        }
    }

    /// Create a clock whose baseline is already at `now`
    pub fn starting_at(now: f64) -> Self {
        Self {
            last_sample: Some(now),
            ..Self::new()
        }
    }

    /// Advance by `(now - last_sample) * rate` and return the new time
    ///
    /// A wall clock that steps backwards contributes nothing, so the
    /// returned time never decreases between resets.
    pub fn sample(&mut self, now: f64) -> f64 {
        let delta = self.last_sample.map_or(0.0, |last| (now - last).max(0.0));
        self.last_sample = Some(now);
        self.accumulated += delta * self.rate;
        self.accumulated
    }

    /// Current simulation time without sampling
    #[inline]
    pub fn time(&self) -> f64 {
        self.accumulated
    }

    /// Zero the simulation time and rebase on `now`
    ///
    /// The next sample measures from `now`, so real time spent before the
    /// reset does not show up as a jump.
    pub fn reset_to_zero(&mut self, now: f64) {
        self.accumulated = 0.0;
        self.last_sample = Some(now);
    }

    /// Change the main rate; applies from the next sample on
    ///
    /// Negative rates are treated as zero.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(0.0);
    }

    /// Main rate
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Change the secondary rate (does not affect simulation time)
    ///
    /// Negative rates are treated as zero.
    pub fn set_secondary_rate(&mut self, rate: f64) {
        self.secondary_rate = rate.max(0.0);
    }

    /// Secondary rate
    #[inline]
    pub fn secondary_rate(&self) -> f64 {
        self.secondary_rate
    }

    /// Stop simulation time (`rate = 0`)
    pub fn pause(&mut self) {
        self.rate = 0.0;
    }

    /// Resume simulation time at normal speed (`rate = 1`)
    pub fn resume(&mut self) {
        self.rate = 1.0;
    }

    /// Stop the secondary channel
    pub fn pause_secondary(&mut self) {
        self.secondary_rate = 0.0;
    }

    /// Resume the secondary channel at normal speed
    pub fn resume_secondary(&mut self) {
        self.secondary_rate = 1.0;
    }

    /// True if the main rate is zero
    pub fn is_paused(&self) -> bool {
        self.rate == 0.0
    }
}
