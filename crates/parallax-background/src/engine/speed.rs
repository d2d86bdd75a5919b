//! Main and secondary rate controls

use super::BackgroundEngine;
use crate::lights::LightProvider;
use crate::sink::ParamSink;

impl<S: ParamSink, L: LightProvider> BackgroundEngine<S, L> {
    /// Set the simulation time multiplier (0 freezes; negative values count as 0)
    pub fn set_main_rate(&mut self, rate: f64) {
        self.clock.set_rate(rate);
    }

    /// Simulation time multiplier
    pub fn main_rate(&self) -> f64 {
        self.clock.rate()
    }

    /// Set the liquid motion multiplier; simulation time is unaffected
    ///
    /// Negative values count as 0.
    pub fn set_secondary_rate(&mut self, rate: f64) {
        self.clock.set_secondary_rate(rate);
    }

    /// Liquid motion multiplier
    pub fn secondary_rate(&self) -> f64 {
        self.clock.secondary_rate()
    }

    /// Freeze simulation time (main rate 0)
    pub fn pause_main(&mut self) {
        self.clock.pause();
    }

    /// Run simulation time at normal speed (main rate 1)
    pub fn resume_main(&mut self) {
        self.clock.resume();
    }

    /// Freeze liquid motion (secondary rate 0)
    pub fn pause_secondary(&mut self) {
        self.clock.pause_secondary();
    }

    /// Run liquid motion at normal speed (secondary rate 1)
    pub fn resume_secondary(&mut self) {
        self.clock.resume_secondary();
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::tests::engine;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_rate_scales_time() {
        let mut engine = engine(4);
        engine.update_time(10.0);
        engine.set_main_rate(2.0);
        engine.update_time(11.0);
        assert!((engine.simulation_time() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_negative_main_rate_keeps_time_monotonic() {
        let mut engine = engine(4);
        engine.update_time(0.0);
        engine.update_time(5.0);
        engine.set_main_rate(-1.0);
        assert_eq!(engine.main_rate(), 0.0);
        engine.update_time(10.0);
        assert!((engine.simulation_time() - 5.0).abs() < EPS);

        engine.set_secondary_rate(-3.0);
        assert_eq!(engine.secondary_rate(), 0.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = engine(4);
        engine.update_time(0.0);
        engine.pause_main();
        engine.update_time(5.0);
        assert_eq!(engine.simulation_time(), 0.0);
        engine.resume_main();
        assert_eq!(engine.main_rate(), 1.0);
        engine.update_time(6.0);
        assert!((engine.simulation_time() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_secondary_rate_does_not_move_time() {
        let mut engine = engine(4);
        engine.update_time(0.0);
        engine.set_secondary_rate(3.0);
        engine.update_time(1.0);
        assert!((engine.simulation_time() - 1.0).abs() < EPS);
        assert_eq!(engine.secondary_rate(), 3.0);

        engine.pause_secondary();
        assert_eq!(engine.secondary_rate(), 0.0);
        engine.resume_secondary();
        assert_eq!(engine.secondary_rate(), 1.0);
    }
}
