//! Fade-to-black reset sessions

use super::BackgroundEngine;
use crate::lights::LightProvider;
use crate::palette;
use crate::sink::ParamSink;
use crate::transition::{FadeTiming, ResetEvent, ResetPhase, ResetSession};

/// Relative spread applied to liquid rates on every reset
const LIQUID_SPEED_JITTER: f32 = 0.2;

impl<S: ParamSink, L: LightProvider> BackgroundEngine<S, L> {
    /// Start a fade → reset → fade cycle
    ///
    /// Ignored while a session is already running.
    pub fn force_reset(&mut self) {
        if self.reset.is_some() {
            log::debug!("reset requested while one is running, ignored");
            return;
        }
        log::info!(
            "background reset started ({:.2}s total)",
            self.fade_timing.total()
        );
        self.reset = Some(ResetSession::start(self.fade_timing));
    }

    /// True while a reset session is running
    #[inline]
    pub fn is_resetting(&self) -> bool {
        self.reset.is_some()
    }

    /// Current blackness, 0 outside a reset
    pub fn fade_amount(&self) -> f32 {
        self.reset.as_ref().map_or(0.0, ResetSession::fade_amount)
    }

    /// Phase of the running session, `Idle` outside a reset
    pub fn reset_phase(&self) -> ResetPhase {
        self.reset
            .as_ref()
            .map_or(ResetPhase::Idle, ResetSession::phase)
    }

    /// Set the durations used by the next reset
    ///
    /// A running session keeps the timing it started with.
    pub fn set_fade_timing(&mut self, fade_in: f64, black: f64, fade_out: f64) {
        self.fade_timing = FadeTiming::new(fade_in, black, fade_out);
    }

    /// Timing the next session will start with
    pub fn fade_timing(&self) -> FadeTiming {
        self.fade_timing
    }

    /// Register the callback run at the midpoint of every reset
    ///
    /// Replaces any previous callback.
    pub fn set_external_reset_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_reset = Some(Box::new(callback));
    }

    /// Remove the reset callback; later resets run without one
    pub fn clear_external_reset_callback(&mut self) {
        self.on_reset = None;
    }

    /// Step the running session by `dt` wall-clock seconds
    pub(crate) fn advance_reset(&mut self, dt: f64, now: f64) {
        let Some(mut session) = self.reset.take() else {
            return;
        };

        match session.advance(dt) {
            Some(ResetEvent::PerformReset) => {
                self.perform_reset(&mut session, now);
                self.reset = Some(session);
            }
            Some(ResetEvent::FadeOutStarted) => {
                let offsets = session.take_staged_liquid_offsets();
                self.store.set_liquid_offsets(&offsets);
                self.reset = Some(session);
            }
            Some(ResetEvent::Finished) => {
                log::info!("background reset finished");
            }
            None => self.reset = Some(session),
        }
    }

    /// Work done while the screen is fully black
    fn perform_reset(&mut self, session: &mut ResetSession, now: f64) {
        self.clock.reset_to_zero(now);
        self.store.zero_phases();

        if let Some(callback) = self.on_reset.as_mut() {
            callback();
        }

        self.store
            .jitter_liquid_speeds(&mut self.rng, LIQUID_SPEED_JITTER);
        session.stage_liquid_offsets(self.store.draw_liquid_offsets(&mut self.rng));

        let palette = palette::pick(&mut self.rng);
        let recolored = self.store.apply_palette(palette);
        log::info!(
            "background reset: palette '{}' on {} layers",
            palette.name,
            recolored
        );
    }
}
