//! Reset session state machine

use serde::{Deserialize, Serialize};

use super::{progress, smoothstep, DEFAULT_BLACK_SECS, DEFAULT_FADE_IN_SECS, DEFAULT_FADE_OUT_SECS};

/// Phase of a reset session
///
/// `Idle → FadingToBlack → HoldingBlackPreReset → HoldingBlackPostReset →
/// FadingFromBlack → Idle`. The reset side effects fire on the edge
/// between the two holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResetPhase {
    #[default]
    Idle,
    FadingToBlack,
    HoldingBlackPreReset,
    HoldingBlackPostReset,
    FadingFromBlack,
}

impl ResetPhase {
    /// True while a session is running
    #[inline]
    pub fn is_active(self) -> bool {
        self != ResetPhase::Idle
    }

    /// Short identifier for logs and the JS side
    pub fn id(self) -> &'static str {
        match self {
            ResetPhase::Idle => "idle",
            ResetPhase::FadingToBlack => "fading-to-black",
            ResetPhase::HoldingBlackPreReset => "holding-black-pre-reset",
            ResetPhase::HoldingBlackPostReset => "holding-black-post-reset",
            ResetPhase::FadingFromBlack => "fading-from-black",
        }
    }
}

/// Durations of a reset session, in seconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FadeTiming {
    pub fade_in: f64,
    pub black: f64,
    pub fade_out: f64,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            fade_in: DEFAULT_FADE_IN_SECS,
            black: DEFAULT_BLACK_SECS,
            fade_out: DEFAULT_FADE_OUT_SECS,
        }
    }
}

impl FadeTiming {
    /// Create a timing; negative durations are treated as zero
    pub fn new(fade_in: f64, black: f64, fade_out: f64) -> Self {
        Self {
            fade_in: fade_in.max(0.0),
            black: black.max(0.0),
            fade_out: fade_out.max(0.0),
        }
    }

    /// Length of each of the two black holds
    #[inline]
    pub fn half_black(&self) -> f64 {
        self.black * 0.5
    }

    /// Total session length
    pub fn total(&self) -> f64 {
        self.fade_in + self.black + self.fade_out
    }
}

/// Something the owner of a session has to act on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetEvent {
    /// Screen is fully black at the midpoint of the hold; run the reset now
    PerformReset,
    /// The fade back in has begun
    FadeOutStarted,
    /// The session reached `Idle` and can be dropped
    Finished,
}

/// One running fade → reset → fade cycle
///
/// Driven by wall-clock deltas from the frame loop. Each call to
/// [`advance`](Self::advance) performs at most one phase transition, and
/// entering a phase restarts its elapsed time, so zero durations still
/// walk every phase in order.
#[derive(Clone, Debug)]
pub struct ResetSession {
    phase: ResetPhase,
    timing: FadeTiming,
    phase_elapsed: f64,
    fade: f32,
    staged_liquid_offsets: Vec<Option<f32>>,
}

impl ResetSession {
    /// Start a session in `FadingToBlack`
    pub fn start(timing: FadeTiming) -> Self {
        Self {
            phase: ResetPhase::FadingToBlack,
            timing,
            phase_elapsed: 0.0,
            fade: 0.0,
            staged_liquid_offsets: Vec::new(),
        }
    }

    /// Current phase
    #[inline]
    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    /// Current blackness, 0 (clear) to 1 (black)
    #[inline]
    pub fn fade_amount(&self) -> f32 {
        self.fade
    }

    /// Timing this session was started with
    #[inline]
    pub fn timing(&self) -> FadeTiming {
        self.timing
    }

    /// True once the session returned to `Idle`
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == ResetPhase::Idle
    }

    /// Keep values to apply when the fade back in starts
    pub fn stage_liquid_offsets(&mut self, offsets: Vec<f32>) {
        self.staged_liquid_offsets = offsets.into_iter().map(Some).collect();
    }

    /// Drop the staged value for one layer, so a later write to it wins
    pub fn discard_staged_liquid_offset(&mut self, layer: usize) {
        if let Some(slot) = self.staged_liquid_offsets.get_mut(layer) {
            *slot = None;
        }
    }

    /// Take the staged values, leaving nothing behind
    ///
    /// Discarded layers are `None`.
    pub fn take_staged_liquid_offsets(&mut self) -> Vec<Option<f32>> {
        std::mem::take(&mut self.staged_liquid_offsets)
    }

    /// Advance by `dt` seconds of wall-clock time
    pub fn advance(&mut self, dt: f64) -> Option<ResetEvent> {
        self.phase_elapsed += dt.max(0.0);

        match self.phase {
            ResetPhase::Idle => None,
            ResetPhase::FadingToBlack => {
                let p = progress(self.phase_elapsed, self.timing.fade_in);
                self.fade = smoothstep(p);
                if p >= 1.0 {
                    self.fade = 1.0;
                    self.enter(ResetPhase::HoldingBlackPreReset);
                }
                None
            }
            ResetPhase::HoldingBlackPreReset => {
                self.fade = 1.0;
                if self.phase_elapsed >= self.timing.half_black() {
                    self.enter(ResetPhase::HoldingBlackPostReset);
                    return Some(ResetEvent::PerformReset);
                }
                None
            }
            ResetPhase::HoldingBlackPostReset => {
                self.fade = 1.0;
                if self.phase_elapsed >= self.timing.half_black() {
                    self.enter(ResetPhase::FadingFromBlack);
                    return Some(ResetEvent::FadeOutStarted);
                }
                None
            }
            ResetPhase::FadingFromBlack => {
                let p = progress(self.phase_elapsed, self.timing.fade_out);
                self.fade = 1.0 - smoothstep(p);
                if p >= 1.0 {
                    self.fade = 0.0;
                    self.enter(ResetPhase::Idle);
                    return Some(ResetEvent::Finished);
                }
                None
            }
        }
    }

    fn enter(&mut self, phase: ResetPhase) {
        log::debug!("reset phase {} -> {}", self.phase.id(), phase.id());
        self.phase = phase;
        self.phase_elapsed = 0.0;
    }
}
