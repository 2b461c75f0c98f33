//! Decaying-opacity state machine for transient on-screen controls.
//!
//! The controller is clock-fed and side-effect free: `begin` and `step`
//! report the opacity to apply and the next step deadline, and the caller
//! applies them to the registered controls.

use serde::{Deserialize, Serialize};

/// Spacing between opacity interpolation steps.
pub const FADE_STEP_INTERVAL_MS: f64 = 20.0;

/// Auto-hide tuning, taken from the viewer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeSettings {
    /// Master switch; when off, `begin` never arms a fade.
    pub auto_hide: bool,
    /// Delay between the triggering event and the first opacity change.
    pub delay_ms: f64,
    /// Duration of the full 1.0 → 0.0 interpolation.
    pub length_ms: f64,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            auto_hide: true,
            delay_ms: 2000.0,
            length_ms: 1500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FadePhase {
    #[default]
    Idle,
    /// Armed, waiting out the auto-hide delay.
    Pending,
    /// Opacity interpolating downward.
    Fading,
}

/// Outcome of one interpolation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStepOutcome {
    /// Opacity to apply to every registered control, when armed.
    pub opacity: Option<f64>,
    /// Deadline of the next step; `None` ends the chain.
    pub reschedule_at_ms: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct FadeController {
    settings: FadeSettings,
    should_fade: bool,
    fade_begin_ms: f64,
    phase: FadePhase,
}

impl FadeController {
    #[must_use]
    pub fn new(settings: FadeSettings) -> Self {
        Self {
            settings,
            should_fade: false,
            fade_begin_ms: 0.0,
            phase: FadePhase::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    #[must_use]
    pub fn should_fade(&self) -> bool {
        self.should_fade
    }

    #[must_use]
    pub fn settings(&self) -> FadeSettings {
        self.settings
    }

    /// Arms the auto-hide countdown.
    ///
    /// Returns the deadline of the first interpolation step, or `None` when
    /// auto-hide is disabled.
    pub fn begin(&mut self, now_ms: f64) -> Option<f64> {
        if !self.settings.auto_hide {
            return None;
        }
        self.should_fade = true;
        self.fade_begin_ms = now_ms + self.settings.delay_ms;
        self.phase = FadePhase::Pending;
        Some(self.fade_begin_ms + FADE_STEP_INTERVAL_MS)
    }

    /// Advances the interpolation by one step.
    ///
    /// Opacity decays linearly from 1.0 at `fade_begin` to 0.0 over
    /// `length_ms`, clamped at both ends. The chain ends once opacity
    /// reaches zero; controls stay hidden until re-shown.
    pub fn step(&mut self, now_ms: f64) -> FadeStepOutcome {
        if !self.should_fade {
            return FadeStepOutcome {
                opacity: None,
                reschedule_at_ms: None,
            };
        }

        let elapsed_ms = now_ms - self.fade_begin_ms;
        let opacity = (1.0 - elapsed_ms / self.settings.length_ms).clamp(0.0, 1.0);

        if opacity > 0.0 {
            self.phase = if now_ms < self.fade_begin_ms {
                FadePhase::Pending
            } else {
                FadePhase::Fading
            };
            FadeStepOutcome {
                opacity: Some(opacity),
                reschedule_at_ms: Some(now_ms + FADE_STEP_INTERVAL_MS),
            }
        } else {
            self.phase = FadePhase::Idle;
            FadeStepOutcome {
                opacity: Some(0.0),
                reschedule_at_ms: None,
            }
        }
    }

    /// Disarms any pending or in-flight fade.
    ///
    /// The caller restores every control to opacity 1.0.
    pub fn abort(&mut self) {
        self.should_fade = false;
        self.phase = FadePhase::Idle;
    }
}
