//! Debounced shake detection.
//!
//! Strong jerk samples are counted inside a fixed window; once enough of them
//! land in one window a [`TriggerEvent`] fires, after which a cooldown
//! suppresses further triggers regardless of how many shakes accumulate.
//!
//! Accumulating and cooling down are not separate states: both live in the
//! same [`DetectorState`], and the cooldown check is applied on every sample.

use safeguard_core::{ShakeThresholds, TriggerEvent};
use serde::{Deserialize, Serialize};

/// Per-session detector memory
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectorState {
    /// Start of the current counting window, `None` before the first sample
    pub window_start_ms: Option<u64>,
    /// Strong shakes seen in the current window
    pub shake_count_in_window: u32,
    /// Time of the last trigger, `None` if the session never triggered
    pub last_trigger_ms: Option<u64>,
}

impl DetectorState {
    /// Advance the state machine by one filtered sample.
    ///
    /// The window is reset before the sample is counted, so a sample arriving
    /// exactly after expiry starts a new window rather than completing the old
    /// one. A required shake count below 1 is treated as 1: only a strong
    /// sample can complete a window.
    pub fn advance(
        self,
        jerk_magnitude: f64,
        now_ms: u64,
        thresholds: &ShakeThresholds,
    ) -> (Option<TriggerEvent>, DetectorState) {
        let mut next = self;

        let window_expired = match next.window_start_ms {
            None => true,
            Some(start) => now_ms.saturating_sub(start) > thresholds.window_ms,
        };
        if window_expired {
            next.window_start_ms = Some(now_ms);
            next.shake_count_in_window = 0;
        }

        if jerk_magnitude.abs() > thresholds.strong_shake_abs_magnitude {
            next.shake_count_in_window = next.shake_count_in_window.saturating_add(1);
        }

        let required = thresholds.required_shakes_per_window.max(1);
        if next.shake_count_in_window >= required && !next.in_cooldown(now_ms, thresholds)
        {
            next.last_trigger_ms = Some(now_ms);
            next.shake_count_in_window = 0;
            return (Some(TriggerEvent::shake(now_ms)), next);
        }

        (None, next)
    }

    /// Check if a trigger at `now_ms` would be suppressed by the cooldown.
    ///
    /// A clock that moved backwards counts as still cooling down.
    pub fn in_cooldown(&self, now_ms: u64, thresholds: &ShakeThresholds) -> bool {
        match self.last_trigger_ms {
            None => false,
            Some(last) => now_ms < last || now_ms - last <= thresholds.cooldown_ms,
        }
    }
}

/// Shake detector bound to a set of thresholds
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    thresholds: ShakeThresholds,
    state: DetectorState,
}

impl ShakeDetector {
    /// Create a detector with a fresh state
    pub fn new(thresholds: ShakeThresholds) -> Self {
        Self {
            thresholds,
            state: DetectorState::default(),
        }
    }

    /// Consume one jerk magnitude
    pub fn on_sample(&mut self, jerk_magnitude: f64, now_ms: u64) -> Option<TriggerEvent> {
        let (event, next) = self.state.advance(jerk_magnitude, now_ms, &self.thresholds);
        self.state = next;
        if let Some(event) = &event {
            tracing::info!(
                timestamp_ms = event.timestamp_ms,
                jerk_magnitude,
                "Shake trigger fired"
            );
        }
        event
    }

    /// Current state machine fields
    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    /// Active thresholds
    pub fn thresholds(&self) -> &ShakeThresholds {
        &self.thresholds
    }
}
