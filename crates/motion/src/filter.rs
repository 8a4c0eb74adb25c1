//! High-pass motion filter.
//!
//! Turns raw 3-axis acceleration into a scalar jerk magnitude. The filter
//! tracks the change in acceleration magnitude between consecutive samples
//! and accumulates it through a single-pole decay, which removes the constant
//! gravity component while keeping sudden movements.

use safeguard_core::SensorSample;
use serde::{Deserialize, Serialize};

/// Decay applied to the accumulated delta on every sample
pub const HIGH_PASS_DECAY: f64 = 0.9;

/// Per-session filter memory
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    /// Magnitude of the sample before the current one
    pub previous_magnitude: f64,
    /// Magnitude of the most recent sample
    pub current_magnitude: f64,
    /// High-pass output
    pub smoothed_delta: f64,
}

/// Stateless high-pass filter over [`FilterState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionFilter;

impl MotionFilter {
    /// Feed one sample through the filter.
    ///
    /// Returns the jerk magnitude together with the state to use for the next
    /// sample. Samples must be applied in arrival order.
    pub fn apply(sample: &SensorSample, state: FilterState) -> (f64, FilterState) {
        let magnitude = sample.magnitude();
        let delta = magnitude - state.current_magnitude;
        let smoothed_delta = HIGH_PASS_DECAY * state.smoothed_delta + delta;

        let next = FilterState {
            previous_magnitude: state.current_magnitude,
            current_magnitude: magnitude,
            smoothed_delta,
        };
        (smoothed_delta, next)
    }
}
