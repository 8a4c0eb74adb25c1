//! Safeguard Motion
//!
//! Shake-trigger detection over a continuous accelerometer stream.
//!
//! # Pipeline
//!
//! 1. [`MotionFilter`] converts each raw sample into a jerk magnitude with a
//!    single-pole high-pass filter (gravity removal).
//! 2. [`ShakeDetector`] / [`DetectorState`] count strong jerks inside a sliding
//!    window and emit a debounced [`TriggerEvent`](safeguard_core::TriggerEvent),
//!    followed by a cooldown.
//! 3. [`ShakeMonitor`] scopes both states to an enable/disable lifecycle, and
//!    [`spawn_detection`] runs a monitor on a single-owner tokio task.
//!
//! Samples must be processed in arrival order; every type here assumes a
//! single consumer per session.
//!
//! # Example
//!
//! ```no_run
//! use safeguard_core::{SensorSample, ShakeThresholds};
//! use safeguard_motion::ShakeMonitor;
//!
//! let mut monitor = ShakeMonitor::new(ShakeThresholds::default());
//! monitor.enable();
//!
//! if let Some(trigger) = monitor.on_sample(&SensorSample::new(0.0, 0.0, 9.81, 0)) {
//!     println!("trigger at {}", trigger.timestamp_ms);
//! }
//! ```

#![warn(missing_docs)]

pub mod detector;
pub mod filter;
pub mod session;
pub mod worker;

pub use detector::{DetectorState, ShakeDetector};
pub use filter::{FilterState, MotionFilter, HIGH_PASS_DECAY};
pub use session::{DetectionSession, MotionError, ShakeMonitor};
pub use worker::{spawn_detection, DetectionHandle, DEFAULT_SAMPLE_BUFFER};
