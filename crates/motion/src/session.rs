//! Scoped shake-detection lifecycle.
//!
//! A [`DetectionSession`] bundles the filter and detector state so they are
//! always created and discarded together. [`ShakeMonitor`] owns at most one
//! session: enabling allocates a fresh one, disabling drops it, and samples
//! arriving while disabled are ignored.

use crate::detector::DetectorState;
use crate::filter::{FilterState, MotionFilter};
use safeguard_core::{SensorSample, ShakeThresholds, TriggerEvent};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Motion subsystem errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    /// Device has no accelerometer to subscribe to
    #[error("No accelerometer available on this device")]
    NoAccelerometer,

    /// Detection worker task ended abnormally
    #[error("Detection worker failed: {0}")]
    WorkerFailed(String),
}

/// Filter and detector state for one enabled period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSession {
    filter: FilterState,
    detector: DetectorState,
    samples_seen: u64,
}

impl DetectionSession {
    /// Fresh session with zeroed filter and detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter a raw sample and advance the detector
    pub fn process(
        &mut self,
        sample: &SensorSample,
        thresholds: &ShakeThresholds,
    ) -> Option<TriggerEvent> {
        let (jerk, filter) = MotionFilter::apply(sample, self.filter);
        let (event, detector) = self.detector.advance(jerk, sample.timestamp_ms, thresholds);
        self.filter = filter;
        self.detector = detector;
        self.samples_seen += 1;

        if let Some(event) = &event {
            info!(
                timestamp_ms = event.timestamp_ms,
                jerk_magnitude = jerk,
                samples_seen = self.samples_seen,
                "Shake trigger fired"
            );
        }
        event
    }

    /// Current filter memory
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Current detector memory
    pub fn detector_state(&self) -> &DetectorState {
        &self.detector
    }

    /// Samples processed since the session started
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }
}

/// Enable/disable wrapper around a [`DetectionSession`]
#[derive(Debug, Clone)]
pub struct ShakeMonitor {
    thresholds: ShakeThresholds,
    session: Option<DetectionSession>,
}

impl ShakeMonitor {
    /// Create a disabled monitor
    pub fn new(thresholds: ShakeThresholds) -> Self {
        Self {
            thresholds,
            session: None,
        }
    }

    /// Start a fresh session.
    ///
    /// Any running session is replaced, so no filter history carries over.
    pub fn enable(&mut self) {
        if self.session.is_some() {
            debug!("Restarting shake detection session");
        }
        self.session = Some(DetectionSession::new());
        info!(
            threshold = self.thresholds.strong_shake_abs_magnitude,
            window_ms = self.thresholds.window_ms,
            cooldown_ms = self.thresholds.cooldown_ms,
            "Shake detection enabled"
        );
    }

    /// Start a session only if the device can deliver accelerometer samples
    pub fn enable_with_sensor(&mut self, has_accelerometer: bool) -> Result<(), MotionError> {
        if !has_accelerometer {
            warn!("Cannot enable shake detection: no accelerometer");
            self.session = None;
            return Err(MotionError::NoAccelerometer);
        }
        self.enable();
        Ok(())
    }

    /// Stop detection and discard all session state
    pub fn disable(&mut self) {
        if let Some(session) = self.session.take() {
            info!(samples_seen = session.samples_seen(), "Shake detection disabled");
        }
    }

    /// Check if a session is active
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Feed one sample; ignored while disabled
    pub fn on_sample(&mut self, sample: &SensorSample) -> Option<TriggerEvent> {
        let thresholds = &self.thresholds;
        self.session.as_mut()?.process(sample, thresholds)
    }

    /// Active session, if any
    pub fn session(&self) -> Option<&DetectionSession> {
        self.session.as_ref()
    }

    /// Thresholds applied to every session
    pub fn thresholds(&self) -> &ShakeThresholds {
        &self.thresholds
    }
}
