//! End-to-end alert pipeline.
//!
//! trigger → location precondition → resolve → format → recipients → dispatch

use crate::outcome::AlertOutcome;
use safeguard_core::{
    current_timestamp_ms, DispatchConfig, Recipient, RecipientMode, SafeguardConfig,
    SensorSample, TriggerEvent,
};
use safeguard_dispatch::{
    AlertFormatter, ChannelSender, ContactStore, DispatchCoordinator, LocationProvider,
    LocationResolver,
};
use safeguard_motion::{MotionError, ShakeMonitor};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Recipient id used for the single saved number in fallback mode
pub const FALLBACK_RECIPIENT_ID: &str = "fallback";

/// Platform services the orchestrator drives
#[derive(Clone)]
pub struct AlertPorts {
    /// Location service
    pub location: Arc<dyn LocationProvider>,
    /// Emergency contact source
    pub contacts: Arc<dyn ContactStore>,
    /// Message transport
    pub sender: Arc<dyn ChannelSender>,
}

impl AlertPorts {
    /// Bundle the three ports
    pub fn new(
        location: Arc<dyn LocationProvider>,
        contacts: Arc<dyn ContactStore>,
        sender: Arc<dyn ChannelSender>,
    ) -> Self {
        Self {
            location,
            contacts,
            sender,
        }
    }
}

/// Composes detection, location, formatting and dispatch
pub struct AlertOrchestrator {
    ports: AlertPorts,
    dispatch_config: DispatchConfig,
    resolver: LocationResolver,
    formatter: AlertFormatter,
    coordinator: DispatchCoordinator,
    monitor: Mutex<ShakeMonitor>,
}

impl AlertOrchestrator {
    /// Build an orchestrator from a validated config.
    ///
    /// Shake detection starts disabled.
    pub fn new(config: &SafeguardConfig, ports: AlertPorts) -> Self {
        Self {
            ports,
            dispatch_config: config.dispatch.clone(),
            resolver: LocationResolver::new(config.location.fresh_fix_timeout()),
            formatter: AlertFormatter::from_config(&config.message),
            coordinator: DispatchCoordinator::with_max_concurrency(config.dispatch.max_concurrency),
            monitor: Mutex::new(ShakeMonitor::new(config.detector.clone())),
        }
    }

    /// Alert raised by the user's SOS control
    pub async fn trigger_manual_alert(&self) -> AlertOutcome {
        self.handle_trigger(TriggerEvent::manual(current_timestamp_ms()))
            .await
    }

    /// Run the full pipeline for one trigger
    pub async fn handle_trigger(&self, trigger: TriggerEvent) -> AlertOutcome {
        info!(
            source = ?trigger.source,
            timestamp_ms = trigger.timestamp_ms,
            "Handling alert trigger"
        );

        if !self.ports.location.is_location_service_enabled() {
            warn!(source = ?trigger.source, "Location services disabled, alert not sent");
            return AlertOutcome::LocationDisabled { trigger };
        }

        let coordinate = self.resolver.resolve(self.ports.location.as_ref()).await;
        if !coordinate.is_available() {
            warn!("Sending alert without a location");
        }
        let message = self.formatter.format(&coordinate);

        let recipients = self.recipients().await;
        if recipients.is_empty() {
            warn!(mode = ?self.dispatch_config.recipient_mode, "No recipients for alert");
            return AlertOutcome::NoRecipients {
                trigger,
                coordinate,
            };
        }

        let report = self
            .coordinator
            .dispatch(&message, &recipients, self.ports.sender.as_ref())
            .await;

        let outcome = AlertOutcome::Dispatched {
            trigger,
            coordinate,
            report,
        };
        info!(summary = %outcome.summary(), "Alert attempt finished");
        outcome
    }

    async fn recipients(&self) -> Vec<Recipient> {
        match self.dispatch_config.recipient_mode {
            RecipientMode::AllContacts => self.ports.contacts.all_recipients().await,
            RecipientMode::FallbackNumber => self
                .dispatch_config
                .fallback_number()
                .map(|number| {
                    vec![Recipient::with_phone(
                        FALLBACK_RECIPIENT_ID,
                        "Saved number",
                        number,
                    )]
                })
                .unwrap_or_default(),
        }
    }

    /// Sensor feed entry point.
    ///
    /// Runs the pipeline inline when the sample completes a shake pattern.
    /// Returns `None` when no trigger fired or detection is disabled.
    pub async fn on_sample(&self, sample: SensorSample) -> Option<AlertOutcome> {
        let trigger = self.detect(&sample)?;
        Some(self.handle_trigger(trigger).await)
    }

    /// Feed a sample to the detector without running the pipeline
    pub fn detect(&self, sample: &SensorSample) -> Option<TriggerEvent> {
        // guard is dropped before any await in the caller
        self.monitor().on_sample(sample)
    }

    /// Run the pipeline for every trigger from a detection worker.
    ///
    /// Each outcome is passed to `on_outcome` as soon as its attempt finishes.
    /// Returns the number of triggers handled once the channel closes.
    pub async fn serve_triggers<F>(
        &self,
        mut triggers: mpsc::Receiver<TriggerEvent>,
        mut on_outcome: F,
    ) -> u64
    where
        F: FnMut(AlertOutcome),
    {
        let mut handled = 0u64;
        while let Some(trigger) = triggers.recv().await {
            on_outcome(self.handle_trigger(trigger).await);
            handled += 1;
        }
        debug!(handled, "Trigger stream closed");
        handled
    }

    /// Start a fresh detection session.
    ///
    /// Fails and stays disabled when the device has no accelerometer.
    pub fn enable_shake_detection(&self, has_accelerometer: bool) -> Result<(), MotionError> {
        self.monitor().enable_with_sensor(has_accelerometer)
    }

    /// Stop detection and discard its state
    pub fn disable_shake_detection(&self) {
        self.monitor().disable();
    }

    /// Check if shake detection is running
    pub fn is_shake_detection_enabled(&self) -> bool {
        self.monitor().is_enabled()
    }

    fn monitor(&self) -> MutexGuard<'_, ShakeMonitor> {
        self.monitor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
