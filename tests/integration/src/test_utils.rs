//! Deterministic fakes for the platform ports

use async_trait::async_trait;
use safeguard_core::{ChannelKind, ChannelTarget, GeoFix, Recipient, SafeguardConfig, SensorSample};
use safeguard_dispatch::{ChannelSender, ContactStore, LocationProvider, PortError, SendStatus};
use safeguard_orchestrator::{AlertOrchestrator, AlertPorts};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Standard gravity, the resting magnitude of a phone on a table
pub const G: f64 = 9.81;

/// Install a test subscriber once; later calls are no-ops
pub fn init_logging() {
    let _ = safeguard_core::logging::try_init();
}

/// How one location tier answers
#[derive(Debug, Clone)]
pub enum FixScript {
    Fix(GeoFix),
    Empty,
    Fail(String),
    Hang,
}

/// Location provider with scripted tiers and call counters
pub struct ScriptedLocation {
    enabled: bool,
    fresh: FixScript,
    last: FixScript,
    pub fresh_calls: AtomicUsize,
    pub last_calls: AtomicUsize,
}

impl ScriptedLocation {
    pub fn new(enabled: bool, fresh: FixScript, last: FixScript) -> Self {
        Self {
            enabled,
            fresh,
            last,
            fresh_calls: AtomicUsize::new(0),
            last_calls: AtomicUsize::new(0),
        }
    }

    /// Enabled provider returning `fix` on the first tier
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(
            true,
            FixScript::Fix(GeoFix::new(latitude, longitude)),
            FixScript::Empty,
        )
    }

    /// Provider with location services switched off
    pub fn disabled() -> Self {
        Self::new(false, FixScript::Empty, FixScript::Empty)
    }

    pub fn fresh_calls(&self) -> usize {
        self.fresh_calls.load(Ordering::SeqCst)
    }

    pub fn last_calls(&self) -> usize {
        self.last_calls.load(Ordering::SeqCst)
    }
}

async fn play(script: &FixScript) -> Result<Option<GeoFix>, PortError> {
    match script {
        FixScript::Fix(fix) => Ok(Some(*fix)),
        FixScript::Empty => Ok(None),
        FixScript::Fail(detail) => Err(PortError::Provider(detail.clone())),
        FixScript::Hang => {
            tokio::time::sleep(Duration::from_secs(86_400)).await;
            Ok(None)
        }
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocation {
    async fn request_fresh_fix(&self, _timeout: Duration) -> Result<Option<GeoFix>, PortError> {
        self.fresh_calls.fetch_add(1, Ordering::SeqCst);
        play(&self.fresh).await
    }

    async fn last_known_fix(&self) -> Result<Option<GeoFix>, PortError> {
        self.last_calls.fetch_add(1, Ordering::SeqCst);
        play(&self.last).await
    }

    fn is_location_service_enabled(&self) -> bool {
        self.enabled
    }
}

/// Fixed contact list
pub struct InMemoryContacts {
    recipients: Vec<Recipient>,
    pub reads: AtomicUsize,
}

impl InMemoryContacts {
    pub fn new(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients,
            reads: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContactStore for InMemoryContacts {
    async fn all_recipients(&self) -> Vec<Recipient> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.recipients.clone()
    }
}

/// One recorded send
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub target: ChannelTarget,
    pub message: String,
}

/// Sender that answers from a script and records every attempt.
///
/// Unscripted native sends are delivered; unscripted composer sends are
/// handed off, like a phone with a working SMS stack.
#[derive(Default)]
pub struct RecordingSender {
    script: HashMap<ChannelTarget, SendStatus>,
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, target: ChannelTarget, status: SendStatus) -> Self {
        self.script.insert(target, status);
        self
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSender for RecordingSender {
    async fn send(&self, target: &ChannelTarget, message: &str) -> SendStatus {
        self.sent.lock().unwrap().push(SentMessage {
            target: target.clone(),
            message: message.to_string(),
        });
        let status = self.script.get(target).cloned().unwrap_or(match target.kind {
            ChannelKind::NativeMessage => SendStatus::Delivered,
            ChannelKind::ComposerHandoff => SendStatus::HandedOff,
        });
        tracing::debug!(address = %target.address, ?status, "Fake send");
        status
    }
}

/// Orchestrator wired to fakes, with handles kept for assertions
pub struct Harness {
    pub location: Arc<ScriptedLocation>,
    pub contacts: Arc<InMemoryContacts>,
    pub sender: Arc<RecordingSender>,
    pub orchestrator: AlertOrchestrator,
}

impl Harness {
    pub fn new(
        config: &SafeguardConfig,
        location: ScriptedLocation,
        contacts: Vec<Recipient>,
        sender: RecordingSender,
    ) -> Self {
        init_logging();
        let location = Arc::new(location);
        let contacts = Arc::new(InMemoryContacts::new(contacts));
        let sender = Arc::new(sender);
        let ports = AlertPorts::new(location.clone(), contacts.clone(), sender.clone());
        Self {
            orchestrator: AlertOrchestrator::new(config, ports),
            location,
            contacts,
            sender,
        }
    }
}

/// Phone contacts `c0..cN` with numbers `+1555010N`
pub fn phone_contacts(count: usize) -> Vec<Recipient> {
    (0..count)
        .map(|i| Recipient::with_phone(format!("c{i}"), format!("Contact {i}"), &format!("+1555010{i}")))
        .collect()
}

/// Phone resting flat for `count` samples at 50 Hz
pub fn resting(start_ms: u64, count: u64) -> Vec<SensorSample> {
    (0..count)
        .map(|i| SensorSample::new(0.0, 0.0, G, start_ms + i * 20))
        .collect()
}

/// Hard back-and-forth shaking along x, 100ms apart
pub fn shaking(start_ms: u64, count: u64) -> Vec<SensorSample> {
    (0..count)
        .map(|i| {
            let x = if i % 2 == 0 { 30.0 } else { 0.0 };
            SensorSample::new(x, 0.0, G, start_ms + i * 100)
        })
        .collect()
}
