//! Shared data model for trigger detection and alert dispatch.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Raw accelerometer reading (m/s² per axis)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorSample {
    /// X-axis acceleration
    pub x: f64,
    /// Y-axis acceleration
    pub y: f64,
    /// Z-axis acceleration
    pub z: f64,
    /// Sample timestamp in milliseconds on a monotonic clock
    pub timestamp_ms: u64,
}

impl SensorSample {
    /// Create a new sample
    pub fn new(x: f64, y: f64, z: f64, timestamp_ms: u64) -> Self {
        Self {
            x,
            y,
            z,
            timestamp_ms,
        }
    }

    /// Euclidean norm of the acceleration vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// What caused an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// User pressed the SOS control
    Manual,
    /// Shake pattern recognised by the motion detector
    ShakeDetected,
}

/// A single detected trigger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerEvent {
    /// When the trigger fired (milliseconds)
    pub timestamp_ms: u64,
    /// Trigger origin
    pub source: TriggerSource,
}

impl TriggerEvent {
    /// Trigger raised by an explicit user action
    pub fn manual(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            source: TriggerSource::Manual,
        }
    }

    /// Trigger raised by the shake detector
    pub fn shake(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            source: TriggerSource::ShakeDetected,
        }
    }
}

/// Quality of a resolved coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccuracyHint {
    /// Fresh high-accuracy fix
    Precise,
    /// Cached fix from the provider
    LastKnown,
    /// No fix could be obtained; latitude/longitude are meaningless
    Unavailable,
}

/// Position as reported by a location provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoFix {
    /// Create a new fix
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Best-effort location attached to an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees (0.0 when unavailable)
    pub latitude: f64,
    /// Longitude in decimal degrees (0.0 when unavailable)
    pub longitude: f64,
    /// How the coordinate was obtained
    pub accuracy: AccuracyHint,
}

impl Coordinate {
    /// Coordinate from a fresh fix
    pub fn precise(fix: GeoFix) -> Self {
        Self::from_fix(fix, AccuracyHint::Precise)
    }

    /// Coordinate from a cached fix
    pub fn last_known(fix: GeoFix) -> Self {
        Self::from_fix(fix, AccuracyHint::LastKnown)
    }

    /// Placeholder for when every acquisition tier failed
    pub fn unavailable() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            accuracy: AccuracyHint::Unavailable,
        }
    }

    fn from_fix(fix: GeoFix, accuracy: AccuracyHint) -> Self {
        Self {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy,
        }
    }

    /// Check if this coordinate carries a usable position
    pub fn is_available(&self) -> bool {
        self.accuracy != AccuracyHint::Unavailable
    }

    /// Latitude/longitude pair, `None` when unavailable
    pub fn position(&self) -> Option<GeoFix> {
        self.is_available()
            .then(|| GeoFix::new(self.latitude, self.longitude))
    }
}

/// Delivery method for a channel target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Direct send through the platform messaging service
    NativeMessage,
    /// Hand the message to a user-mediated composer
    ComposerHandoff,
}

/// One entry in a recipient's fallback chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChannelTarget {
    /// Delivery method
    pub kind: ChannelKind,
    /// Channel address (phone number for SMS-style channels)
    pub address: String,
}

impl ChannelTarget {
    /// Direct-send target
    pub fn native(address: impl Into<String>) -> Self {
        Self {
            kind: ChannelKind::NativeMessage,
            address: address.into(),
        }
    }

    /// Composer hand-off target
    pub fn composer(address: impl Into<String>) -> Self {
        Self {
            kind: ChannelKind::ComposerHandoff,
            address: address.into(),
        }
    }
}

/// Emergency contact with an ordered channel preference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipient {
    /// Stable identifier
    pub id: String,
    /// Name shown to the user
    pub display_name: String,
    /// Channels tried in order until one delivers or hands off
    pub channels: Vec<ChannelTarget>,
}

impl Recipient {
    /// Create a recipient with an explicit channel chain
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        channels: Vec<ChannelTarget>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            channels,
        }
    }

    /// Recipient reached by phone: direct send first, composer hand-off second
    pub fn with_phone(
        id: impl Into<String>,
        display_name: impl Into<String>,
        phone: &str,
    ) -> Self {
        let phone = phone.trim();
        Self::new(
            id,
            display_name,
            vec![ChannelTarget::native(phone), ChannelTarget::composer(phone)],
        )
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}
