//! Ports to the platform services surrounding the alert engine.
//!
//! Location services, contact storage and message transport are implemented
//! outside this workspace. The engine only sees these traits, which keeps it
//! testable with deterministic fakes.

use async_trait::async_trait;
use safeguard_core::{ChannelTarget, GeoFix, Recipient};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a port implementation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortError {
    /// Platform service refused or failed the request
    #[error("Provider error: {0}")]
    Provider(String),

    /// Request did not complete in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

/// Platform location service
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request a fresh high-accuracy fix, giving up after `timeout`
    async fn request_fresh_fix(&self, timeout: Duration) -> Result<Option<GeoFix>, PortError>;

    /// Last fix cached by the platform
    async fn last_known_fix(&self) -> Result<Option<GeoFix>, PortError>;

    /// Whether any location provider (GPS or network) is switched on
    fn is_location_service_enabled(&self) -> bool;
}

/// Source of emergency contacts
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Read-only snapshot of every recipient, in display order
    async fn all_recipients(&self) -> Vec<Recipient>;
}

/// Result of one channel send attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SendStatus {
    /// Message accepted for delivery
    Delivered,
    /// Message passed to a user-mediated flow; final delivery is unknown
    HandedOff,
    /// Channel could not send
    Failed(String),
}

/// Message transport
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Send `message` through one channel target
    async fn send(&self, target: &ChannelTarget, message: &str) -> SendStatus;
}
