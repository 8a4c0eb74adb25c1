//! Core functionality for the Safeguard emergency alert engine.
//!
//! This crate provides the shared data model, configuration, error type and
//! logging setup used across the Safeguard crates. It owns no I/O of its own:
//! sensors, location services, contact storage and message transport are all
//! reached through ports defined in `safeguard-dispatch`.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{
    DispatchConfig, LocationConfig, MessageConfig, RecipientMode, SafeguardConfig, ShakeThresholds,
};
pub use error::{Error, Result};
pub use types::{
    current_timestamp_ms, AccuracyHint, ChannelKind, ChannelTarget, Coordinate, GeoFix, Recipient,
    SensorSample, TriggerEvent, TriggerSource,
};
