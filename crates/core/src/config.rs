//! Configuration management for Safeguard.
//!
//! Every section is defaulted, so a config file only needs the values it
//! overrides. Call [`SafeguardConfig::validate`] before handing a config built
//! in code to the engine; [`SafeguardConfig::from_toml_str`] and
//! [`SafeguardConfig::from_file`] validate for you.

use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SafeguardConfig {
    pub detector: ShakeThresholds,
    pub location: LocationConfig,
    pub dispatch: DispatchConfig,
    pub message: MessageConfig,
}

/// Shake detector tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShakeThresholds {
    /// Filtered magnitude above which a sample counts as a strong shake
    pub strong_shake_abs_magnitude: f64,
    /// Length of the counting window in milliseconds
    pub window_ms: u64,
    /// Strong shakes needed inside one window to trigger
    pub required_shakes_per_window: u32,
    /// Minimum time between two triggers in milliseconds
    pub cooldown_ms: u64,
}

impl Default for ShakeThresholds {
    fn default() -> Self {
        Self {
            strong_shake_abs_magnitude: 12.0,
            window_ms: 1_500,
            required_shakes_per_window: 3,
            cooldown_ms: 6_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// Upper bound for the fresh high-accuracy fix request
    pub fresh_fix_timeout_ms: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fresh_fix_timeout_ms: 10_000,
        }
    }
}

impl LocationConfig {
    pub fn fresh_fix_timeout(&self) -> Duration {
        Duration::from_millis(self.fresh_fix_timeout_ms)
    }
}

/// Who receives an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipientMode {
    /// Every contact in the contact store
    #[default]
    AllContacts,
    /// Only the saved fallback number
    FallbackNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Recipients dispatched concurrently
    pub max_concurrency: usize,
    pub recipient_mode: RecipientMode,
    /// Saved number used in [`RecipientMode::FallbackNumber`]
    pub fallback_number: Option<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            recipient_mode: RecipientMode::AllContacts,
            fallback_number: None,
        }
    }
}

impl DispatchConfig {
    /// Trimmed fallback number, `None` if missing or blank
    pub fn fallback_number(&self) -> Option<&str> {
        self.fallback_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessageConfig {
    /// Map URL prefix; `lat,lon` is appended verbatim
    pub map_link_base: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            map_link_base: "https://maps.google.com/?q=".to_string(),
        }
    }
}

impl SafeguardConfig {
    /// Load and validate a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("loading config {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let d = &self.detector;
        if !d.strong_shake_abs_magnitude.is_finite() || d.strong_shake_abs_magnitude <= 0.0 {
            return Err(Error::invalid(
                "detector.strong_shake_abs_magnitude",
                format!("must be a positive number, got {}", d.strong_shake_abs_magnitude),
            ));
        }
        if d.window_ms == 0 {
            return Err(Error::invalid("detector.window_ms", "must be greater than 0"));
        }
        if d.required_shakes_per_window == 0 {
            return Err(Error::invalid(
                "detector.required_shakes_per_window",
                "must be at least 1",
            ));
        }
        if self.location.fresh_fix_timeout_ms == 0 {
            return Err(Error::invalid(
                "location.fresh_fix_timeout_ms",
                "must be greater than 0",
            ));
        }
        if self.dispatch.max_concurrency == 0 {
            return Err(Error::invalid(
                "dispatch.max_concurrency",
                "must be at least 1",
            ));
        }
        if self.dispatch.recipient_mode == RecipientMode::FallbackNumber
            && self.dispatch.fallback_number().is_none()
        {
            return Err(Error::invalid(
                "dispatch.fallback_number",
                "required when recipient_mode is fallback_number",
            ));
        }
        Ok(())
    }
}
