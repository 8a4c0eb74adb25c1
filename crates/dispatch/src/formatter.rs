//! Alert message formatting.

use safeguard_core::{Coordinate, MessageConfig};

const ALERT_PREAMBLE: &str = "🚨 SOS! I need help. My location: ";
const UNKNOWN_LOCATION: &str = "unknown (location fix unavailable)";

/// Builds the alert text sent to every recipient
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    map_link_base: String,
}

impl AlertFormatter {
    /// Create a formatter that links to `map_link_base` followed by `lat,lon`
    pub fn new(map_link_base: impl Into<String>) -> Self {
        Self {
            map_link_base: map_link_base.into(),
        }
    }

    /// Create a formatter from the message config section
    pub fn from_config(config: &MessageConfig) -> Self {
        Self::new(config.map_link_base.clone())
    }

    /// Format the alert for `coord`.
    ///
    /// Coordinates are written with Rust's shortest round-trip float
    /// formatting, so no precision is lost or invented.
    pub fn format(&self, coord: &Coordinate) -> String {
        match coord.position() {
            Some(fix) => format!(
                "{ALERT_PREAMBLE}{}",
                self.map_link(fix.latitude, fix.longitude)
            ),
            None => format!("{ALERT_PREAMBLE}{UNKNOWN_LOCATION}"),
        }
    }

    /// Map link for a latitude/longitude pair
    pub fn map_link(&self, latitude: f64, longitude: f64) -> String {
        format!("{}{},{}", self.map_link_base, latitude, longitude)
    }
}

impl Default for AlertFormatter {
    fn default() -> Self {
        Self::from_config(&MessageConfig::default())
    }
}
