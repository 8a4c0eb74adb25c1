//! Alert fault taxonomy.
//!
//! Only [`AlertFault::LocationDisabled`] is fatal. [`AlertFault::NoRecipients`]
//! ends an attempt too, but it is reported so the caller can fall back to a
//! saved number. The others are recorded where they happen and the pipeline
//! carries on with whatever it still has.

use thiserror::Error;

/// Conditions raised along the alert pipeline
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlertFault {
    /// Location services are switched off; no fix was attempted
    #[error("Location services are disabled")]
    LocationDisabled,

    /// Both fix tiers failed; the alert went out without a position
    #[error("Location unavailable: fresh and last-known fixes both failed")]
    LocationUnavailable,

    /// One channel attempt failed; the next channel is tried
    #[error("Channel failed: {0}")]
    ChannelFailed(String),

    /// Every channel for a recipient failed
    #[error("Recipient {recipient_id} unreachable: {detail}")]
    RecipientUnreachable {
        /// Recipient identifier
        recipient_id: String,
        /// Error from the last channel tried
        detail: String,
    },

    /// Nobody to send the alert to
    #[error("No recipients configured")]
    NoRecipients,
}

impl AlertFault {
    /// Check if this fault is the location precondition failing
    pub fn is_fatal(&self) -> bool {
        matches!(self, AlertFault::LocationDisabled)
    }
}
