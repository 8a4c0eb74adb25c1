//! Alert fan-out to recipients
//!
//! Every recipient is handled independently: its channels are tried in the
//! declared order until one delivers or hands off. A failing recipient never
//! stops the others. Recipients run concurrently up to a bound, but outcomes
//! are always reported in input order.

use crate::fault::AlertFault;
use crate::ports::{ChannelSender, SendStatus};
use futures_util::stream::{self, StreamExt};
use safeguard_core::{ChannelTarget, Recipient};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Detail recorded for a recipient without any channel
pub const NO_CHANNELS_DETAIL: &str = "no delivery channels";

/// Terminal status for one recipient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// A channel accepted the message
    Delivered,
    /// A channel deferred the send to a user-mediated flow
    HandedOff,
    /// Every channel failed
    Failed,
}

/// Outcome of one dispatch run for one recipient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchOutcome {
    /// Recipient identifier
    pub recipient_id: String,
    /// Channel that ended the attempt; `None` when every channel failed
    pub channel_used: Option<ChannelTarget>,
    /// Terminal status
    pub status: DeliveryStatus,
    /// Error from the last failed channel, set only on `Failed`
    pub error_detail: Option<String>,
    /// Channel attempts made for this recipient
    pub attempts: u32,
}

impl DispatchOutcome {
    /// Check if the message was delivered
    pub fn is_delivered(&self) -> bool {
        self.status == DeliveryStatus::Delivered
    }

    /// Fault to surface for this outcome, if any
    pub fn fault(&self) -> Option<AlertFault> {
        match self.status {
            DeliveryStatus::Failed => Some(AlertFault::RecipientUnreachable {
                recipient_id: self.recipient_id.clone(),
                detail: self.error_detail.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

/// Aggregated result of a dispatch run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DispatchReport {
    /// Recipients processed; always equals the recipient count
    pub attempted: u32,
    /// Recipients with status `Delivered`
    pub delivered: u32,
    /// Recipients with status `HandedOff`
    pub handed_off: u32,
    /// Recipients with status `Failed`
    pub failed: u32,
    /// Per-recipient outcomes, in recipient order
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    /// Build a report from ordered outcomes
    pub fn new(outcomes: Vec<DispatchOutcome>) -> Self {
        let count = |status: DeliveryStatus| {
            outcomes.iter().filter(|o| o.status == status).count() as u32
        };
        Self {
            attempted: outcomes.len() as u32,
            delivered: count(DeliveryStatus::Delivered),
            handed_off: count(DeliveryStatus::HandedOff),
            failed: count(DeliveryStatus::Failed),
            outcomes,
        }
    }

    /// Check if every recipient received the message directly
    pub fn all_delivered(&self) -> bool {
        self.delivered == self.attempted
    }

    /// Faults for unreachable recipients, in recipient order
    pub fn faults(&self) -> Vec<AlertFault> {
        self.outcomes.iter().filter_map(DispatchOutcome::fault).collect()
    }

    /// Deterministic JSON rendering of the report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fan-out engine over a [`ChannelSender`]
#[derive(Debug, Clone)]
pub struct DispatchCoordinator {
    max_concurrency: usize,
}

impl DispatchCoordinator {
    /// Default number of recipients dispatched at once
    pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

    /// Create a coordinator with the default concurrency bound
    pub fn new() -> Self {
        Self::with_max_concurrency(Self::DEFAULT_MAX_CONCURRENCY)
    }

    /// Create a coordinator with a custom concurrency bound (minimum 1)
    pub fn with_max_concurrency(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Send `message` to every recipient and aggregate the outcomes
    pub async fn dispatch(
        &self,
        message: &str,
        recipients: &[Recipient],
        sender: &dyn ChannelSender,
    ) -> DispatchReport {
        if recipients.is_empty() {
            debug!("Dispatch called with no recipients");
            return DispatchReport::default();
        }

        info!(
            recipients = recipients.len(),
            max_concurrency = self.max_concurrency,
            "Dispatching alert"
        );

        // `buffered` keeps results in input order regardless of completion order
        let outcomes: Vec<DispatchOutcome> = stream::iter(recipients)
            .map(|recipient| dispatch_recipient(message, recipient, sender))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let report = DispatchReport::new(outcomes);
        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            handed_off = report.handed_off,
            failed = report.failed,
            "Dispatch complete"
        );
        report
    }

    /// Configured concurrency bound
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

impl Default for DispatchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk one recipient's channel chain
async fn dispatch_recipient(
    message: &str,
    recipient: &Recipient,
    sender: &dyn ChannelSender,
) -> DispatchOutcome {
    let mut last_error: Option<String> = None;
    let mut attempts = 0u32;

    for target in &recipient.channels {
        attempts += 1;
        match sender.send(target, message).await {
            SendStatus::Delivered => {
                info!(
                    recipient_id = %recipient.id,
                    channel = ?target.kind,
                    attempts,
                    "Alert delivered"
                );
                return DispatchOutcome {
                    recipient_id: recipient.id.clone(),
                    channel_used: Some(target.clone()),
                    status: DeliveryStatus::Delivered,
                    error_detail: None,
                    attempts,
                };
            }
            SendStatus::HandedOff => {
                info!(
                    recipient_id = %recipient.id,
                    channel = ?target.kind,
                    attempts,
                    "Alert handed off to composer"
                );
                return DispatchOutcome {
                    recipient_id: recipient.id.clone(),
                    channel_used: Some(target.clone()),
                    status: DeliveryStatus::HandedOff,
                    error_detail: None,
                    attempts,
                };
            }
            SendStatus::Failed(detail) => {
                warn!(
                    recipient_id = %recipient.id,
                    channel = ?target.kind,
                    error = %AlertFault::ChannelFailed(detail.clone()),
                    "Channel attempt failed, trying next"
                );
                last_error = Some(detail);
            }
        }
    }

    let detail = last_error.unwrap_or_else(|| NO_CHANNELS_DETAIL.to_string());
    warn!(
        recipient_id = %recipient.id,
        attempts,
        detail = %detail,
        "Recipient unreachable"
    );
    DispatchOutcome {
        recipient_id: recipient.id.clone(),
        channel_used: None,
        status: DeliveryStatus::Failed,
        error_detail: Some(detail),
        attempts,
    }
}
