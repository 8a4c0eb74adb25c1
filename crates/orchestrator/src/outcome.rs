//! Result of one alert attempt.

use safeguard_core::{Coordinate, TriggerEvent};
use safeguard_dispatch::{AlertFault, DispatchReport};
use serde::Serialize;

/// What happened to one trigger
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AlertOutcome {
    /// The alert was formatted and handed to the coordinator
    Dispatched {
        /// Trigger that started the attempt
        trigger: TriggerEvent,
        /// Location embedded in the message
        coordinate: Coordinate,
        /// Per-recipient results
        report: DispatchReport,
    },

    /// Location services were off; nothing was resolved or sent
    LocationDisabled {
        /// Trigger that started the attempt
        trigger: TriggerEvent,
    },

    /// Location was resolved but there was nobody to send to
    NoRecipients {
        /// Trigger that started the attempt
        trigger: TriggerEvent,
        /// Location that would have been sent
        coordinate: Coordinate,
    },
}

impl AlertOutcome {
    /// Trigger that started the attempt
    pub fn trigger(&self) -> &TriggerEvent {
        match self {
            AlertOutcome::Dispatched { trigger, .. }
            | AlertOutcome::LocationDisabled { trigger }
            | AlertOutcome::NoRecipients { trigger, .. } => trigger,
        }
    }

    /// Resolved coordinate, `None` when location was never queried
    pub fn coordinate(&self) -> Option<&Coordinate> {
        match self {
            AlertOutcome::Dispatched { coordinate, .. }
            | AlertOutcome::NoRecipients { coordinate, .. } => Some(coordinate),
            AlertOutcome::LocationDisabled { .. } => None,
        }
    }

    /// Dispatch report, present only when the alert went out
    pub fn report(&self) -> Option<&DispatchReport> {
        match self {
            AlertOutcome::Dispatched { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Fault that stopped the attempt before dispatch, if any
    pub fn fault(&self) -> Option<AlertFault> {
        match self {
            AlertOutcome::Dispatched { .. } => None,
            AlertOutcome::LocationDisabled { .. } => Some(AlertFault::LocationDisabled),
            AlertOutcome::NoRecipients { .. } => Some(AlertFault::NoRecipients),
        }
    }

    /// Every fault raised along the way.
    ///
    /// Order: the stopping fault, then `LocationUnavailable`, then unreachable
    /// recipients in recipient order.
    pub fn faults(&self) -> Vec<AlertFault> {
        let mut faults = Vec::new();
        if let Some(fault) = self.fault() {
            faults.push(fault);
        }
        if self.coordinate().is_some_and(|c| !c.is_available()) {
            faults.push(AlertFault::LocationUnavailable);
        }
        if let Some(report) = self.report() {
            faults.extend(report.faults());
        }
        faults
    }

    /// Check if the alert reached the dispatch stage
    pub fn is_dispatched(&self) -> bool {
        matches!(self, AlertOutcome::Dispatched { .. })
    }

    /// One-line description for status displays
    pub fn summary(&self) -> String {
        match self {
            AlertOutcome::Dispatched {
                coordinate, report, ..
            } => {
                let mut summary = format!(
                    "alert delivered to {} of {} recipient(s)",
                    report.delivered, report.attempted
                );
                if report.handed_off > 0 {
                    summary.push_str(&format!(", {} handed off", report.handed_off));
                }
                if report.failed > 0 {
                    summary.push_str(&format!(", {} failed", report.failed));
                }
                if !coordinate.is_available() {
                    summary.push_str(", location unknown");
                }
                summary
            }
            AlertOutcome::LocationDisabled { .. } => "location services disabled".to_string(),
            AlertOutcome::NoRecipients { .. } => "no recipients configured".to_string(),
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    ///
    /// Only faults that stopped the attempt become errors; partial delivery is
    /// still `Ok`.
    pub fn into_result(self) -> Result<DispatchReport, AlertFault> {
        match self {
            AlertOutcome::Dispatched { report, .. } => Ok(report),
            AlertOutcome::LocationDisabled { .. } => Err(AlertFault::LocationDisabled),
            AlertOutcome::NoRecipients { .. } => Err(AlertFault::NoRecipients),
        }
    }
}
