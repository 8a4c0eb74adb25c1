//! Safeguard Orchestrator
//!
//! Wires shake detection, location resolution, formatting and dispatch into
//! one alert pipeline behind two entry points: the manual SOS trigger and the
//! sensor feed.
//!
//! # Examples
//!
//! ```no_run
//! use safeguard_core::SafeguardConfig;
//! use safeguard_orchestrator::{AlertOrchestrator, AlertPorts};
//!
//! async fn sos(ports: AlertPorts) {
//!     let orchestrator = AlertOrchestrator::new(&SafeguardConfig::default(), ports);
//!     let outcome = orchestrator.trigger_manual_alert().await;
//!     println!("{}", outcome.summary());
//! }
//! ```

#![warn(missing_docs)]

pub mod orchestrator;
pub mod outcome;

pub use orchestrator::{AlertOrchestrator, AlertPorts, FALLBACK_RECIPIENT_ID};
pub use outcome::AlertOutcome;
