//! Safeguard Dispatch
//!
//! Location acquisition, message formatting and fan-out delivery for alerts.
//!
//! # Components
//!
//! - [`LocationResolver`]: fresh fix → last-known fix → unavailable, never fails
//! - [`AlertFormatter`]: deterministic alert text with an optional map link
//! - [`DispatchCoordinator`]: per-recipient channel fallback with isolated
//!   failures and an ordered [`DispatchReport`]
//! - [`ports`]: traits for the platform services the engine relies on
//!
//! # Examples
//!
//! ```no_run
//! use safeguard_core::{Coordinate, GeoFix, Recipient};
//! use safeguard_dispatch::{AlertFormatter, ChannelSender, DispatchCoordinator};
//!
//! async fn send_all(sender: &dyn ChannelSender) {
//!     let message = AlertFormatter::default().format(&Coordinate::precise(GeoFix::new(45.0, -122.0)));
//!     let recipients = vec![Recipient::with_phone("c1", "Alice", "+15550100")];
//!     let report = DispatchCoordinator::new().dispatch(&message, &recipients, sender).await;
//!     assert_eq!(report.attempted, 1);
//! }
//! ```

#![warn(missing_docs)]

pub mod coordinator;
pub mod fault;
pub mod formatter;
pub mod location;
pub mod ports;

pub use coordinator::{
    DeliveryStatus, DispatchCoordinator, DispatchOutcome, DispatchReport, NO_CHANNELS_DETAIL,
};
pub use fault::AlertFault;
pub use formatter::AlertFormatter;
pub use location::LocationResolver;
pub use ports::{ChannelSender, ContactStore, LocationProvider, PortError, SendStatus};
