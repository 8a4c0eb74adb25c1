//! Best-effort location acquisition.
//!
//! Tiers are tried in order and never raced:
//! 1. fresh high-accuracy fix, bounded by a timeout
//! 2. provider's last-known fix
//! 3. [`Coordinate::unavailable`]
//!
//! Failures never escape the resolver; they only lower the accuracy hint.

use crate::ports::{LocationProvider, PortError};
use safeguard_core::{Coordinate, GeoFix};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Location resolver with a fixed fresh-fix timeout
#[derive(Debug, Clone)]
pub struct LocationResolver {
    fresh_fix_timeout: Duration,
}

impl LocationResolver {
    /// Create a resolver
    pub fn new(fresh_fix_timeout: Duration) -> Self {
        Self { fresh_fix_timeout }
    }

    /// Resolve a coordinate using the provider's fallback chain
    pub async fn resolve(&self, provider: &dyn LocationProvider) -> Coordinate {
        match self.fresh_fix(provider).await {
            Ok(Some(fix)) => {
                debug!("Resolved fresh location fix");
                return Coordinate::precise(fix);
            }
            Ok(None) => info!("Fresh fix returned nothing, falling back to last known"),
            Err(e) => warn!(error = %e, "Fresh fix failed, falling back to last known"),
        }

        match provider.last_known_fix().await {
            Ok(Some(fix)) => {
                info!("Using last known location fix");
                Coordinate::last_known(fix)
            }
            Ok(None) => {
                warn!("No last known fix, location unavailable");
                Coordinate::unavailable()
            }
            Err(e) => {
                warn!(error = %e, "Last known fix failed, location unavailable");
                Coordinate::unavailable()
            }
        }
    }

    async fn fresh_fix(&self, provider: &dyn LocationProvider) -> Result<Option<GeoFix>, PortError> {
        let timeout = self.fresh_fix_timeout;
        match tokio::time::timeout(timeout, provider.request_fresh_fix(timeout)).await {
            Ok(result) => result,
            Err(_) => Err(PortError::Timeout(timeout)),
        }
    }

    /// Configured timeout for the fresh-fix tier
    pub fn fresh_fix_timeout(&self) -> Duration {
        self.fresh_fix_timeout
    }
}
