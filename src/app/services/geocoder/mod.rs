//! Port geocoding service
//!
//! Resolves port names to coordinates through an external forward-geocoding
//! provider. The provider sits behind the [`Geocoder`] trait so batches can be
//! driven by the HTTP client in production and by in-memory fakes in tests.
//!
//! Requests are issued one at a time, spaced by a [`RateLimiter`]. A failed
//! lookup never aborts a batch: the port is recorded as "not found" and the
//! failure is reported once the batch completes.

use crate::Result;
use crate::app::models::Coordinates;
use async_trait::async_trait;

pub mod batch;
pub mod opencage;
pub mod rate_limiter;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use batch::{GeocodeStats, geocode_into, geocode_ports, pending_ports};
pub use opencage::OpenCageGeocoder;
pub use rate_limiter::RateLimiter;

/// Forward geocoding of a single place name
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up the first matching coordinate pair for `query`.
    ///
    /// `Ok(None)` means the provider answered but had no match.
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>>;

    /// Provider name used in log output
    fn provider_name(&self) -> &str {
        "geocoder"
    }
}
