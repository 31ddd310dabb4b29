//! Minimum-interval spacing between outbound requests

use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

/// Enforces a minimum delay between consecutive requests
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    next_allowed: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_allowed: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may be sent, then reserve the slot after it.
    ///
    /// The first call returns immediately.
    pub async fn wait(&mut self) {
        if let Some(next_allowed) = self.next_allowed {
            let now = Instant::now();
            if next_allowed > now {
                debug!(
                    "Rate limiter sleeping {:.3}s",
                    (next_allowed - now).as_secs_f64()
                );
                sleep_until(next_allowed).await;
            }
        }
        self.next_allowed = Some(Instant::now() + self.min_interval);
    }

    /// Push the next slot out by at least `delay`, e.g. after a 429 response
    pub fn back_off(&mut self, delay: Duration) {
        let candidate = Instant::now() + delay;
        self.next_allowed = Some(match self.next_allowed {
            Some(current) if current > candidate => current,
            _ => candidate,
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::constants::MIN_GEOCODE_INTERVAL_MS,
        ))
    }
}
