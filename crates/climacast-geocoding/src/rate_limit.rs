//! Minimum-interval request throttle.
//!
//! Public Nominatim allows one request per second per client. Every request
//! through a client awaits `acquire()` first; callers queue on the mutex, so
//! concurrent searches go out one at a time and never closer together than
//! the configured interval.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may be sent, then record it as sent.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {}ms before next request", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}
