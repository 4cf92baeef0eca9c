//! Minimum-gap throttle for polite sequential fetching.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between consecutive requests.
///
/// The first request is never delayed.
pub struct Throttle {
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until the minimum delay since the previous request has passed,
    /// then record this request.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
