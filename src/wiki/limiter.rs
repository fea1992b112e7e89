// src/wiki/limiter.rs
// =============================================================================
// This module enforces a minimum spacing between outbound requests.
//
// Wikipedia is one shared remote resource and we run ten workers against
// it, so all fetches funnel through one RateLimiter: whoever fetches next
// must wait until the spacing since the previous request has elapsed.
//
// How it works:
// - An async Mutex guards the time of the last request
// - A caller computes when it is allowed to go, sleeps until then WHILE
//   STILL HOLDING THE LOCK, then stamps the new last-request time
// - Holding the lock across the sleep is the point: it serializes
//   callers, so N queued workers leave N*interval between themselves
//
// Why tokio::sync::Mutex and not std?
// - We sleep while holding the guard. A std::sync::Mutex guard held
//   across an .await would block the whole runtime thread; the tokio
//   Mutex is built for exactly this.
// =============================================================================

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, Instant};

// Serializes outbound request timing across all workers
pub struct RateLimiter {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        RateLimiter {
            interval,
            last_request: Mutex::new(None),
        }
    }

    // Blocks until this caller may issue the next request
    //
    // The very first caller passes straight through. Waiting is a real
    // sleep, not a spin - the task yields until its slot arrives.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
