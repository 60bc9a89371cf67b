//! Per-client token bucket state.

use std::time::Duration;

use tokio::time::Instant;

/// Token state for one client key.
///
/// Owned exclusively by the registry; all mutation happens inside the
/// registry's critical section. Uses the tokio clock so tests can drive
/// time deterministically.
#[derive(Debug)]
pub(crate) struct ClientBucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl ClientBucket {
    /// A fresh bucket starts full.
    pub(crate) fn new(capacity: f64, now: Instant) -> Self {
        Self {
            tokens: capacity,
            last_refill: now,
            last_seen: now,
        }
    }

    /// Refill by elapsed time at `refill_rate` tokens/second, capped at
    /// `capacity`, then consume one token if available.
    pub(crate) fn try_acquire(&mut self, capacity: f64, refill_rate: f64, now: Instant) -> bool {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Mark the client as seen, admitted or not.
    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_seen = now;
    }

    /// Time since the client was last seen.
    pub(crate) fn idle_for(&self, now: Instant) -> Duration {
        now.duration_since(self.last_seen)
    }
}
