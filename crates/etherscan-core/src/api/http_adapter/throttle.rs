use std::fmt;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Minimum-interval gate in front of every outbound request.
///
/// Admits one request per `interval` with no burst allowance, so two
/// consecutive requests through the same gate are at least `interval` apart.
/// A zero interval disables the gate.
pub struct Throttle {
    interval: Duration,
    limiter: Option<DirectRateLimiter>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Wait until the next request may be issued. The caller's task pays
    /// the delay.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl fmt::Debug for Throttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
