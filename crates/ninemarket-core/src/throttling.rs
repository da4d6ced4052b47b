use std::num::NonZeroU32;
use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared rate budget for outbound API calls.
#[derive(Clone)]
pub struct RequestThrottle {
    limiter: Arc<DirectRateLimiter>,
}

impl RequestThrottle {
    /// `requests_per_second` below one is treated as one.
    pub fn per_second(requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
        }
    }

    /// Waits until a unit of budget is available.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

impl std::fmt::Debug for RequestThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestThrottle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[tokio::test]
    async fn burst_passes_then_waits_for_budget() {
        let throttle = RequestThrottle::per_second(2);
        let started = Instant::now();
        throttle.acquire().await;
        throttle.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(200));

        throttle.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn clones_share_budget() {
        let throttle = RequestThrottle::per_second(1);
        let clone = throttle.clone();
        let started = Instant::now();
        throttle.acquire().await;
        clone.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(700));
    }
}
