//! Client-side request throttling
//!
//! A token bucket from `governor` shared by every request a client makes,
//! so a long walk through a paginated endpoint stays under the API quota.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Token bucket admitting `requests_per_second`, with an equal burst
#[derive(Clone)]
pub struct Throttle {
    limiter: Arc<DefaultDirectRateLimiter>,
    requests_per_second: NonZeroU32,
}

impl Throttle {
    /// `None` when `requests_per_second` is zero, meaning unthrottled
    pub fn per_second(requests_per_second: u32) -> Option<Self> {
        let rate = NonZeroU32::new(requests_per_second)?;
        Some(Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
            requests_per_second: rate,
        })
    }

    /// Wait for a permit
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Take a permit if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second.get()
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}
