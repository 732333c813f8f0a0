use std::{collections::VecDeque, net::IpAddr, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Outcome of a single rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Rejected { retry_after: Duration },
}

/// Admitted requests of one client inside the current window, oldest first.
#[derive(Debug, Default)]
struct RateLimitCounter {
    hits: VecDeque<DateTime<Utc>>,
}

impl RateLimitCounter {
    fn evict_before(&mut self, cutoff: DateTime<Utc>) {
        while self.hits.front().is_some_and(|hit| *hit <= cutoff) {
            self.hits.pop_front();
        }
    }

    fn count(&self) -> usize {
        self.hits.len()
    }

    fn window_start(&self) -> Option<DateTime<Utc>> {
        self.hits.front().copied()
    }
}

/// Per-client sliding-window limiter.
///
/// A client may make at most `max_requests` admitted requests in any span of
/// `window`. Rejected requests are not recorded, so a client that keeps
/// retrying is let back in as soon as its oldest hit leaves the window.
#[derive(Clone)]
pub struct RateLimiter {
    counters: Arc<DashMap<IpAddr, RateLimitCounter>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        RateLimiter {
            counters: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    pub fn allow(&self, client: IpAddr) -> RateDecision {
        self.allow_at(client, Utc::now())
    }

    pub fn allow_at(&self, client: IpAddr, now: DateTime<Utc>) -> RateDecision {
        let mut counter = self.counters.entry(client).or_default();
        counter.evict_before(now - self.window);

        if counter.count() >= self.max_requests as usize {
            let retry_after = counter
                .window_start()
                .map(|start| start + self.window - now)
                .unwrap_or(self.window);
            tracing::debug!(%client, ?retry_after, "Rate limit exceeded");
            return RateDecision::Rejected { retry_after };
        }

        counter.hits.push_back(now);
        RateDecision::Allowed {
            remaining: self.max_requests - counter.count() as u32,
        }
    }

    /// Forgets clients with no hits left inside the window.
    pub fn purge_idle_at(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.window;
        let before = self.counters.len();
        self.counters.retain(|_, counter| {
            counter.evict_before(cutoff);
            counter.count() > 0
        });
        before.saturating_sub(self.counters.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.counters.len()
    }
}
