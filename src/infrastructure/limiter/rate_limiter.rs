use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

/// Per-client counter for one rate-limit window.
#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited,
}

/// Sliding fixed-window limiter keyed by client identifier: the counter
/// resets entirely once its window expires rather than decaying continuously.
/// Handed to the contact pipeline as an owned capability; expired entries are
/// swept opportunistically on every check, so at most one live entry exists
/// per key.
#[derive(Debug, Clone)]
pub struct RateLimiterStore {
    entries: Arc<DashMap<String, RateLimitEntry>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiterStore {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        RateLimiterStore {
            entries: Arc::new(DashMap::new()),
            window,
            max_requests,
        }
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);

        match self.entries.entry(key.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.count >= self.max_requests {
                    return RateLimitDecision::Limited;
                }
                entry.count += 1;
                RateLimitDecision::Allowed {
                    remaining: self.max_requests - entry.count,
                }
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(RateLimitEntry {
                    count: 1,
                    expires_at: now + self.window,
                });
                RateLimitDecision::Allowed {
                    remaining: self.max_requests - 1,
                }
            }
        }
    }

    #[cfg(test)]
    fn live_entries(&self) -> usize {
        self.entries.len()
    }
}
