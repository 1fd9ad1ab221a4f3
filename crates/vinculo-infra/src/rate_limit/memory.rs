//! Per-key in-memory rate limiter on top of governor.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use vinculo_core::ports::{RateLimitResult, RateLimiter};

type KeyedRateLimiter = GovernorRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Stale keys are swept once every this many checks.
const PRUNE_EVERY: u64 = 1024;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per key within one window.
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Settings for the generation endpoint, from
    /// `GENERATE_RATE_LIMIT_MAX_REQUESTS` and `GENERATE_RATE_LIMIT_WINDOW_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("GENERATE_RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("GENERATE_RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }
}

/// GCRA limiter keyed by client address.
///
/// Limits are per process. Keys whose budget is fully restored are dropped
/// periodically, so memory follows the number of recently active clients.
pub struct InMemoryRateLimiter {
    limiter: KeyedRateLimiter,
    clock: DefaultClock,
    window: Duration,
    checks: AtomicU64,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(config.window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: KeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
            window: config.window,
            checks: AtomicU64::new(0),
        }
    }

    pub fn from_env() -> Self {
        Self::new(RateLimitConfig::from_env())
    }

    /// Forget keys that are back to a full budget.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of keys currently held.
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, key: &str) -> RateLimitResult {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
            tracing::debug!(keys = self.tracked_keys(), "Pruned idle rate limit keys");
        }

        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => RateLimitResult {
                allowed: true,
                reset_after: self.window,
            },
            Err(not_until) => RateLimitResult {
                allowed: false,
                reset_after: not_until.wait_time_from(self.clock.now()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_block_per_key() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
        });

        assert!(limiter.check("admin-1").allowed);
        assert!(limiter.check("admin-1").allowed);

        let blocked = limiter.check("admin-1");
        assert!(!blocked.allowed);
        assert!(blocked.reset_after > Duration::ZERO);

        // Another caller has its own budget.
        assert!(limiter.check("admin-2").allowed);
    }

    #[test]
    fn test_zero_max_requests_still_allows_one() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 0,
            window: Duration::from_secs(60),
        });
        assert!(limiter.check("k").allowed);
        assert!(!limiter.check("k").allowed);
    }

    fn short_window() -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_millis(10),
        })
    }

    #[test]
    fn test_prune_forgets_idle_keys() {
        let limiter = short_window();
        for i in 0..50 {
            limiter.check(&format!("addr:10.0.0.{}", i));
        }
        assert_eq!(limiter.tracked_keys(), 50);

        std::thread::sleep(Duration::from_millis(50));
        limiter.prune();
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn test_checks_sweep_idle_keys_on_their_own() {
        let limiter = short_window();
        for i in 0..100 {
            limiter.check(&format!("addr:10.0.1.{}", i));
        }
        std::thread::sleep(Duration::from_millis(50));

        for _ in 100..PRUNE_EVERY {
            limiter.check("addr:10.0.2.1");
        }
        assert!(limiter.tracked_keys() <= 1);
    }
}
