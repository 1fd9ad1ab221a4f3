//! Rate limiting port.

use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
pub trait RateLimiter: Send + Sync {
    /// Record a hit for `key` and report whether it is allowed.
    fn check(&self, key: &str) -> RateLimitResult;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub reset_after: Duration,
}
