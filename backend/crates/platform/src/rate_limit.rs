//! Rate Limiting Infrastructure
//!
//! Fixed-window counters keyed by an arbitrary string (usually
//! `"<action>:<client ip>"`).

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
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
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request against `key` at `now_ms`
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at_ms: i64,
    count: u32,
}

/// Entries kept before expired windows are swept
const SWEEP_THRESHOLD: usize = 10_000;

/// Process-local store; counters reset on restart
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        let mut windows = self.windows.lock().await;
        if windows.len() >= SWEEP_THRESHOLD {
            windows.retain(|_, w| w.started_at_ms + config.window_ms() > now_ms);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at_ms: now_ms,
            count: 0,
        });

        if now_ms >= window.started_at_ms + config.window_ms() {
            *window = Window {
                started_at_ms: now_ms,
                count: 0,
            };
        }

        let reset_at_ms = window.started_at_ms + config.window_ms();
        if window.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - window.count,
            reset_at_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRateLimitStore, RateLimitConfig, RateLimitStore};

    /// Drives a store through the `Send` trait, as the auth use cases do
    async fn exhaust<S: RateLimitStore>(store: &S, key: &str, config: &RateLimitConfig) -> u32 {
        let mut allowed = 0;
        while store.check_and_increment(key, config, 0).await.allowed {
            allowed += 1;
        }
        allowed
    }

    #[tokio::test]
    async fn test_blocks_after_limit_within_window() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(2, 60);

        let first = store.check_and_increment("ip", &config, 1_000).await;
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        assert!(store.check_and_increment("ip", &config, 2_000).await.allowed);

        let third = store.check_and_increment("ip", &config, 3_000).await;
        assert!(!third.allowed);
        assert_eq!(third.reset_at_ms, 61_000);

        // other keys are independent
        assert!(store.check_and_increment("other", &config, 3_000).await.allowed);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 10);

        assert!(store.check_and_increment("k", &config, 0).await.allowed);
        assert!(!store.check_and_increment("k", &config, 9_999).await.allowed);
        assert!(store.check_and_increment("k", &config, 10_000).await.allowed);
    }

    #[tokio::test]
    async fn test_generic_callers_see_the_same_limit() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        assert_eq!(exhaust(&store, "magic:ip", &config).await, 3);
        assert!(!store.check_and_increment("magic:ip", &config, 1).await.allowed);
    }
}
