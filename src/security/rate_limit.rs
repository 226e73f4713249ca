//! Rate limiting for channel speech.
//!
//! # Architecture
//!
//! Uses the `governor` crate's token bucket algorithm. One limiter per
//! player, shared across every channel the player speaks in, created on
//! first use. A limiter left idle long enough to refill completely is
//! indistinguishable from a fresh one, so [`SpeechThrottle::sweep`] drops
//! those.

use crate::config::RateLimitConfig;
use channeld_proto::PlayerId;
use dashmap::DashMap;
use governor::{Quota, RateLimiter as GovRateLimiter};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tracing::debug;

/// Type alias for governor's direct rate limiter.
type DirectRateLimiter = governor::DefaultDirectRateLimiter;

#[derive(Debug)]
struct Bucket {
    limiter: DirectRateLimiter,
    last_used: Instant,
}

/// Thread-safe speech throttle using governor.
#[derive(Debug)]
pub struct SpeechThrottle {
    /// Per-player speech limiters.
    limiters: DashMap<PlayerId, Bucket>,
    /// Quota applied to new limiters; `None` when throttling is disabled.
    quota: Option<Quota>,
    /// Time an empty bucket needs to fill back up.
    refill: Duration,
}

impl SpeechThrottle {
    /// Create a throttle from configuration. A zero rate disables it.
    pub fn new(config: &RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.say_burst).unwrap_or(NonZeroU32::MIN);
        let quota = NonZeroU32::new(config.say_rate_per_second)
            .map(|rate| Quota::per_second(rate).allow_burst(burst));
        let refill = match config.say_rate_per_second {
            0 => Duration::ZERO,
            rate => Duration::from_secs_f64(f64::from(burst.get()) / f64::from(rate)),
        };
        Self {
            limiters: DashMap::new(),
            quota,
            refill,
        }
    }

    /// Whether throttling is active.
    pub fn is_enabled(&self) -> bool {
        self.quota.is_some()
    }

    /// Check if a player may speak now (consumes a token).
    ///
    /// Returns `true` if allowed, `false` if rate limited.
    pub fn check(&self, player: PlayerId) -> bool {
        let Some(quota) = self.quota else {
            return true;
        };

        let mut bucket = self.limiters.entry(player).or_insert_with(|| Bucket {
            limiter: GovRateLimiter::direct(quota),
            last_used: Instant::now(),
        });
        bucket.last_used = Instant::now();

        let allowed = bucket.limiter.check().is_ok();
        if !allowed {
            debug!(player = %player, "speech rate limit exceeded");
        }
        allowed
    }

    /// Drop a player's limiter.
    pub fn forget(&self, player: PlayerId) {
        self.limiters.remove(&player);
    }

    /// Drop every limiter that has sat idle long enough to be full again.
    ///
    /// Returns how many were dropped. Call periodically; players who
    /// disconnect without leaving their channels are only reclaimed here.
    pub fn sweep(&self) -> usize {
        let before = self.limiters.len();
        let refill = self.refill;
        self.limiters
            .retain(|_, bucket| bucket.last_used.elapsed() < refill);
        let dropped = before.saturating_sub(self.limiters.len());
        if dropped > 0 {
            debug!(dropped, "swept idle speech limiters");
        }
        dropped
    }

    /// Number of tracked players.
    pub fn tracked(&self) -> usize {
        self.limiters.len()
    }
}

impl Default for SpeechThrottle {
    fn default() -> Self {
        Self::new(&RateLimitConfig::default())
    }
}
