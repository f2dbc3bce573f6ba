//! Per-route request quotas.
//!
//! Fixed-window counters keyed by (route, client address), held in
//! process memory. Quotas are transport policy applied before a request
//! reaches the engine; the engine itself never sees a rate-limited call.

use maitred_core::{Error, Result};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Login attempts per client address per minute.
pub const LOGIN_QUOTA: Quota = Quota {
    max: 10,
    window: Duration::from_secs(60),
};

/// Reservation creations per client address per minute.
pub const CREATE_QUOTA: Quota = Quota {
    max: 5,
    window: Duration::from_secs(60),
};

/// Subscriptions per client address per minute.
pub const SUBSCRIBE_QUOTA: Quota = Quota {
    max: 5,
    window: Duration::from_secs(60),
};

/// Windows older than this are pruned opportunistically.
const PRUNE_HORIZON: Duration = Duration::from_secs(120);

/// A request quota: at most `max` requests per `window`.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    /// Maximum requests allowed inside one window.
    pub max: u32,

    /// Window length.
    pub window: Duration,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// In-memory fixed-window rate limiter.
#[derive(Debug, Default)]
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    /// Create an empty limiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the quota for one (route, client) pair and record the
    /// request when allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyRequests`] when the window is full; the
    /// rejected request is not recorded.
    pub fn check_and_record(&self, route: &str, client: IpAddr, quota: Quota) -> Result<()> {
        let key = format!("{route}:{client}");
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        windows.retain(|_, window| now.duration_since(window.started) < PRUNE_HORIZON);

        let window = windows.entry(key).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= quota.window {
            window.started = now;
            window.count = 0;
        }
        if window.count >= quota.max {
            return Err(Error::TooManyRequests);
        }
        window.count += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1));
    const OTHER: IpAddr = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7));

    #[test]
    fn allows_up_to_the_quota_then_rejects() {
        let limiter = FixedWindowLimiter::new();
        let quota = Quota {
            max: 3,
            window: Duration::from_secs(60),
        };
        for _ in 0..3 {
            limiter.check_and_record("login", CLIENT, quota).unwrap();
        }
        let err = limiter.check_and_record("login", CLIENT, quota).unwrap_err();
        assert_eq!(err, Error::TooManyRequests);
    }

    #[test]
    fn routes_and_clients_are_independent() {
        let limiter = FixedWindowLimiter::new();
        let quota = Quota {
            max: 1,
            window: Duration::from_secs(60),
        };
        limiter.check_and_record("login", CLIENT, quota).unwrap();
        // Different route, same client: its own window.
        limiter.check_and_record("subscribe", CLIENT, quota).unwrap();
        // Same route, different client: its own window.
        limiter.check_and_record("login", OTHER, quota).unwrap();
        // The original pair is now full.
        assert!(limiter.check_and_record("login", CLIENT, quota).is_err());
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let limiter = FixedWindowLimiter::new();
        let quota = Quota {
            max: 1,
            window: Duration::from_millis(20),
        };
        limiter.check_and_record("login", CLIENT, quota).unwrap();
        assert!(limiter.check_and_record("login", CLIENT, quota).is_err());
        std::thread::sleep(Duration::from_millis(30));
        limiter.check_and_record("login", CLIENT, quota).unwrap();
    }
}
