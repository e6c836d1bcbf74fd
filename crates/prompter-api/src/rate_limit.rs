//! Per-client sliding-window rate limiting.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use prompter_config::LimitsConfig;
use tracing::{debug, warn};

use crate::error::RelayError;
use crate::state::AppState;

const RATE_LIMIT_LIMIT: &str = "ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "ratelimit-reset";

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: usize,
    pub remaining: usize,
    /// Time until the oldest counted request leaves the window.
    pub reset_after: Duration,
}

impl RateDecision {
    /// Write the `RateLimit-*` headers.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(self.remaining));
        headers.insert(
            RATE_LIMIT_RESET,
            HeaderValue::from(self.reset_after.as_secs_f64().ceil() as u64),
        );
    }
}

/// Sliding-window limiter keyed by client address.
///
/// Each key keeps the instants of its admitted requests; instants older than
/// the window are dropped on every check. Rejected requests are not recorded.
/// Keys with no request inside the window are swept at most once per window.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: DashMap<String, VecDeque<Instant>>,
    last_sweep: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    pub fn from_config(limits: &LimitsConfig) -> Self {
        Self::new(
            limits.rate_limit_max,
            Duration::from_secs(limits.rate_limit_window_seconds),
        )
    }

    /// Admit or reject one request from `key`.
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        self.sweep_if_due(now);

        let mut entry = self.hits.entry(key.to_string()).or_default();
        let hits = entry.value_mut();

        while let Some(&front) = hits.front() {
            if now.duration_since(front) >= self.window {
                hits.pop_front();
            } else {
                break;
            }
        }

        let allowed = hits.len() < self.max_requests;
        if allowed {
            hits.push_back(now);
        }

        let reset_after = hits
            .front()
            .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
            .unwrap_or(self.window);

        RateDecision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(hits.len()),
            reset_after,
        }
    }

    /// Drop idle keys once a full window has passed since the last sweep.
    /// Must not run while an entry guard is held.
    fn sweep_if_due(&self, now: Instant) {
        // Another caller holding the lock is already sweeping.
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if now.saturating_duration_since(*last_sweep) < self.window {
            return;
        }
        *last_sweep = now;

        let before = self.hits.len();
        self.hits.retain(|_, hits| {
            hits.back()
                .is_some_and(|last| now.saturating_duration_since(*last) < self.window)
        });
        debug!(
            "Rate limiter swept {} idle client(s)",
            before.saturating_sub(self.hits.len())
        );
    }

    /// Number of keys currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}

/// Client address from the connection info, or `"unknown"` when the router
/// is driven without a socket (tests, embedding).
fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware applying [`RateLimiter`] to every route.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    let decision = state.rate_limiter.check(&key);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        warn!("Rate limit exceeded for {}", key);
        RelayError::RateLimited.into_response()
    };

    decision.apply_headers(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check_at("1.2.3.4", now);
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let decision = limiter.check_at("1.2.3.4", now);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.limit, 3);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        let start = Instant::now();

        assert!(limiter.check_at("ip", start).allowed);
        assert!(limiter.check_at("ip", start + Duration::from_secs(5)).allowed);
        assert!(!limiter.check_at("ip", start + Duration::from_secs(9)).allowed);

        // First hit has aged out; the second still counts.
        let decision = limiter.check_at("ip", start + Duration::from_secs(10));
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.reset_after, Duration::from_secs(5));
    }

    #[test]
    fn test_idle_clients_are_dropped_after_window() {
        let limiter = RateLimiter::new(100, Duration::from_secs(900));
        let start = Instant::now();

        for n in 0..10_000 {
            limiter.check_at(&format!("10.0.{}.{}", n / 256, n % 256), start);
        }
        assert_eq!(limiter.tracked_clients(), 10_000);

        let decision = limiter.check_at("192.168.1.1", start + Duration::from_secs(3600));
        assert!(decision.allowed);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_active_clients_survive_sweep() {
        let limiter = RateLimiter::new(5, Duration::from_secs(10));
        let start = Instant::now();

        limiter.check_at("idle", start);
        limiter.check_at("busy", start);
        limiter.check_at("busy", start + Duration::from_secs(8));

        let decision = limiter.check_at("busy", start + Duration::from_secs(12));
        assert_eq!(limiter.tracked_clients(), 1);
        // The hit at +8s is still counted.
        assert_eq!(decision.remaining, 3);
    }

    #[test]
    fn test_apply_headers() {
        let decision = RateDecision {
            allowed: true,
            limit: 100,
            remaining: 42,
            reset_after: Duration::from_millis(1500),
        };
        let mut headers = HeaderMap::new();
        decision.apply_headers(&mut headers);

        assert_eq!(headers["ratelimit-limit"], "100");
        assert_eq!(headers["ratelimit-remaining"], "42");
        assert_eq!(headers["ratelimit-reset"], "2");
    }
}
