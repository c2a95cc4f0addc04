//! Per-client fixed-window rate limiting

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::{
    error::{ApiError, ApiResult},
    extract::ClientIp,
    state::AppState,
};

const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter keyed by client address
#[derive(Debug)]
pub struct RateLimiter {
    permits: u32,
    window: Duration,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    /// Allow `permits` requests per `window` for each client
    pub fn new(permits: u32, window: Duration) -> Self {
        Self {
            permits,
            window,
            windows: DashMap::new(),
        }
    }

    /// Count a request from `client`. On rejection returns the seconds until
    /// the current window closes.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), u64> {
        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.permits {
            let remaining = self.window.saturating_sub(elapsed);
            return Err(remaining.as_secs().max(1));
        }
        entry.count += 1;
        Ok(())
    }

    /// Drop windows that have already closed
    pub fn prune(&self) {
        let now = Instant::now();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
    }
}

/// Reject clients that exceeded their window with 429 and `Retry-After`
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if !state.config.rate_limit.enabled {
        return Ok(next.run(request).await);
    }

    let ClientIp(ip) = ClientIp::resolve(
        request.headers(),
        request.extensions(),
        &state.trusted_proxies,
    );
    let client = ip.as_deref().unwrap_or(UNKNOWN_CLIENT);

    if let Err(retry_after_secs) = state.rate_limiter.check(client) {
        tracing::warn!(client = %client, "Rate limit exceeded");
        return Err(ApiError::TooManyRequests {
            message: "Too many requests, slow down".to_string(),
            retry_after_secs,
        });
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_per_client() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at("a", now).is_ok());
        assert!(limiter.check_at("a", now).is_ok());
        assert_eq!(limiter.check_at("a", now), Err(60));
        assert!(limiter.check_at("b", now).is_ok());
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_at("a", start).is_ok());
        assert_eq!(limiter.check_at("a", start + Duration::from_secs(4)), Err(6));
        assert!(limiter.check_at("a", start + Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn test_prune_keeps_open_windows() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        limiter.check("a").unwrap();
        limiter.prune();
        assert_eq!(limiter.windows.len(), 1);
    }
}
