//! Per-IP rate limiting middleware.
//!
//! Fixed window: each client address gets a counter that resets when the
//! window elapses. Excess requests are rejected with 429, never queued.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::clock::Clock;

pub const MAX_REQUESTS_PER_WINDOW: u32 = 100;
pub const WINDOW: Duration = Duration::from_secs(15 * 60);

struct Window {
    started: Instant,
    count: u32,
}

/// Counting state for the rate limiter, one window per client address.
pub struct RateLimiter {
    windows: Mutex<HashMap<IpAddr, Window>>,
    max_requests: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
            clock,
        }
    }

    /// Record one request from `ip`. True if it is within quota.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = self.clock.now();
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let window = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count < self.max_requests {
            window.count += 1;
            true
        } else {
            false
        }
    }
}

/// Middleware function enforcing the per-IP quota.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.check(addr.ip()) {
        next.run(request).await
    } else {
        tracing::warn!(client = %addr.ip(), "rate limit exceeded");
        let mut response = Response::new(Body::from(
            "Too many requests, please try again later.",
        ));
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response
    }
}
