//! Fixed-window per-client-IP rate limiting for the API routes.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use dashmap::DashMap;
use serde_json::json;

use crate::state::AppState;

struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per client address over a fixed window. When the window
/// expires the counter resets; there is no sliding behavior.
pub struct RateLimiter {
    windows: DashMap<IpAddr, Window>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    /// Record one request from `ip`. Returns false when over the ceiling.
    pub fn check(&self, ip: IpAddr) -> bool {
        let mut entry = self.windows.entry(ip).or_insert_with(|| Window {
            started: Instant::now(),
            count: 0,
        });
        if entry.started.elapsed() >= self.window {
            entry.started = Instant::now();
            entry.count = 0;
        }
        entry.count += 1;
        entry.count <= self.max_requests
    }
}

/// Middleware enforcing the limiter on every request it wraps.
pub async fn enforce(State(state): State<AppState>, req: Request, next: Next) -> Response {
    // Requests served without connect info (tests, unix sockets) all share
    // the loopback bucket.
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if state.limiter.check(ip) {
        next.run(req).await
    } else {
        tracing::warn!(%ip, "rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests, please try again later." })),
        )
            .into_response()
    }
}
