//! Rate Limiting Middleware
//!
//! In-memory fixed-window rate limiting for the login endpoint, guarding
//! against credential stuffing and brute force attempts. State is held in
//! a per-process map; the admin panel runs as a single instance, so no
//! distributed coordination is required.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use serde::Serialize;
use std::net::IpAddr;

use crate::config::RateLimitSettings;
use crate::shared::error::ErrorResponse;
use crate::startup::AppState;

/// Information about rate limit status returned to clients.
#[derive(Debug, Serialize)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Seconds until the rate limit resets
    pub retry_after: u64,
}

/// Rate limit exceeded error response.
#[derive(Debug, Serialize)]
struct RateLimitExceededResponse {
    #[serde(flatten)]
    error: ErrorResponse,
    rate_limit: RateLimitInfo,
}

/// Per-identifier window state.
#[derive(Debug, Clone, Copy)]
struct WindowState {
    window_start: i64,
    count: u32,
}

/// Fixed-window in-memory rate limiter.
///
/// Each identifier gets a counter that resets when its window elapses.
/// Windows are coarse by design; the goal is bounding brute-force volume,
/// not precise fairness.
pub struct LoginRateLimiter {
    max_requests: u32,
    window_seconds: i64,
    windows: DashMap<String, WindowState>,
}

impl LoginRateLimiter {
    /// Create a limiter from application settings.
    pub fn new(settings: &RateLimitSettings) -> Self {
        Self {
            max_requests: settings.login_attempts_per_window,
            window_seconds: settings.window_seconds as i64,
            windows: DashMap::new(),
        }
    }

    /// Check if a request should be allowed.
    ///
    /// Returns `Ok(RateLimitInfo)` if allowed, `Err(RateLimitInfo)` if rate limited.
    pub fn check(&self, identifier: &str) -> Result<RateLimitInfo, RateLimitInfo> {
        self.check_at(identifier, chrono::Utc::now().timestamp())
    }

    /// Window check against an explicit clock, for deterministic tests.
    fn check_at(&self, identifier: &str, now_secs: i64) -> Result<RateLimitInfo, RateLimitInfo> {
        let mut entry = self
            .windows
            .entry(identifier.to_string())
            .or_insert(WindowState {
                window_start: now_secs,
                count: 0,
            });

        if now_secs - entry.window_start >= self.window_seconds {
            entry.window_start = now_secs;
            entry.count = 0;
        }

        let window_ends = entry.window_start + self.window_seconds;
        if entry.count < self.max_requests {
            entry.count += 1;
            Ok(RateLimitInfo {
                limit: self.max_requests,
                remaining: self.max_requests - entry.count,
                retry_after: 0,
            })
        } else {
            Err(RateLimitInfo {
                limit: self.max_requests,
                remaining: 0,
                retry_after: (window_ends - now_secs).max(0) as u64,
            })
        }
    }
}

/// Extract the rate limit identifier from a request.
///
/// Priority:
/// 1. X-Forwarded-For header (for reverse proxy setups)
/// 2. X-Real-IP header (common with nginx)
/// 3. Client IP address (fallback)
fn extract_identifier(request: &Request, client_ip: Option<IpAddr>) -> String {
    // Try X-Forwarded-For header (first IP in chain is original client)
    if let Some(forwarded_for) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first_ip) = forwarded_for.split(',').next() {
            let ip = first_ip.trim();
            if ip.parse::<IpAddr>().is_ok() {
                return format!("ip:{}", ip);
            }
        }
    }

    // Try X-Real-IP header
    if let Some(real_ip) = request
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
    {
        if real_ip.parse::<IpAddr>().is_ok() {
            return format!("ip:{}", real_ip);
        }
    }

    // Fall back to connection IP
    match client_ip {
        Some(ip) => format!("ip:{}", ip),
        None => "ip:unknown".to_string(),
    }
}

/// Rate limiting middleware for the login endpoint.
pub async fn rate_limit_login(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client_ip = request
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip());
    let identifier = extract_identifier(&request, client_ip);

    match state.login_limiter.check(&identifier) {
        Ok(_) => next.run(request).await,
        Err(info) => {
            tracing::warn!(
                identifier = %identifier,
                "Login rate limit exceeded"
            );
            create_rate_limit_response(info)
        }
    }
}

/// Create a 429 Too Many Requests response.
fn create_rate_limit_response(info: RateLimitInfo) -> Response {
    let retry_after = info.retry_after;
    let body = RateLimitExceededResponse {
        error: ErrorResponse {
            code: 10006,
            message: "Too many login attempts. Please slow down.".to_string(),
        },
        rate_limit: info,
    };

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    // Retry-After is the standard HTTP header for 429 responses
    if let Ok(value) = header::HeaderValue::from_str(&retry_after.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }

    response
}
