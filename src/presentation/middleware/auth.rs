//! Route Gate Middleware
//!
//! Session-cookie validation middleware applied to every inbound request.
//! Public paths bypass the check unconditionally; unauthenticated browser
//! navigations are redirected to the login page with the originally
//! requested path preserved, and non-browser requests receive a 401.

use axum::{
    extract::{Request, State},
    http::header::ACCEPT,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::application::services::SESSION_COOKIE;
use crate::presentation::http::extractors::CurrentAdmin;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Path prefixes serving static assets; never gated.
const STATIC_PREFIXES: [&str; 2] = ["/assets/", "/static/"];

/// Check whether a path bypasses the session gate.
///
/// The allow-list covers the login page, the admin auth API (each endpoint
/// enforces its own 401), static assets, and operational endpoints.
pub fn is_public_path(path: &str) -> bool {
    path == "/login"
        || path.starts_with("/api/admin/")
        || path == "/favicon.ico"
        || path == "/health"
        || path.starts_with("/health/")
        || path == "/metrics"
        || STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Whether the request is a browser navigation (redirect on failure)
/// rather than an API call (401 on failure).
fn wants_html(request: &Request) -> bool {
    request
        .headers()
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}

/// Session gate applied to all routes.
pub async fn route_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let session = state
        .sessions
        .session_from_value(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()));

    match session {
        Some(session) => {
            request.extensions_mut().insert(CurrentAdmin(session));
            next.run(request).await
        }
        None if wants_html(&request) => {
            let target = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| request.uri().path().to_string());
            tracing::debug!(path = %target, "Redirecting unauthenticated navigation to login");
            Redirect::to(&format!("/login?redirect={target}")).into_response()
        }
        None => AppError::Unauthorized("Session required".into()).into_response(),
    }
}
