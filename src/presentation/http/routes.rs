//! Route Configuration
//!
//! Configures all HTTP routes for the admin panel backend.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::logging;
use crate::presentation::middleware::{
    create_security_headers_layer, rate_limit_login, route_gate,
};
use crate::presentation::websocket::ws_handler;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Admin auth API (public-listed; each endpoint enforces its own 401)
        .merge(auth_routes(state.clone()))
        // Recent realtime events for dashboard catch-up
        .route("/api/admin/events", get(handlers::events::recent_events))
        // Login page: the gate's redirect target
        .route("/login", get(handlers::auth::login_page))
        // WebSocket endpoint (session-gated upgrade)
        .route("/ws", get(ws_handler))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Panel paths are served by the front-end; everything unknown is gated
        // then answered 404 for authenticated clients
        .fallback(not_found)
        // Session gate over every route; public paths bypass inside
        .layer(middleware::from_fn_with_state(state.clone(), route_gate))
        // HTTP request accounting
        .layer(middleware::from_fn(logging::track_http_metrics))
        // Apply security headers globally to all responses
        // This layer runs last (outermost) so headers are added to all responses
        .layer(create_security_headers_layer())
        .with_state(state)
}

/// Authentication routes (login carries its own stricter rate limiting)
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(handlers::auth::login))
        .route_layer(middleware::from_fn_with_state(
            state,
            rate_limit_login,
        ))
        .route("/api/admin/logout", post(handlers::auth::logout))
        .route("/api/admin/me", get(handlers::auth::me))
        .route("/api/admin/refresh", post(handlers::auth::refresh))
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Fallback for authenticated requests to unknown paths
async fn not_found() -> AppError {
    AppError::NotFound("No such route".into())
}
