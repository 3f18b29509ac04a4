//! Route Gate Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{spawn_app, VALID_SESSION_COOKIE};

/// Unauthenticated browser navigation redirects to login with the
/// original path preserved
#[tokio::test]
async fn protected_navigation_redirects_to_login() {
    let app = spawn_app();

    let response = app
        .get("/dashboard")
        .add_header("accept", "text/html,application/xhtml+xml")
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/login?redirect=/dashboard"
    );
}

/// The query string of the original request survives the redirect
#[tokio::test]
async fn redirect_preserves_query_string() {
    let app = spawn_app();

    let response = app
        .get("/clients")
        .add_query_param("page", "2")
        .add_header("accept", "text/html")
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/login?redirect=/clients?page=2"
    );
}

/// Non-browser requests to protected paths get a 401, not a redirect
#[tokio::test]
async fn protected_api_request_gets_401() {
    let app = spawn_app();

    let response = app.get("/dashboard").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.maybe_header("location").is_none());
}

/// A valid session passes the gate; unknown paths then 404
#[tokio::test]
async fn authenticated_navigation_passes_gate() {
    let app = spawn_app();

    let response = app
        .get("/dashboard")
        .add_header("cookie", VALID_SESSION_COOKIE)
        .add_header("accept", "text/html")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// The login page never redirects, with or without a session
#[tokio::test]
async fn login_page_is_always_reachable() {
    let app = spawn_app();

    let without = app.get("/login").add_header("accept", "text/html").await;
    assert_eq!(without.status_code(), StatusCode::OK);

    let with = app
        .get("/login")
        .add_header("cookie", VALID_SESSION_COOKIE)
        .add_header("accept", "text/html")
        .await;
    assert_eq!(with.status_code(), StatusCode::OK);
}

/// Public paths bypass the gate regardless of cookie state
#[tokio::test]
async fn public_paths_never_redirect() {
    let app = spawn_app();

    for path in ["/health", "/health/ready", "/metrics", "/api/admin/me"] {
        let response = app.get(path).add_header("accept", "text/html").await;
        assert_ne!(
            response.status_code(),
            StatusCode::SEE_OTHER,
            "{path} must not redirect"
        );
    }
}

/// The WebSocket endpoint is gated: a plain unauthenticated GET is refused
#[tokio::test]
async fn ws_endpoint_requires_session() {
    let app = spawn_app();

    let response = app.get("/ws").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// Security headers are present on every response
#[tokio::test]
async fn responses_carry_security_headers() {
    let app = spawn_app();

    let response = app.get("/health").await;

    assert_eq!(
        response.header("x-content-type-options").to_str().unwrap(),
        "nosniff"
    );
    assert_eq!(response.header("x-frame-options").to_str().unwrap(), "DENY");
}

/// Unauthorized API responses use the structured error body
#[tokio::test]
async fn unauthorized_body_is_structured() {
    let app = spawn_app();

    let response = app.get("/dashboard").await;
    let body: Value = response.json();
    assert_eq!(body["code"], 10003);
    assert!(body["message"].as_str().unwrap().contains("Session"));
}
