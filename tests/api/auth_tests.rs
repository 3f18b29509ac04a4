//! Authentication API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{spawn_app, spawn_app_with, test_settings, TEST_ADMIN, VALID_SESSION_COOKIE};

/// Login with valid credentials sets the session cookie
#[tokio::test]
async fn login_with_valid_credentials_sets_cookie() {
    let app = spawn_app();

    let response = app
        .post("/api/admin/login")
        .json(&json!({
            "username": TEST_ADMIN.username,
            "password": TEST_ADMIN.password,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["ok"], true);

    let cookie = response
        .maybe_header("set-cookie")
        .expect("login must set the session cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("viw_admin_sess=1;"), "got: {cookie}");
    assert!(cookie.contains("Max-Age=28800"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    // Not production: no Secure flag
    assert!(!cookie.contains("Secure"));
}

/// Login with a wrong password fails with 401 and no cookie change
#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = spawn_app();

    let response = app
        .post("/api/admin/login")
        .json(&json!({
            "username": TEST_ADMIN.username,
            "password": "wrong",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(response.maybe_header("set-cookie").is_none());
}

/// Username comparison is case-sensitive
#[tokio::test]
async fn login_username_is_case_sensitive() {
    let app = spawn_app();

    let response = app
        .post("/api/admin/login")
        .json(&json!({
            "username": "Admin",
            "password": TEST_ADMIN.password,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// Empty credentials are invalid credentials, not a validation error
#[tokio::test]
async fn login_with_empty_credentials_fails_as_unauthorized() {
    let app = spawn_app();

    let response = app
        .post("/api/admin/login")
        .json(&json!({"username": "", "password": ""}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid credentials");
}

/// A body that cannot be parsed maps to the generic internal error
#[tokio::test]
async fn login_with_malformed_body_is_internal_error() {
    let app = spawn_app();

    let response = app.post("/api/admin/login").text("not json at all").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// Logout clears the cookie and always succeeds
#[tokio::test]
async fn logout_clears_cookie_unconditionally() {
    let app = spawn_app();

    // No prior session at all
    let response = app.post("/api/admin/logout").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["ok"], true);

    let cookie = response
        .maybe_header("set-cookie")
        .expect("logout must clear the session cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("viw_admin_sess=;"), "got: {cookie}");
    assert!(cookie.contains("Max-Age=0"));
}

/// Me reports the static principal for a valid session
#[tokio::test]
async fn me_reports_authenticated_principal() {
    let app = spawn_app();

    let response = app
        .get("/api/admin/me")
        .add_header("cookie", VALID_SESSION_COOKIE)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
}

/// Me without a session is a 401
#[tokio::test]
async fn me_without_session_is_unauthenticated() {
    let app = spawn_app();

    let response = app.get("/api/admin/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["authenticated"], false);
    assert!(body.get("user").is_none());
}

/// A cookie with the wrong value is not a session
#[tokio::test]
async fn me_rejects_non_sentinel_cookie() {
    let app = spawn_app();

    let response = app
        .get("/api/admin/me")
        .add_header("cookie", "viw_admin_sess=0")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// Login then me through the issued cookie
#[tokio::test]
async fn login_then_me_round_trip() {
    let app = spawn_app();

    let login = app
        .post("/api/admin/login")
        .json(&json!({
            "username": TEST_ADMIN.username,
            "password": TEST_ADMIN.password,
        }))
        .await;
    let set_cookie = login.maybe_header("set-cookie").unwrap();
    // First attribute pair is the cookie itself
    let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_string();

    let me = app.get("/api/admin/me").add_header("cookie", pair).await;
    assert_eq!(me.status_code(), StatusCode::OK);
    let body: Value = me.json();
    assert_eq!(body["authenticated"], true);
}

/// Refresh re-issues the cookie with a full TTL
#[tokio::test]
async fn refresh_reissues_cookie() {
    let app = spawn_app();

    let response = app
        .post("/api/admin/refresh")
        .add_header("cookie", VALID_SESSION_COOKIE)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert!(body["expires_in"].as_u64().unwrap() > 28700);

    let cookie = response.maybe_header("set-cookie").unwrap();
    assert!(cookie.to_str().unwrap().contains("Max-Age=28800"));
}

/// Refresh without a valid session is a 401
#[tokio::test]
async fn refresh_without_session_fails() {
    let app = spawn_app();

    let response = app.post("/api/admin/refresh").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.maybe_header("set-cookie").is_none());
}

/// Login attempts beyond the window limit are rejected with 429
#[tokio::test]
async fn login_is_rate_limited() {
    let mut settings = test_settings();
    settings.rate_limit.login_attempts_per_window = 2;
    let app = spawn_app_with(settings);

    for _ in 0..2 {
        let response = app
            .post("/api/admin/login")
            .json(&json!({"username": "admin", "password": "wrong"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    let response = app
        .post("/api/admin/login")
        .json(&json!({"username": "admin", "password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.maybe_header("retry-after").is_some());
}
