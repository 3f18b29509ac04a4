//! Realtime Event Feed Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{spawn_app, VALID_SESSION_COOKIE};

/// The event feed requires a session
#[tokio::test]
async fn events_require_session() {
    let app = spawn_app();

    let response = app.get("/api/admin/events").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// A fresh server has an empty event window
#[tokio::test]
async fn events_start_empty() {
    let app = spawn_app();

    let response = app
        .get("/api/admin/events")
        .add_header("cookie", VALID_SESSION_COOKIE)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["events"], json!([]));
}

/// Failed logins surface as security alerts, in arrival order
#[tokio::test]
async fn failed_logins_appear_as_security_alerts() {
    let app = spawn_app();

    for username in ["mallory", "trudy"] {
        let response = app
            .post("/api/admin/login")
            .json(&json!({"username": username, "password": "guess"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    let response = app
        .get("/api/admin/events")
        .add_header("cookie", VALID_SESSION_COOKIE)
        .await;

    let body: Value = response.json();
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);

    assert_eq!(events[0]["channel"], "security_alerts");
    assert_eq!(events[0]["payload"]["kind"], "admin_login_failed");
    assert_eq!(events[0]["payload"]["username"], "mallory");
    assert_eq!(events[1]["payload"]["username"], "trudy");
    assert!(events[0].get("timestamp").is_some());
}
