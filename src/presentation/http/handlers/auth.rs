//! Authentication Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use validator::Validate;

use crate::application::dto::request::LoginRequest;
use crate::application::dto::response::{
    AckResponse, LoginResponse, MeResponse, SessionResponse,
};
use crate::application::services::{AuthError, SESSION_COOKIE};
use crate::domain::value_objects::Channel;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Login with credentials.
///
/// Sets the session cookie on success. Invalid credentials are a 401 with
/// an inline error message; a body that cannot be parsed at all maps to
/// the generic internal error rather than a client error.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|e| AppError::Internal(format!("Malformed login request: {e}")))?;

    // Presence check only; missing fields can never match configured values
    if body.validate().is_err() {
        return Ok(reject_login(&state, &body.username));
    }

    match state.sessions.login(&body.username, &body.password) {
        Ok(session) => {
            metrics::record_login_attempt(true);
            tracing::info!(username = %session.username, "Admin login");
            Ok((
                [(header::SET_COOKIE, state.sessions.issue_cookie())],
                Json(LoginResponse::success()),
            )
                .into_response())
        }
        Err(AuthError::InvalidCredentials) => Ok(reject_login(&state, &body.username)),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// Build the 401 response for a failed attempt and raise a security alert.
fn reject_login(state: &AppState, username: &str) -> Response {
    metrics::record_login_attempt(false);
    tracing::warn!(username = %username, "Failed admin login attempt");
    state.hub.publish(
        Channel::SecurityAlerts,
        json!({
            "kind": "admin_login_failed",
            "username": username,
        }),
    );
    (
        StatusCode::UNAUTHORIZED,
        Json(LoginResponse::failure("Invalid credentials")),
    )
        .into_response()
}

/// Logout: clear the session cookie.
///
/// Unconditionally succeeds regardless of prior state.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Json(AckResponse::ok()),
    )
}

/// Current session info.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    match state
        .sessions
        .session_from_value(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()))
    {
        Some(session) => Json(MeResponse::authenticated(&session)).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(MeResponse::unauthenticated()),
        )
            .into_response(),
    }
}

/// Re-issue the session cookie with a fresh TTL (idle-timer extend).
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let session = state
        .sessions
        .refresh(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()))
        .map_err(|_| AppError::Unauthorized("Session required".into()))?;

    Ok((
        [(header::SET_COOKIE, state.sessions.issue_cookie())],
        Json(SessionResponse {
            ok: true,
            expires_in: session.expires_in_secs(),
        }),
    )
        .into_response())
}

/// Minimal login document; the panel front-end owns the real page.
/// This route exists as the gate's redirect target and is never gated itself.
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\
         <html><head><title>VIW Admin</title></head>\
         <body><h1>VIW Admin Login</h1>\
         <p>Sign in via POST /api/admin/login</p></body></html>",
    )
}
