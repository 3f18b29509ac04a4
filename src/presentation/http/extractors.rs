//! Custom Extractors
//!
//! Axum extractors for session authentication.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::application::services::SESSION_COOKIE;
use crate::domain::entities::AdminSession;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated admin extracted from the session cookie.
///
/// The route gate injects this for protected paths; public `/api/admin/*`
/// handlers extract it directly, so the cookie is validated either way.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminSession);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(admin) = parts.extensions.get::<CurrentAdmin>() {
            return Ok(admin.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        state
            .sessions
            .session_from_value(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()))
            .map(CurrentAdmin)
            .ok_or_else(|| AppError::Unauthorized("Session required".into()))
    }
}
