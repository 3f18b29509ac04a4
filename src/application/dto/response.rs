//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::entities::{AdminSession, EventRecord};

/// Login outcome response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Generic acknowledgement response
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Authenticated principal as exposed over the API
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub username: String,
    pub role: String,
}

impl From<&AdminSession> for AdminUserResponse {
    fn from(session: &AdminSession) -> Self {
        Self {
            username: session.username.clone(),
            role: session.role.as_str().to_string(),
        }
    }
}

/// Current session response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AdminUserResponse>,
}

impl MeResponse {
    pub fn authenticated(session: &AdminSession) -> Self {
        Self {
            authenticated: true,
            user: Some(session.into()),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

/// Session refresh response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    /// Seconds until the re-issued session expires
    pub expires_in: u64,
}

/// Recent realtime events response
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventRecord>,
}
