//! Admin session entity.
//!
//! A session is asserted by the browser-held cookie; this entity is the
//! server-side view of it for the duration of one request or one WebSocket
//! connection. The principal is static: the configured admin username with
//! the fixed `admin` role.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Role of an authenticated principal.
///
/// The panel has a single administrative role today; the enum keeps the
/// wire format stable if operator tiers are added later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
}

impl AdminRole {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated administrator session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Username of the authenticated principal
    pub username: String,

    /// Role of the authenticated principal
    pub role: AdminRole,

    /// When this session was issued
    pub issued_at: DateTime<Utc>,

    /// When this session expires (cookie max-age reaching zero)
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Create a session for the given principal with a fresh TTL.
    pub fn new(username: impl Into<String>, ttl_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            role: AdminRole::Admin,
            issued_at: now,
            expires_at: now + Duration::seconds(ttl_secs as i64),
        }
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Seconds until this session expires (zero if already expired).
    pub fn expires_in_secs(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }

    /// Extend the session by a fresh TTL from now.
    pub fn extend(&mut self, ttl_secs: u64) {
        self.expires_at = Utc::now() + Duration::seconds(ttl_secs as i64);
    }
}
