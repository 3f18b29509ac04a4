//! Admin session management.
//!
//! Authenticates the configured administrator and owns the session cookie
//! lifecycle: issue on login, clear on logout, re-issue on refresh.
//!
//! The cookie carries a fixed sentinel value rather than a per-session
//! token; validation is a pure equality check and the principal is the
//! configured username with the fixed `admin` role. The manager is
//! constructed explicitly and held by `AppState` so the mechanism can be
//! swapped for a server-side token store without touching handlers.

use crate::config::Settings;
use crate::domain::entities::AdminSession;

/// Cookie name carrying the admin session.
pub const SESSION_COOKIE: &str = "viw_admin_sess";

/// Expected cookie value for an authenticated session.
pub const SESSION_SENTINEL: &str = "1";

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Validates admin credentials and builds session cookies.
pub struct SessionManager {
    username: String,
    password: String,
    ttl_secs: u64,
    secure_cookies: bool,
}

impl SessionManager {
    /// Create a manager from loaded settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            username: settings.admin.username.clone(),
            password: settings.admin.password.clone(),
            ttl_secs: settings.session.ttl_secs,
            secure_cookies: settings.is_production(),
        }
    }

    /// Session time-to-live in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Authenticate with credentials; exact, case-sensitive match.
    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        if username == self.username && password == self.password {
            Ok(AdminSession::new(&self.username, self.ttl_secs))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Resolve the session asserted by a cookie value, if any.
    pub fn session_from_value(&self, value: Option<&str>) -> Option<AdminSession> {
        match value {
            Some(SESSION_SENTINEL) => Some(AdminSession::new(&self.username, self.ttl_secs)),
            _ => None,
        }
    }

    /// Re-issue the session behind a still-valid cookie (idle-timer extend).
    pub fn refresh(&self, value: Option<&str>) -> Result<AdminSession, AuthError> {
        self.session_from_value(value)
            .ok_or(AuthError::SessionNotFound)
    }

    /// `Set-Cookie` value establishing an authenticated session.
    pub fn issue_cookie(&self) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={SESSION_SENTINEL}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl_secs
        );
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value clearing the session unconditionally.
    pub fn clear_cookie(&self) -> String {
        let mut cookie =
            format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AdminSettings, CorsSettings, RateLimitSettings, ServerSettings, SessionSettings,
        WebSocketSettings,
    };

    fn manager(environment: &str) -> SessionManager {
        SessionManager::new(&Settings {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            admin: AdminSettings {
                username: "admin".into(),
                password: "correct".into(),
            },
            session: SessionSettings {
                ttl_secs: 28800,
                idle_warning_secs: 60,
            },
            rate_limit: RateLimitSettings {
                login_attempts_per_window: 10,
                window_seconds: 60,
            },
            cors: CorsSettings {
                allowed_origins: vec![],
            },
            websocket: WebSocketSettings {
                heartbeat_interval_ms: 45000,
                metrics_interval_secs: 10,
                idle_tick_ms: 1000,
            },
            environment: environment.into(),
        })
    }

    #[test]
    fn login_accepts_exact_match_only() {
        let sessions = manager("development");
        assert!(sessions.login("admin", "correct").is_ok());
        assert!(matches!(
            sessions.login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.login("Admin", "correct"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.login("", ""),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn successful_login_yields_admin_principal() {
        let sessions = manager("development");
        let session = sessions.login("admin", "correct").unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.role.as_str(), "admin");
        assert!(!session.is_expired());
    }

    #[test]
    fn cookie_value_must_match_sentinel() {
        let sessions = manager("development");
        assert!(sessions.session_from_value(Some("1")).is_some());
        assert!(sessions.session_from_value(Some("0")).is_none());
        assert!(sessions.session_from_value(Some("")).is_none());
        assert!(sessions.session_from_value(None).is_none());
    }

    #[test]
    fn issue_cookie_carries_ttl_and_flags() {
        let cookie = manager("development").issue_cookie();
        assert_eq!(
            cookie,
            "viw_admin_sess=1; Path=/; HttpOnly; SameSite=Lax; Max-Age=28800"
        );
    }

    #[test]
    fn production_cookies_are_secure() {
        let cookie = manager("production").issue_cookie();
        assert!(cookie.ends_with("; Secure"));
        assert!(manager("production").clear_cookie().ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_empties_value_and_max_age() {
        let cookie = manager("development").clear_cookie();
        assert_eq!(
            cookie,
            "viw_admin_sess=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }

    #[test]
    fn refresh_requires_valid_cookie() {
        let sessions = manager("development");
        assert!(sessions.refresh(Some("1")).is_ok());
        assert!(matches!(
            sessions.refresh(None),
            Err(AuthError::SessionNotFound)
        ));
    }
}
