//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum_test::TestServer;

use viw_admin::config::{
    AdminSettings, CorsSettings, RateLimitSettings, ServerSettings, SessionSettings, Settings,
    WebSocketSettings,
};
use viw_admin::startup::{build_router, AppState};

/// Cookie header value for an authenticated session
pub const VALID_SESSION_COOKIE: &str = "viw_admin_sess=1";

/// Test credentials matching `test_settings`
pub struct TestAdmin {
    pub username: &'static str,
    pub password: &'static str,
}

pub const TEST_ADMIN: TestAdmin = TestAdmin {
    username: "admin",
    password: "correct",
};

/// Settings for in-process test servers.
///
/// The login rate limit is effectively disabled; tests that exercise it
/// build their own settings with a small window.
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        admin: AdminSettings {
            username: TEST_ADMIN.username.into(),
            password: TEST_ADMIN.password.into(),
        },
        session: SessionSettings {
            ttl_secs: 28800,
            idle_warning_secs: 60,
        },
        rate_limit: RateLimitSettings {
            login_attempts_per_window: 1000,
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
        environment: "test".into(),
    }
}

/// Spin up an in-process test server against the real router.
pub fn spawn_app() -> TestServer {
    spawn_app_with(test_settings())
}

/// Spin up a test server with custom settings.
pub fn spawn_app_with(settings: Settings) -> TestServer {
    let state = AppState::build(settings);
    TestServer::new(build_router(state)).expect("Failed to start test server")
}
