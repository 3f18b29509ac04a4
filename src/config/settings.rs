//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Admin credentials for panel access
    pub admin: AdminSettings,

    /// Session cookie lifecycle settings
    pub session: SessionSettings,

    /// Login rate limiting configuration
    pub rate_limit: RateLimitSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// WebSocket configuration
    pub websocket: WebSocketSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Expected admin credentials.
///
/// A single administrator account is configured through the environment;
/// login compares submitted values against these exactly (case-sensitive).
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    /// Admin username
    pub username: String,

    /// Admin password
    pub password: String,
}

/// Session cookie lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Session time-to-live in seconds (default: 28800 = 8 hours)
    pub ttl_secs: u64,

    /// Idle warning threshold in seconds before expiry (default: 60)
    pub idle_warning_secs: u64,
}

/// Login rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Login attempts allowed per window per client
    pub login_attempts_per_window: u32,

    /// Window duration in seconds
    pub window_seconds: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// WebSocket configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketSettings {
    /// Heartbeat interval in milliseconds (default: 45000)
    pub heartbeat_interval_ms: u64,

    /// Interval between system_metrics publications in seconds (default: 10)
    pub metrics_interval_secs: u64,

    /// Idle check tick interval in milliseconds (default: 1000)
    pub idle_tick_ms: u64,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if admin credentials are missing or empty.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("session.ttl_secs", 28800_i64)?
            .set_default("session.idle_warning_secs", 60_i64)?
            .set_default("rate_limit.login_attempts_per_window", 10_i64)?
            .set_default("rate_limit.window_seconds", 60_i64)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("websocket.heartbeat_interval_ms", 45000_i64)?
            .set_default("websocket.metrics_interval_secs", 10_i64)?
            .set_default("websocket.idle_tick_ms", 1000_i64)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option(
                "server.host",
                std::env::var("SERVER_HOST").ok(),
            )?
            .set_override_option(
                "server.port",
                std::env::var("SERVER_PORT").ok(),
            )?
            .set_override_option(
                "admin.username",
                std::env::var("ADMIN_USERNAME").ok(),
            )?
            .set_override_option(
                "admin.password",
                std::env::var("ADMIN_PASSWORD").ok(),
            )?
            .set_override_option(
                "session.ttl_secs",
                std::env::var("SESSION_TTL_SECS").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                // Credentials must be configured; everything else has defaults
                if settings.admin.username.is_empty() || settings.admin.password.is_empty() {
                    return Err(ConfigError::Message(
                        "Admin credentials must be configured via ADMIN_USERNAME and \
                         ADMIN_PASSWORD (or admin.username / admin.password)"
                            .into(),
                    ));
                }
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether the server runs in production (controls the Secure cookie flag).
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl ServerSettings {
    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid server address configuration")
    }
}
