//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

use crate::application::services::SessionManager;
use crate::config::Settings;
use crate::domain::value_objects::Channel;
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging, LoginRateLimiter};
use crate::presentation::websocket::Hub;

/// Application state shared across handlers
///
/// The session manager and hub are constructed here with the application
/// and torn down with it; handlers receive them by reference through this
/// state object rather than through globals.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    pub hub: Arc<Hub>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    /// Build the shared state from settings.
    pub fn build(settings: Settings) -> Self {
        let sessions = Arc::new(SessionManager::new(&settings));
        let hub = Arc::new(Hub::new());
        let login_limiter = Arc::new(LoginRateLimiter::new(&settings.rate_limit));

        Self {
            settings: Arc::new(settings),
            sessions,
            hub,
            login_limiter,
        }
    }
}

/// Build the full router with middleware for the given state.
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let state = AppState::build(settings);
        tracing::info!("Session manager and realtime hub created");

        // Periodic system metrics published to the dashboard
        spawn_metrics_sampler(&state);

        // Build router with middleware
        let router = build_router(state.clone());

        // Bind to address
        let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.server.port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Publish `system_metrics` events on a fixed interval.
fn spawn_metrics_sampler(state: &AppState) {
    let hub = state.hub.clone();
    let interval_secs = state.settings.websocket.metrics_interval_secs;

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.tick().await; // Skip first immediate tick
        loop {
            ticker.tick().await;
            hub.publish(
                Channel::SystemMetrics,
                json!({
                    "active_connections": hub.session_count(),
                    "uptime_secs": health::uptime_secs(),
                }),
            );
        }
    });
}
