//! # VIW Admin Server
//!
//! Backend for the VIW VPN administrative panel.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Session manager and realtime hub
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use viw_admin::config::Settings;
use viw_admin::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    viw_admin::telemetry::init_tracing();

    info!("Starting VIW Admin Server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
