//! # Person Registry
//!
//! Application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage backend (PostgreSQL pool or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use person_registry::config::Settings;
use person_registry::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the log filter is read
    dotenvy::dotenv().ok();

    person_registry::telemetry::init_tracing();

    info!("Starting Person Registry...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        storage = %settings.storage.backend,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
