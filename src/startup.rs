//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    CountriesService, CountriesServiceImpl, PersonsService, PersonsServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    InMemoryCountriesRepository, InMemoryPersonsRepository, PgCountriesRepository,
    PgPersonsRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub persons: Arc<dyn PersonsService>,
    pub countries: Arc<dyn CountriesService>,
    /// Present only for the PostgreSQL backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by PostgreSQL repositories
    pub fn with_postgres(db: PgPool, settings: Settings) -> Self {
        let country_repo = Arc::new(PgCountriesRepository::new(db.clone()));
        let person_repo = Arc::new(PgPersonsRepository::new(db.clone()));

        Self {
            persons: Arc::new(PersonsServiceImpl::new(person_repo)),
            countries: Arc::new(CountriesServiceImpl::new(country_repo)),
            db: Some(db),
            settings: Arc::new(settings),
        }
    }

    /// State backed by process-local repositories, starting empty
    pub fn in_memory(settings: Settings) -> Self {
        let country_repo = Arc::new(InMemoryCountriesRepository::new());
        let person_repo = Arc::new(InMemoryPersonsRepository::new(country_repo.clone()));

        Self {
            persons: Arc::new(PersonsServiceImpl::new(person_repo)),
            countries: Arc::new(CountriesServiceImpl::new(country_repo)),
            db: None,
            settings: Arc::new(settings),
        }
    }
}

/// Router with every middleware layer applied
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.settings.server.max_upload_bytes;
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    // Applied innermost-first so CORS stays outermost; each Router::layer
    // re-boxes the response body, which CORS requires to be `Default`.
    routes::create_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
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
        handlers::health::init_server_start();

        let state = match settings.storage.backend {
            StorageBackend::Postgres => {
                let url = settings
                    .database
                    .url
                    .clone()
                    .context("database.url is required for the postgres backend")?;
                let db = database::create_pool(&settings.database, &url).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&db).await?;
                    tracing::info!("Database migrations applied");
                }

                AppState::with_postgres(db, settings.clone())
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; records are lost on shutdown");
                AppState::in_memory(settings.clone())
            }
        };

        let router = build_router(state);

        let addr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, backend = %settings.storage.backend, "Listening");

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
