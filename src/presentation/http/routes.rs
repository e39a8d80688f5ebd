//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::persons::index))
        .merge(person_routes())
        .merge(country_routes())
        // Count every matched request; health and metrics stay out of the numbers
        .route_layer(middleware::from_fn(track_metrics))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Person routes
fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/persons/index", get(handlers::persons::index))
        .route(
            "/persons/create",
            get(handlers::persons::create_form).post(handlers::persons::create),
        )
        .route(
            "/persons/edit/{person_id}",
            get(handlers::persons::edit_form).post(handlers::persons::edit),
        )
        .route(
            "/persons/delete/{person_id}",
            get(handlers::persons::delete_form).post(handlers::persons::delete),
        )
        .route("/persons/persons-pdf", get(handlers::persons::persons_pdf))
        .route("/persons/persons-csv", get(handlers::persons::persons_csv))
        .route("/persons/persons-excel", get(handlers::persons::persons_excel))
}

/// Country routes
fn country_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/countries",
            get(handlers::countries::list).post(handlers::countries::create),
        )
        .route("/countries/{country_id}", get(handlers::countries::get))
        .route(
            "/countries/upload-from-excel-file",
            post(handlers::countries::upload_from_excel_file),
        )
}
