//! Health check endpoints

use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::BROKER_API_VERSION;
use crate::state::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub broker_api_version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    metrics::counter!("caffeine_broker_health_checks_total").increment(1);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        broker_api_version: BROKER_API_VERSION,
    })
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}
