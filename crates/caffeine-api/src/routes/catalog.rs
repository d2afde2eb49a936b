//! Catalog route

use axum::{Json, Router, extract::State, routing::get};
use caffeine_core::Catalog;

use super::record_operation;
use crate::state::AppState;

/// GET /v2/catalog
async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    record_operation("catalog", true);
    Json(state.catalog.as_ref().clone())
}

/// Create catalog routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/v2/catalog", get(get_catalog))
}
