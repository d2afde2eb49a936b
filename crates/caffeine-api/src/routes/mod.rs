//! API routes

mod bindings;
mod catalog;
mod health;
mod instances;
pub mod metrics;
mod types;

use axum::Router;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::{AppState, MetricsHandle};

/// Open Service Broker API version served by these routes
pub const BROKER_API_VERSION: &str = "2.13";

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        // Open Service Broker API (v2)
        .merge(catalog::routes())
        .merge(instances::routes())
        .merge(bindings::routes())
        .with_state(state);

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}

/// Reject requests for services the catalog does not offer
fn ensure_service_definition(state: &AppState, service_id: &str) -> Result<(), ApiError> {
    match state.catalog.service_definition(service_id) {
        Some(_) => Ok(()),
        None => Err(ApiError::ServiceDefinitionDoesNotExist(service_id.to_string())),
    }
}

/// Count a broker operation by outcome
fn record_operation(operation: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    ::metrics::counter!(
        "caffeine_broker_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
