//! Service binding routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::put,
};
use caffeine_core::{
    CreateServiceInstanceBindingRequest, CreateServiceInstanceBindingResponse,
    DeleteServiceInstanceBindingRequest,
};
use serde_json::{Value, json};
use tracing::debug;

use super::types::{BindRequest, DeleteQuery};
use super::{ensure_service_definition, record_operation};
use crate::error::ApiError;
use crate::state::AppState;

/// PUT /v2/service_instances/{instance_id}/service_bindings/{binding_id}
async fn bind(
    State(state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    Json(body): Json<BindRequest>,
) -> Result<(StatusCode, Json<CreateServiceInstanceBindingResponse>), ApiError> {
    debug!("PUT binding: {}/{}", instance_id, binding_id);

    let result = create_binding(&state, instance_id, binding_id, body).await;
    record_operation("bind", result.is_ok());

    Ok((StatusCode::CREATED, Json(result?)))
}

async fn create_binding(
    state: &AppState,
    instance_id: String,
    binding_id: String,
    body: BindRequest,
) -> Result<CreateServiceInstanceBindingResponse, ApiError> {
    ensure_service_definition(state, &body.service_id)?;

    let request = CreateServiceInstanceBindingRequest {
        service_instance_id: instance_id,
        binding_id,
        app_guid: body.app_guid(),
        service_definition_id: body.service_id,
        plan_id: body.plan_id,
    };

    Ok(state.bindings.create_service_instance_binding(&request).await?)
}

/// DELETE /v2/service_instances/{instance_id}/service_bindings/{binding_id}
async fn unbind(
    State(state): State<AppState>,
    Path((instance_id, binding_id)): Path<(String, String)>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    debug!("DELETE binding: {}/{}", instance_id, binding_id);

    let request = DeleteServiceInstanceBindingRequest {
        service_instance_id: instance_id,
        binding_id,
        service_definition_id: query.service_id,
        plan_id: query.plan_id,
    };

    let result = state.bindings.delete_service_instance_binding(&request).await;
    record_operation("unbind", result.is_ok());
    result?;

    Ok(Json(json!({})))
}

/// Create service binding routes
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
        put(bind).delete(unbind),
    )
}
