//! Service instance routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use caffeine_core::{
    CreateServiceInstanceRequest, CreateServiceInstanceResponse, DeleteServiceInstanceRequest,
    DeleteServiceInstanceResponse, GetLastServiceOperationRequest,
    GetLastServiceOperationResponse, UpdateServiceInstanceRequest, UpdateServiceInstanceResponse,
};
use tracing::debug;

use super::types::{DeleteQuery, LastOperationQuery, ProvisionRequest, UpdateRequest};
use super::{ensure_service_definition, record_operation};
use crate::error::ApiError;
use crate::state::AppState;

// ==================== Provisioning ====================

/// PUT /v2/service_instances/{instance_id}
async fn provision(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    Json(body): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<CreateServiceInstanceResponse>), ApiError> {
    debug!("PUT service instance: {}", instance_id);

    let result = create_instance(&state, instance_id, body).await;
    record_operation("provision", result.is_ok());

    Ok((StatusCode::CREATED, Json(result?)))
}

async fn create_instance(
    state: &AppState,
    instance_id: String,
    body: ProvisionRequest,
) -> Result<CreateServiceInstanceResponse, ApiError> {
    ensure_service_definition(state, &body.service_id)?;

    let request = CreateServiceInstanceRequest {
        service_instance_id: instance_id,
        service_definition_id: body.service_id,
        plan_id: body.plan_id,
        organization_guid: body.organization_guid,
        space_guid: body.space_guid,
    };

    Ok(state.instances.create_service_instance(&request).await?)
}

/// PATCH /v2/service_instances/{instance_id}
async fn update(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    Json(body): Json<UpdateRequest>,
) -> Json<UpdateServiceInstanceResponse> {
    debug!("PATCH service instance: {}", instance_id);

    let response = state
        .instances
        .update_service_instance(&UpdateServiceInstanceRequest {
            service_instance_id: instance_id,
            service_definition_id: body.service_id,
            plan_id: body.plan_id,
        });
    record_operation("update", true);

    Json(response)
}

// ==================== Deprovisioning ====================

/// DELETE /v2/service_instances/{instance_id}
async fn deprovision(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteServiceInstanceResponse>, ApiError> {
    debug!("DELETE service instance: {}", instance_id);

    let request = DeleteServiceInstanceRequest {
        service_instance_id: instance_id,
        service_definition_id: query.service_id,
        plan_id: query.plan_id,
    };

    let result = state.instances.delete_service_instance(&request).await;
    record_operation("deprovision", result.is_ok());

    Ok(Json(result?))
}

// ==================== Last Operation ====================

/// GET /v2/service_instances/{instance_id}/last_operation
async fn last_operation(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(query): Query<LastOperationQuery>,
) -> Json<GetLastServiceOperationResponse> {
    let response = state
        .instances
        .get_last_operation(&GetLastServiceOperationRequest {
            service_instance_id: instance_id,
            operation: query.operation,
        });
    record_operation("last_operation", true);

    Json(response)
}

/// Create service instance routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v2/service_instances/{instance_id}",
            put(provision).patch(update).delete(deprovision),
        )
        .route(
            "/v2/service_instances/{instance_id}/last_operation",
            get(last_operation),
        )
}
