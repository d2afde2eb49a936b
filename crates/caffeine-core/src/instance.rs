//! Service instance lifecycle

use caffeine_proxy::CaffeineClient;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::CoreError;
use crate::model::{
    CreateServiceInstanceRequest, CreateServiceInstanceResponse, DeleteServiceInstanceRequest,
    DeleteServiceInstanceResponse, GetLastServiceOperationRequest,
    GetLastServiceOperationResponse, OperationState, UpdateServiceInstanceRequest,
    UpdateServiceInstanceResponse,
};
use crate::plan::PlanTier;

/// Provisions and deprovisions caches on the backend
///
/// Holds no instance state: existence and uniqueness of an instance are
/// decided by the backend's response.
pub struct ServiceInstanceService {
    client: Arc<CaffeineClient>,
}

impl ServiceInstanceService {
    pub fn new(client: Arc<CaffeineClient>) -> Self {
        Self { client }
    }

    /// Create a cache sized by the requested plan
    ///
    /// An unknown plan id is reported as [`CoreError::UnknownPlan`] before any
    /// backend call. Any backend failure is reported as
    /// [`CoreError::ServiceInstanceExists`].
    pub async fn create_service_instance(
        &self,
        request: &CreateServiceInstanceRequest,
    ) -> Result<CreateServiceInstanceResponse, CoreError> {
        let tier: PlanTier = request.plan_id.parse().map_err(|e| {
            error!(
                "Plan '{}' requested for service instance {} is not offered",
                request.plan_id, request.service_instance_id
            );
            CoreError::UnknownPlan(e)
        })?;
        let limits = tier.limits();

        info!(
            "Creating service instance {} (plan: {}, org: {}, space: {})",
            request.service_instance_id,
            tier.plan_id(),
            request.organization_guid.as_deref().unwrap_or("-"),
            request.space_guid.as_deref().unwrap_or("-")
        );

        if let Err(e) = self
            .client
            .create_cache(
                &request.service_instance_id,
                limits.expire_seconds,
                limits.maximum_size,
            )
            .await
        {
            error!(
                status = ?e.status(),
                "Cannot create service instance {}: {}",
                request.service_instance_id,
                e
            );
            return Err(CoreError::ServiceInstanceExists {
                service_instance_id: request.service_instance_id.clone(),
                service_definition_id: request.service_definition_id.clone(),
            });
        }

        Ok(CreateServiceInstanceResponse::default())
    }

    /// Provisioning is synchronous, so the last operation always succeeded
    pub fn get_last_operation(
        &self,
        request: &GetLastServiceOperationRequest,
    ) -> GetLastServiceOperationResponse {
        debug!(
            "Last operation requested for service instance {} (operation: {:?})",
            request.service_instance_id, request.operation
        );

        GetLastServiceOperationResponse {
            state: OperationState::Succeeded,
        }
    }

    /// Delete the cache backing a service instance
    pub async fn delete_service_instance(
        &self,
        request: &DeleteServiceInstanceRequest,
    ) -> Result<DeleteServiceInstanceResponse, CoreError> {
        info!(
            "Deleting service instance {} (plan: {})",
            request.service_instance_id,
            request.plan_id.as_deref().unwrap_or("-")
        );

        self.client
            .delete_cache(&request.service_instance_id)
            .await
            .map_err(|e| {
                error!(
                    status = ?e.status(),
                    "Cannot delete service instance {}: {}",
                    request.service_instance_id,
                    e
                );
                e
            })?;

        Ok(DeleteServiceInstanceResponse::default())
    }

    /// Plans are not updateable; accepted without touching the backend
    pub fn update_service_instance(
        &self,
        request: &UpdateServiceInstanceRequest,
    ) -> UpdateServiceInstanceResponse {
        debug!(
            "Ignoring update of service instance {} (service: {}, plan: {:?})",
            request.service_instance_id, request.service_definition_id, request.plan_id
        );

        UpdateServiceInstanceResponse::default()
    }
}
