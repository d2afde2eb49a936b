//! Service instance bindings

use caffeine_proxy::CaffeineClient;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::CoreError;
use crate::model::{
    CreateServiceInstanceBindingRequest, CreateServiceInstanceBindingResponse,
    DeleteServiceInstanceBindingRequest,
};

/// Issues and revokes backend credentials for service instances
pub struct ServiceInstanceBindingService {
    client: Arc<CaffeineClient>,
}

impl ServiceInstanceBindingService {
    pub fn new(client: Arc<CaffeineClient>) -> Self {
        Self { client }
    }

    /// Issue credentials named after the binding id
    ///
    /// The returned credentials are the backend's, plus a `uri` pointing at
    /// the instance's cache.
    pub async fn create_service_instance_binding(
        &self,
        request: &CreateServiceInstanceBindingRequest,
    ) -> Result<CreateServiceInstanceBindingResponse, CoreError> {
        info!(
            "Creating binding {} for service instance {} (app: {})",
            request.binding_id,
            request.service_instance_id,
            request.app_guid.as_deref().unwrap_or("-")
        );

        let mut credentials = self
            .client
            .create_credentials(&request.service_instance_id, &request.binding_id)
            .await
            .map_err(|e| {
                error!(
                    status = ?e.status(),
                    "Cannot create binding {} for service instance {}: {}",
                    request.binding_id,
                    request.service_instance_id,
                    e
                );
                e
            })?;

        credentials.insert(
            "uri".to_string(),
            Value::String(self.client.cache_uri(&request.service_instance_id)),
        );

        Ok(CreateServiceInstanceBindingResponse { credentials })
    }

    /// Revoke the credentials issued for a binding
    pub async fn delete_service_instance_binding(
        &self,
        request: &DeleteServiceInstanceBindingRequest,
    ) -> Result<(), CoreError> {
        info!(
            "Deleting binding {} of service instance {}",
            request.binding_id, request.service_instance_id
        );

        self.client
            .delete_credentials(&request.service_instance_id, &request.binding_id)
            .await
            .map_err(|e| {
                error!(
                    status = ?e.status(),
                    "Cannot delete binding {} of service instance {}: {}",
                    request.binding_id,
                    request.service_instance_id,
                    e
                );
                e
            })?;

        Ok(())
    }
}
