//! Broker API request types

use serde::Deserialize;

/// PUT /v2/service_instances/{instance_id} body
#[derive(Debug, Deserialize)]
pub struct ProvisionRequest {
    pub service_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub organization_guid: Option<String>,
    #[serde(default)]
    pub space_guid: Option<String>,
}

/// PATCH /v2/service_instances/{instance_id} body
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub service_id: String,
    #[serde(default)]
    pub plan_id: Option<String>,
}

/// Query parameters shared by deprovision and unbind
#[derive(Debug, Deserialize, Default)]
pub struct DeleteQuery {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
}

/// GET /v2/service_instances/{instance_id}/last_operation query
#[derive(Debug, Deserialize, Default)]
pub struct LastOperationQuery {
    #[serde(default)]
    pub operation: Option<String>,
}

/// PUT /v2/service_instances/{instance_id}/service_bindings/{binding_id} body
#[derive(Debug, Deserialize)]
pub struct BindRequest {
    pub service_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub app_guid: Option<String>,
    #[serde(default)]
    pub bind_resource: Option<BindResource>,
}

#[derive(Debug, Deserialize)]
pub struct BindResource {
    #[serde(default)]
    pub app_guid: Option<String>,
}

impl BindRequest {
    /// Application being bound; `bind_resource` takes precedence over the
    /// deprecated top-level field
    pub fn app_guid(&self) -> Option<String> {
        self.bind_resource
            .as_ref()
            .and_then(|r| r.app_guid.clone())
            .or_else(|| self.app_guid.clone())
    }
}
