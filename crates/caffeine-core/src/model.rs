//! Broker operation requests and responses

use serde::Serialize;
use serde_json::{Map, Value};

/// Request to provision a service instance
#[derive(Debug, Clone)]
pub struct CreateServiceInstanceRequest {
    pub service_instance_id: String,
    pub service_definition_id: String,
    pub plan_id: String,
    pub organization_guid: Option<String>,
    pub space_guid: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServiceInstanceResponse {}

/// Request to change the plan or parameters of a service instance
#[derive(Debug, Clone)]
pub struct UpdateServiceInstanceRequest {
    pub service_instance_id: String,
    pub service_definition_id: String,
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateServiceInstanceResponse {}

/// Request to deprovision a service instance
#[derive(Debug, Clone)]
pub struct DeleteServiceInstanceRequest {
    pub service_instance_id: String,
    pub service_definition_id: Option<String>,
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteServiceInstanceResponse {}

/// Request to poll the state of the last operation on a service instance
#[derive(Debug, Clone)]
pub struct GetLastServiceOperationRequest {
    pub service_instance_id: String,
    pub operation: Option<String>,
}

/// State of an instance operation
///
/// Provisioning completes synchronously, so no operation is ever reported
/// as in progress or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationState {
    #[serde(rename = "succeeded")]
    Succeeded,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetLastServiceOperationResponse {
    pub state: OperationState,
}

/// Request to bind credentials to a service instance
#[derive(Debug, Clone)]
pub struct CreateServiceInstanceBindingRequest {
    pub service_instance_id: String,
    pub binding_id: String,
    pub service_definition_id: String,
    pub plan_id: String,
    pub app_guid: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateServiceInstanceBindingResponse {
    pub credentials: Map<String, Value>,
}

/// Request to unbind credentials from a service instance
#[derive(Debug, Clone)]
pub struct DeleteServiceInstanceBindingRequest {
    pub service_instance_id: String,
    pub binding_id: String,
    pub service_definition_id: Option<String>,
    pub plan_id: Option<String>,
}
