//! Core error types

use thiserror::Error;

use crate::plan::ParsePlanTierError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(
        "Service instance with the given ID already exists: serviceInstanceId={service_instance_id}, serviceDefinitionId={service_definition_id}"
    )]
    ServiceInstanceExists {
        service_instance_id: String,
        service_definition_id: String,
    },

    #[error("{0}")]
    Transport(#[from] caffeine_proxy::ProxyError),

    #[error("Configuration error: {0}")]
    UnknownPlan(#[from] ParsePlanTierError),
}
