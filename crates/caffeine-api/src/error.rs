//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use caffeine_core::CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Service definition does not exist: id={0}")]
    ServiceDefinitionDoesNotExist(String),

    #[error("{0}")]
    Core(#[from] CoreError),
}

impl ApiError {
    /// HTTP status reported to the platform
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ServiceDefinitionDoesNotExist(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Core(CoreError::ServiceInstanceExists { .. }) => StatusCode::CONFLICT,
            ApiError::Core(CoreError::Transport(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(CoreError::UnknownPlan(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Core(CoreError::UnknownPlan(e)) = &self {
            error!("Broker misconfigured, plan is not in the catalog: {}", e);
        }

        // Open Service Broker error format
        let body = axum::Json(json!({
            "description": self.to_string()
        }));

        (status, body).into_response()
    }
}
