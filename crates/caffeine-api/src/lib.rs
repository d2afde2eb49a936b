//! Caffeine Broker REST API
//!
//! This crate provides the Axum-based HTTP API for the Caffeine Broker,
//! implementing the Open Service Broker API v2 along with health and
//! metrics endpoints.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
