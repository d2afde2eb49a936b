//! Caffeine Broker Core Business Logic
//!
//! This crate provides the service catalog, the plan tiers it offers, and
//! the instance and binding services that translate broker operations into
//! calls against the backend cache-management API.

pub mod binding;
pub mod catalog;
pub mod error;
pub mod instance;
pub mod model;
pub mod plan;

#[cfg(test)]
mod test_support;

pub use binding::ServiceInstanceBindingService;
pub use catalog::{
    Catalog, Cost, Plan, PlanMetadata, SERVICE_DEFINITION_ID, ServiceDefinition, ServiceMetadata,
};
pub use error::CoreError;
pub use instance::ServiceInstanceService;
pub use model::*;
pub use plan::{ParsePlanTierError, PlanTier, TierLimits};
