//! Service catalog
//!
//! The catalog is a pure function of [`PlanTier::ALL`]: one service
//! definition whose plans mirror the tiers, each free of charge.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::plan::PlanTier;

/// Identifier of the single service definition offered by the broker
pub const SERVICE_DEFINITION_ID: &str = "caffeine-broker";

/// Broker catalog
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub services: Vec<ServiceDefinition>,
}

/// Offered service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub bindable: bool,
    pub plan_updateable: bool,
    pub plans: Vec<Plan>,
    pub tags: Vec<String>,
    pub metadata: ServiceMetadata,
}

/// Display metadata of a service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    pub display_name: String,
    pub long_description: String,
    pub image_url: String,
    pub provider_display_name: String,
}

/// Plan of a service
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub metadata: PlanMetadata,
    pub free: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanMetadata {
    pub costs: Vec<Cost>,
    pub bullets: Vec<String>,
}

/// Recurring charge, keyed by currency
#[derive(Debug, Clone, Serialize)]
pub struct Cost {
    pub amount: BTreeMap<String, f64>,
    pub unit: String,
}

impl Catalog {
    /// Build the broker catalog
    pub fn new() -> Self {
        Self {
            services: vec![ServiceDefinition {
                id: SERVICE_DEFINITION_ID.to_string(),
                name: "p-caffeine".to_string(),
                description: "A caffeine service broker".to_string(),
                bindable: true,
                plan_updateable: false,
                plans: PlanTier::ALL.into_iter().map(Plan::for_tier).collect(),
                tags: vec!["caffeine".to_string()],
                metadata: ServiceMetadata {
                    display_name: "caffeine".to_string(),
                    long_description: "Caffeine as a Service".to_string(),
                    image_url:
                        "https://raw.githubusercontent.com/ben-manes/caffeine/master/wiki/logo.png"
                            .to_string(),
                    provider_display_name: "@making".to_string(),
                },
            }],
        }
    }

    /// Look up a service definition by id
    pub fn service_definition(&self, id: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan {
    /// Describe a plan tier as a catalog plan
    pub fn for_tier(tier: PlanTier) -> Self {
        let name = tier.plan_id();
        let limits = tier.limits();

        Self {
            id: name.clone(),
            name: name.clone(),
            description: format!(
                "{} caffeine plan ({} elements, expires {} seconds after last access)",
                name, limits.maximum_size, limits.expire_seconds
            ),
            metadata: PlanMetadata {
                costs: vec![Cost::free_monthly()],
                bullets: vec![
                    format!("{} caffeine", name),
                    format!("{} elements", limits.maximum_size),
                    format!(
                        "expires {} seconds after last access",
                        limits.expire_seconds
                    ),
                ],
            },
            free: true,
        }
    }
}

impl Cost {
    fn free_monthly() -> Self {
        Self {
            amount: BTreeMap::from([("usd".to_string(), 0.0)]),
            unit: "MONTHLY".to_string(),
        }
    }
}
