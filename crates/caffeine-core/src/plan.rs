//! Cache plan tiers

use std::fmt;
use std::str::FromStr;

/// Error type for parsing a plan tier
#[derive(Debug, Clone)]
pub struct ParsePlanTierError(String);

impl ParsePlanTierError {
    /// The plan id that failed to resolve
    pub fn plan_id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParsePlanTierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown plan tier: {}", self.0)
    }
}

impl std::error::Error for ParsePlanTierError {}

/// Sizing parameters of a cache created for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    /// Seconds after last access before an entry is evicted
    pub expire_seconds: u32,
    /// Maximum number of entries held by the cache
    pub maximum_size: u32,
}

/// Plan tiers offered in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanTier {
    Strong,
    Weak,
}

impl PlanTier {
    /// Every tier, in catalog order
    pub const ALL: [PlanTier; 2] = [PlanTier::Strong, PlanTier::Weak];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Strong => "STRONG",
            PlanTier::Weak => "WEAK",
        }
    }

    /// Lowercase name, used as both plan id and plan name
    pub fn plan_id(&self) -> String {
        self.as_str().to_lowercase()
    }

    pub fn limits(&self) -> TierLimits {
        match self {
            PlanTier::Strong => TierLimits {
                expire_seconds: 600,
                maximum_size: 1000,
            },
            PlanTier::Weak => TierLimits {
                expire_seconds: 60,
                maximum_size: 100,
            },
        }
    }
}

impl FromStr for PlanTier {
    type Err = ParsePlanTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        PlanTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == upper)
            .ok_or_else(|| ParsePlanTierError(s.to_string()))
    }
}
