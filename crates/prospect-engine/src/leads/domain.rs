use serde::{Deserialize, Serialize};

use crate::market::zones::ZoneCategory;

/// Outreach priority tier; ordinal order drives route sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }

    /// high=0, medium=1, low=2; the route planner sorts ascending on this.
    pub const fn ordinal(self) -> u8 {
        match self {
            PriorityTier::High => 0,
            PriorityTier::Medium => 1,
            PriorityTier::Low => 2,
        }
    }
}

/// Ephemeral, scored sales opportunity derived from a zone.
///
/// Never persisted on its own; consumed immediately by route planning or
/// surfaced read-only to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub municipality: String,
    pub zone: String,
    pub category: ZoneCategory,
    pub approximate_address: String,
    pub condominiums: u32,
    pub businesses: u32,
    pub crime_index: f64,
    /// Heuristic close probability, always within [15, 85].
    pub close_probability: u8,
    pub priority: PriorityTier,
    pub best_visit_window: String,
    pub note: String,
}

/// Composite id: `municipality_zone`, lowercase, spaces replaced with
/// underscores.
pub fn lead_id(municipality: &str, zone: &str) -> String {
    format!("{municipality}_{zone}")
        .to_lowercase()
        .replace(' ', "_")
}
