use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::leads::domain::PriorityTier;

/// Identifier wrapper for persisted prospects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProspectId(pub String);

impl ProspectId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// What kind of sales target the prospect is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProspectKind {
    Condominium,
    Business,
}

impl ProspectKind {
    pub const fn label(self) -> &'static str {
        match self {
            ProspectKind::Condominium => "condominium",
            ProspectKind::Business => "business",
        }
    }
}

/// How the prospect entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Manual,
    Scraping,
    Referral,
}

impl Origin {
    pub const fn label(self) -> &'static str {
        match self {
            Origin::Manual => "manual",
            Origin::Scraping => "scraping",
            Origin::Referral => "referral",
        }
    }
}

/// Lifecycle stage: not_contacted -> interested -> negotiating -> closed
/// or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestStage {
    NotContacted,
    Interested,
    Negotiating,
    Closed,
    Discarded,
}

impl InterestStage {
    pub const ALL: [InterestStage; 5] = [
        InterestStage::NotContacted,
        InterestStage::Interested,
        InterestStage::Negotiating,
        InterestStage::Closed,
        InterestStage::Discarded,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            InterestStage::NotContacted => "not_contacted",
            InterestStage::Interested => "interested",
            InterestStage::Negotiating => "negotiating",
            InterestStage::Closed => "closed",
            InterestStage::Discarded => "discarded",
        }
    }
}

/// Classification of a building's entry-security posture.
///
/// Used descriptively on prospects and as a priority signal during scrape
/// ingestion: the outreach weight ranks how promising the current posture is
/// as a sales conversation starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessControlType {
    Doorman24h,
    RemoteAccessControl,
    None,
    DaytimeDoorman,
    Mixed,
    Business,
    Unknown,
}

impl AccessControlType {
    pub const ALL: [AccessControlType; 7] = [
        AccessControlType::Doorman24h,
        AccessControlType::RemoteAccessControl,
        AccessControlType::None,
        AccessControlType::DaytimeDoorman,
        AccessControlType::Mixed,
        AccessControlType::Business,
        AccessControlType::Unknown,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AccessControlType::Doorman24h => "doorman_24h",
            AccessControlType::RemoteAccessControl => "remote_access_control",
            AccessControlType::None => "none",
            AccessControlType::DaytimeDoorman => "daytime_doorman",
            AccessControlType::Mixed => "mixed",
            AccessControlType::Business => "business",
            AccessControlType::Unknown => "unknown",
        }
    }

    pub const fn display_label(self) -> &'static str {
        match self {
            AccessControlType::Doorman24h => "24h doorman",
            AccessControlType::RemoteAccessControl => "remote access control",
            AccessControlType::None => "no access control",
            AccessControlType::DaytimeDoorman => "daytime doorman",
            AccessControlType::Mixed => "mixed coverage",
            AccessControlType::Business => "business premises",
            AccessControlType::Unknown => "unclassified",
        }
    }

    /// Outreach-priority weight, 1-5.
    pub const fn outreach_weight(self) -> u8 {
        match self {
            AccessControlType::Doorman24h => 5,
            AccessControlType::RemoteAccessControl => 4,
            AccessControlType::None => 3,
            AccessControlType::DaytimeDoorman => 3,
            AccessControlType::Mixed => 2,
            AccessControlType::Business => 2,
            AccessControlType::Unknown => 1,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            AccessControlType::Doorman24h => {
                "staffed reception around the clock; budget already allocated to security"
            }
            AccessControlType::RemoteAccessControl => {
                "camera and intercom operated off-site; upgrade and monitoring upsell"
            }
            AccessControlType::None => "no entry control at all; strongest greenfield pitch",
            AccessControlType::DaytimeDoorman => {
                "staffed during business hours only; night-coverage gap"
            }
            AccessControlType::Mixed => "partial or shared coverage across towers",
            AccessControlType::Business => "commercial premises with its own opening hours",
            AccessControlType::Unknown => "posture not yet classified",
        }
    }
}

/// Single entry in a prospect's append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub at: DateTime<Utc>,
    pub action: String,
    pub actor: String,
}

impl HistoryEvent {
    pub fn now(action: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            action: action.into(),
            actor: actor.into(),
        }
    }
}

/// Durable, individually tracked sales target with lifecycle state and an
/// append-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: ProspectId,
    pub name: String,
    pub kind: ProspectKind,
    pub city: String,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub access_control: AccessControlType,
    pub units: Option<u32>,
    pub towers: Option<u32>,
    pub manager: Option<String>,
    pub administrator: Option<String>,
    pub interest_stage: InterestStage,
    pub desired_services: Vec<String>,
    pub estimated_value: Option<f64>,
    pub notes: Option<String>,
    pub origin: Origin,
    pub route_id: Option<String>,
    pub priority: PriorityTier,
    pub next_action: Option<String>,
    pub next_action_date: Option<NaiveDate>,
    pub history: Vec<HistoryEvent>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for manual creation; name and city are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProspectDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    pub kind: Option<ProspectKind>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub access_control: Option<AccessControlType>,
    pub units: Option<u32>,
    pub towers: Option<u32>,
    pub manager: Option<String>,
    pub administrator: Option<String>,
    #[serde(default)]
    pub desired_services: Vec<String>,
    pub estimated_value: Option<f64>,
    pub notes: Option<String>,
    pub origin: Option<Origin>,
    pub route_id: Option<String>,
    pub priority: Option<PriorityTier>,
    pub next_action: Option<String>,
    pub next_action_date: Option<NaiveDate>,
}

/// Partial update; `action` is extracted into the history log, never stored
/// as a plain field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProspectUpdate {
    pub name: Option<String>,
    pub kind: Option<ProspectKind>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub access_control: Option<AccessControlType>,
    pub units: Option<u32>,
    pub towers: Option<u32>,
    pub manager: Option<String>,
    pub administrator: Option<String>,
    pub interest_stage: Option<InterestStage>,
    pub desired_services: Option<Vec<String>>,
    pub estimated_value: Option<f64>,
    pub notes: Option<String>,
    pub route_id: Option<String>,
    pub priority: Option<PriorityTier>,
    pub next_action: Option<String>,
    pub next_action_date: Option<NaiveDate>,
    pub action: Option<String>,
    pub actor: Option<String>,
}

/// Exact-match filters for list and count operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProspectFilters {
    pub name: Option<String>,
    pub city: Option<String>,
    pub kind: Option<ProspectKind>,
    pub access_control: Option<AccessControlType>,
    pub interest_stage: Option<InterestStage>,
    pub priority: Option<PriorityTier>,
    pub route_id: Option<String>,
}

impl ProspectFilters {
    pub fn matches(&self, prospect: &Prospect) -> bool {
        if let Some(name) = &self.name {
            if &prospect.name != name {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if &prospect.city != city {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if prospect.kind != kind {
                return false;
            }
        }
        if let Some(access) = self.access_control {
            if prospect.access_control != access {
                return false;
            }
        }
        if let Some(stage) = self.interest_stage {
            if prospect.interest_stage != stage {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if prospect.priority != priority {
                return false;
            }
        }
        if let Some(route_id) = &self.route_id {
            if prospect.route_id.as_deref() != Some(route_id.as_str()) {
                return false;
            }
        }
        true
    }
}
