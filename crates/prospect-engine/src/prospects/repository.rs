use chrono::NaiveDate;

use crate::leads::domain::PriorityTier;

use super::domain::{
    AccessControlType, HistoryEvent, InterestStage, Prospect, ProspectFilters, ProspectId,
    ProspectKind,
};

/// Field merge plus history appends for a single update call.
///
/// The two store writes (field set, array push) are not required to be
/// transactional, but the field set must be the one visible in the returned
/// document.
#[derive(Debug, Clone, Default)]
pub struct ProspectPatch {
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
    pub push_history: Vec<HistoryEvent>,
}

impl ProspectPatch {
    /// Applies the merge semantics to an owned document.
    pub fn apply_to(self, prospect: &mut Prospect) {
        if let Some(name) = self.name {
            prospect.name = name;
        }
        if let Some(kind) = self.kind {
            prospect.kind = kind;
        }
        if let Some(city) = self.city {
            prospect.city = city;
        }
        if let Some(neighborhood) = self.neighborhood {
            prospect.neighborhood = Some(neighborhood);
        }
        if let Some(address) = self.address {
            prospect.address = Some(address);
        }
        if let Some(phone) = self.phone {
            prospect.phone = Some(phone);
        }
        if let Some(email) = self.email {
            prospect.email = Some(email);
        }
        if let Some(access_control) = self.access_control {
            prospect.access_control = access_control;
        }
        if let Some(units) = self.units {
            prospect.units = Some(units);
        }
        if let Some(towers) = self.towers {
            prospect.towers = Some(towers);
        }
        if let Some(manager) = self.manager {
            prospect.manager = Some(manager);
        }
        if let Some(administrator) = self.administrator {
            prospect.administrator = Some(administrator);
        }
        if let Some(interest_stage) = self.interest_stage {
            prospect.interest_stage = interest_stage;
        }
        if let Some(desired_services) = self.desired_services {
            prospect.desired_services = desired_services;
        }
        if let Some(estimated_value) = self.estimated_value {
            prospect.estimated_value = Some(estimated_value);
        }
        if let Some(notes) = self.notes {
            prospect.notes = Some(notes);
        }
        if let Some(route_id) = self.route_id {
            prospect.route_id = Some(route_id);
        }
        if let Some(priority) = self.priority {
            prospect.priority = priority;
        }
        if let Some(next_action) = self.next_action {
            prospect.next_action = Some(next_action);
        }
        if let Some(next_action_date) = self.next_action_date {
            prospect.next_action_date = Some(next_action_date);
        }
        prospect.history.extend(self.push_history);
    }
}

/// Storage abstraction mapping the collaborating document store's
/// single-document primitives: insert-one, find-with-filter-sort-limit,
/// update-one (field set + array push), delete-one, count-with-filter.
pub trait ProspectRepository: Send + Sync {
    fn insert(&self, prospect: Prospect) -> Result<Prospect, RepositoryError>;
    /// Newest-first by creation time, capped at `limit`.
    fn find(&self, filters: &ProspectFilters, limit: usize)
        -> Result<Vec<Prospect>, RepositoryError>;
    fn fetch(&self, id: &ProspectId) -> Result<Option<Prospect>, RepositoryError>;
    /// Merges the patch and returns the updated document; `NotFound` when the
    /// id does not exist.
    fn apply(&self, id: &ProspectId, patch: ProspectPatch) -> Result<Prospect, RepositoryError>;
    /// Hard delete; `false` when no record was removed.
    fn delete(&self, id: &ProspectId) -> Result<bool, RepositoryError>;
    fn count(&self, filters: &ProspectFilters) -> Result<u64, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("prospect not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
