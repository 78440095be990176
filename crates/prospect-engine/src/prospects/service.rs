use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::acquisition::{BusinessSector, Listing, ListingProvider};
use crate::leads::domain::PriorityTier;
use crate::market::stats::region_city_names;

use super::domain::{
    AccessControlType, HistoryEvent, InterestStage, Origin, Prospect, ProspectDraft,
    ProspectFilters, ProspectId, ProspectKind, ProspectUpdate,
};
use super::repository::{ProspectPatch, ProspectRepository, RepositoryError};

/// Fixed page size for list operations.
pub const PAGE_SIZE: usize = 100;

const DEFAULT_SCRAPE_CAP: usize = 10;
const SYSTEM_ACTOR: &str = "system";

/// Parameters for the scrape-and-create ingestion pass.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeParams {
    pub city: String,
    pub neighborhood: Option<String>,
    pub kind: Option<ProspectKind>,
    pub sector: Option<BusinessSector>,
    /// When set, only listings of this access type (plus `unknown`) are
    /// admitted.
    pub access_control: Option<AccessControlType>,
    pub max_results: Option<usize>,
}

/// Outcome of one scrape-and-create pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub scraped: usize,
    pub created: usize,
    pub simulated: bool,
    pub prospects: Vec<Prospect>,
}

/// Aggregate counts over the fixed stage, city, and access vocabularies.
#[derive(Debug, Clone, Serialize)]
pub struct ProspectStatistics {
    pub total: u64,
    pub by_interest_stage: BTreeMap<&'static str, u64>,
    pub by_city: BTreeMap<&'static str, u64>,
    pub by_access_control: BTreeMap<&'static str, u64>,
}

/// Validation failures surfaced before any store mutation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Error raised by the prospect service.
#[derive(Debug, thiserror::Error)]
pub enum ProspectServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing the repository and the listing acquirer.
pub struct ProspectService<R, A> {
    repository: Arc<R>,
    acquirer: Arc<A>,
}

impl<R, A> ProspectService<R, A>
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    pub fn new(repository: Arc<R>, acquirer: Arc<A>) -> Self {
        Self { repository, acquirer }
    }

    /// Manual creation; validates before touching the store and seeds a
    /// single "created" history entry.
    pub fn create(&self, draft: ProspectDraft) -> Result<Prospect, ProspectServiceError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if draft.city.trim().is_empty() {
            return Err(ValidationError::MissingField("city").into());
        }

        let prospect = Prospect {
            id: ProspectId::generate(),
            name: draft.name,
            kind: draft.kind.unwrap_or(ProspectKind::Condominium),
            city: draft.city,
            neighborhood: draft.neighborhood,
            address: draft.address,
            phone: draft.phone,
            email: draft.email,
            access_control: draft.access_control.unwrap_or(AccessControlType::Unknown),
            units: draft.units,
            towers: draft.towers,
            manager: draft.manager,
            administrator: draft.administrator,
            interest_stage: InterestStage::NotContacted,
            desired_services: draft.desired_services,
            estimated_value: draft.estimated_value,
            notes: draft.notes,
            origin: draft.origin.unwrap_or(Origin::Manual),
            route_id: draft.route_id,
            priority: draft.priority.unwrap_or(PriorityTier::Medium),
            next_action: draft.next_action,
            next_action_date: draft.next_action_date,
            history: vec![HistoryEvent::now("created", SYSTEM_ACTOR)],
            created_at: Utc::now(),
        };

        Ok(self.repository.insert(prospect)?)
    }

    /// Exact-match filtered listing, newest-first, capped at the page size.
    pub fn list(&self, filters: &ProspectFilters) -> Result<Vec<Prospect>, ProspectServiceError> {
        Ok(self.repository.find(filters, PAGE_SIZE)?)
    }

    pub fn get(&self, id: &ProspectId) -> Result<Prospect, ProspectServiceError> {
        let prospect = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(prospect)
    }

    /// Merges supplied fields; a supplied `action` is extracted and appended
    /// to the history log instead of being stored as a plain field.
    pub fn update(
        &self,
        id: &ProspectId,
        update: ProspectUpdate,
    ) -> Result<Prospect, ProspectServiceError> {
        let ProspectUpdate {
            name,
            kind,
            city,
            neighborhood,
            address,
            phone,
            email,
            access_control,
            units,
            towers,
            manager,
            administrator,
            interest_stage,
            desired_services,
            estimated_value,
            notes,
            route_id,
            priority,
            next_action,
            next_action_date,
            action,
            actor,
        } = update;

        let push_history = action
            .map(|action| {
                vec![HistoryEvent::now(
                    action,
                    actor.unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
                )]
            })
            .unwrap_or_default();

        let patch = ProspectPatch {
            name,
            kind,
            city,
            neighborhood,
            address,
            phone,
            email,
            access_control,
            units,
            towers,
            manager,
            administrator,
            interest_stage,
            desired_services,
            estimated_value,
            notes,
            route_id,
            priority,
            next_action,
            next_action_date,
            push_history,
        };

        Ok(self.repository.apply(id, patch)?)
    }

    /// Hard delete; missing ids surface `NotFound`, distinct from a
    /// successful no-op.
    pub fn delete(&self, id: &ProspectId) -> Result<(), ProspectServiceError> {
        if self.repository.delete(id)? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound.into())
        }
    }

    /// Totals plus per-category breakdowns across the fixed vocabularies.
    pub fn statistics(&self) -> Result<ProspectStatistics, ProspectServiceError> {
        let total = self.repository.count(&ProspectFilters::default())?;

        let mut by_interest_stage = BTreeMap::new();
        for stage in InterestStage::ALL {
            let count = self.repository.count(&ProspectFilters {
                interest_stage: Some(stage),
                ..Default::default()
            })?;
            by_interest_stage.insert(stage.label(), count);
        }

        let mut by_city = BTreeMap::new();
        for city in region_city_names() {
            let count = self.repository.count(&ProspectFilters {
                city: Some(city.to_string()),
                ..Default::default()
            })?;
            by_city.insert(city, count);
        }

        let mut by_access_control = BTreeMap::new();
        for access in AccessControlType::ALL {
            let count = self.repository.count(&ProspectFilters {
                access_control: Some(access),
                ..Default::default()
            })?;
            by_access_control.insert(access.label(), count);
        }

        Ok(ProspectStatistics {
            total,
            by_interest_stage,
            by_city,
            by_access_control,
        })
    }

    /// Runs the acquirer and creates prospects for the non-duplicate
    /// listings. Dedup is a soft (name, city) key via read-then-insert;
    /// concurrent callers can race past the existence check, which is
    /// acceptable at this system's throughput.
    pub async fn scrape_and_create(
        &self,
        params: ScrapeParams,
    ) -> Result<ScrapeSummary, ProspectServiceError> {
        if params.city.trim().is_empty() {
            return Err(ValidationError::MissingField("city").into());
        }

        let kind = params.kind.unwrap_or(ProspectKind::Condominium);
        let max_results = params.max_results.unwrap_or(DEFAULT_SCRAPE_CAP);

        let outcome = match kind {
            ProspectKind::Condominium => {
                self.acquirer
                    .condominiums(&params.city, params.neighborhood.as_deref(), max_results)
                    .await
            }
            ProspectKind::Business => {
                self.acquirer
                    .businesses(
                        &params.city,
                        params.sector.unwrap_or(BusinessSector::Retail),
                        max_results,
                    )
                    .await
            }
        };

        let simulated = outcome.is_simulated();
        let listings = outcome.into_records();
        let scraped = listings.len();

        let mut prospects = Vec::new();
        for listing in listings {
            if let Some(requested) = params.access_control {
                // unknown-typed results are always admitted so an aggressive
                // filter cannot hide unclassified buildings
                if listing.access_control != requested
                    && listing.access_control != AccessControlType::Unknown
                {
                    continue;
                }
            }

            let dedup = ProspectFilters {
                name: Some(listing.name.clone()),
                city: Some(params.city.clone()),
                ..Default::default()
            };
            if self.repository.count(&dedup)? > 0 {
                continue;
            }

            let prospect = self.prospect_from_listing(
                listing,
                kind,
                &params.city,
                params.neighborhood.as_deref(),
            )?;
            prospects.push(prospect);
        }

        info!(
            city = %params.city,
            scraped,
            created = prospects.len(),
            simulated,
            "scrape-and-create pass finished"
        );

        Ok(ScrapeSummary {
            scraped,
            created: prospects.len(),
            simulated,
            prospects,
        })
    }

    fn prospect_from_listing(
        &self,
        listing: Listing,
        kind: ProspectKind,
        city: &str,
        neighborhood: Option<&str>,
    ) -> Result<Prospect, ProspectServiceError> {
        let priority = scrape_priority(listing.access_control, listing.units.unwrap_or(0));
        let action = format!("created from scraping ({})", listing.source);

        let prospect = Prospect {
            id: ProspectId::generate(),
            name: listing.name,
            kind,
            city: city.to_string(),
            neighborhood: neighborhood.map(str::to_string),
            address: Some(listing.address),
            phone: listing.phone,
            email: None,
            access_control: listing.access_control,
            units: listing.units,
            towers: listing.towers,
            manager: None,
            administrator: None,
            interest_stage: InterestStage::NotContacted,
            desired_services: Vec::new(),
            estimated_value: None,
            notes: None,
            origin: Origin::Scraping,
            route_id: None,
            priority,
            next_action: None,
            next_action_date: None,
            history: vec![HistoryEvent::now(action, SYSTEM_ACTOR)],
            created_at: Utc::now(),
        };

        Ok(self.repository.insert(prospect)?)
    }
}

/// Priority heuristic for scraped records: the access-control outreach
/// weight crossed with the building size.
pub fn scrape_priority(access: AccessControlType, units: u32) -> PriorityTier {
    let weight = access.outreach_weight();
    if weight >= 4 && units > 50 {
        PriorityTier::High
    } else if weight >= 3 || units > 30 {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}
