use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::acquisition::{
    AcquisitionOutcome, BusinessSector, Listing, ListingAcquirer, ListingProvider,
};
use crate::prospects::domain::{
    AccessControlType, Prospect, ProspectDraft, ProspectFilters, ProspectId,
};
use crate::prospects::repository::{ProspectPatch, ProspectRepository, RepositoryError};
use crate::prospects::service::ProspectService;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<Prospect>>>,
}

impl ProspectRepository for MemoryRepository {
    fn insert(&self, prospect: Prospect) -> Result<Prospect, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(prospect.clone());
        Ok(prospect)
    }

    fn find(
        &self,
        filters: &ProspectFilters,
        limit: usize,
    ) -> Result<Vec<Prospect>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut matched: Vec<Prospect> = guard
            .iter()
            .filter(|prospect| filters.matches(prospect))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit);
        Ok(matched)
    }

    fn fetch(&self, id: &ProspectId) -> Result<Option<Prospect>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|prospect| &prospect.id == id).cloned())
    }

    fn apply(&self, id: &ProspectId, patch: ProspectPatch) -> Result<Prospect, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let prospect = guard
            .iter_mut()
            .find(|prospect| &prospect.id == id)
            .ok_or(RepositoryError::NotFound)?;
        patch.apply_to(prospect);
        Ok(prospect.clone())
    }

    fn delete(&self, id: &ProspectId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|prospect| &prospect.id != id);
        Ok(guard.len() < before)
    }

    fn count(&self, filters: &ProspectFilters) -> Result<u64, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|prospect| filters.matches(prospect))
            .count() as u64)
    }
}

/// Acquirer double answering with a fixed scraped batch.
#[derive(Clone)]
pub(super) struct FixedAcquirer {
    pub(super) listings: Vec<Listing>,
}

#[async_trait]
impl ListingProvider for FixedAcquirer {
    async fn condominiums(
        &self,
        _city: &str,
        _neighborhood: Option<&str>,
        _max_results: usize,
    ) -> AcquisitionOutcome {
        AcquisitionOutcome::Scraped(self.listings.clone())
    }

    async fn businesses(
        &self,
        _city: &str,
        _sector: BusinessSector,
        _max_results: usize,
    ) -> AcquisitionOutcome {
        AcquisitionOutcome::Scraped(self.listings.clone())
    }
}

pub(super) fn listing(name: &str, access: AccessControlType, units: Option<u32>) -> Listing {
    Listing {
        name: name.to_string(),
        address: "Av. Ana Costa, 210 - Gonzaga, Santos".to_string(),
        phone: Some("(13) 3222-0000".to_string()),
        source: "condominium_directory".to_string(),
        access_control: access,
        units,
        towers: Some(1),
        built_year: Some(1998),
        sector: None,
        captured_at: Utc::now(),
    }
}

pub(super) fn draft(name: &str, city: &str) -> ProspectDraft {
    ProspectDraft {
        name: name.to_string(),
        city: city.to_string(),
        ..Default::default()
    }
}

pub(super) fn build_service(
) -> (ProspectService<MemoryRepository, FixedAcquirer>, Arc<MemoryRepository>) {
    build_service_with(Vec::new())
}

pub(super) fn build_service_with(
    listings: Vec<Listing>,
) -> (ProspectService<MemoryRepository, FixedAcquirer>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let acquirer = Arc::new(FixedAcquirer { listings });
    (ProspectService::new(repository.clone(), acquirer), repository)
}

/// Service wired to a real acquirer with no sources: every scrape falls back
/// to synthesis.
pub(super) fn build_simulating_service(
) -> (ProspectService<MemoryRepository, ListingAcquirer>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let acquirer = Arc::new(ListingAcquirer::new(Vec::new(), Duration::from_millis(50)));
    (ProspectService::new(repository.clone(), acquirer), repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
