use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use prospect_engine::prospects::{
    Prospect, ProspectFilters, ProspectId, ProspectPatch, ProspectRepository, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local prospect store. Inserts keep arrival order; listings sort
/// newest-first on the way out.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProspectRepository {
    records: Arc<Mutex<Vec<Prospect>>>,
}

impl ProspectRepository for InMemoryProspectRepository {
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
