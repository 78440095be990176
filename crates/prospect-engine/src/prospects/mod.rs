//! Durable prospect pipeline: lifecycle state, audit history, filtered
//! listing, statistics, and scrape-and-create ingestion.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AccessControlType, HistoryEvent, InterestStage, Origin, Prospect, ProspectDraft,
    ProspectFilters, ProspectId, ProspectKind, ProspectUpdate,
};
pub use repository::{ProspectPatch, ProspectRepository, RepositoryError};
pub use router::prospect_router;
pub use service::{
    scrape_priority, ProspectService, ProspectServiceError, ProspectStatistics, ScrapeParams,
    ScrapeSummary, ValidationError, PAGE_SIZE,
};
