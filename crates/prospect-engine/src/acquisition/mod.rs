//! Scrape-with-fallback listing acquisition.
//!
//! Each source attempt is fault-isolated: a timeout or transport error on
//! one source never aborts the other or the overall call. When both sources
//! come back empty the acquirer synthesizes exactly `max_results` plausible
//! records, so the pipeline is never blocked by acquisition failure.

pub mod domain;
pub mod simulation;
pub mod sources;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AcquisitionConfig;

pub use domain::{
    guess_access_control, AcquisitionOutcome, BusinessSector, Listing, SIMULATED_SOURCE,
};
pub use simulation::ListingSimulator;
pub use sources::{
    BusinessDirectorySource, CondominiumDirectorySource, ListingQuery, ListingSource, SourceError,
};

/// Seam for the prospect service, so scrape-and-create can be exercised with
/// scripted outcomes in tests.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    async fn condominiums(
        &self,
        city: &str,
        neighborhood: Option<&str>,
        max_results: usize,
    ) -> AcquisitionOutcome;

    async fn businesses(
        &self,
        city: &str,
        sector: BusinessSector,
        max_results: usize,
    ) -> AcquisitionOutcome;
}

/// Orchestrates the primary and secondary sources plus the synthetic
/// fallback generator.
pub struct ListingAcquirer {
    sources: Vec<Arc<dyn ListingSource>>,
    timeout: Duration,
    simulator: ListingSimulator,
}

impl ListingAcquirer {
    pub fn new(sources: Vec<Arc<dyn ListingSource>>, timeout: Duration) -> Self {
        Self {
            sources,
            timeout,
            simulator: ListingSimulator,
        }
    }

    /// Wires the two HTTP directory sources from configuration.
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        let sources: Vec<Arc<dyn ListingSource>> = vec![
            Arc::new(CondominiumDirectorySource::new(
                config.condominium_base_url.clone(),
                config.source_timeout,
            )),
            Arc::new(BusinessDirectorySource::new(
                config.business_base_url.clone(),
                config.source_timeout,
            )),
        ];
        Self::new(sources, config.source_timeout)
    }

    /// Runs the sources in order. The secondary source is consulted only when
    /// the primary yielded fewer than half the requested cap; every failure
    /// is caught locally and counted as zero results from that source.
    async fn collect(&self, query: &ListingQuery) -> Vec<Listing> {
        let mut collected: Vec<Listing> = Vec::new();

        for (attempt, source) in self.sources.iter().enumerate() {
            if attempt > 0 && collected.len() * 2 >= query.max_results {
                break;
            }

            match tokio::time::timeout(self.timeout, source.fetch(query)).await {
                Ok(Ok(mut batch)) => {
                    info!(source = source.name(), yielded = batch.len(), "source attempt done");
                    collected.append(&mut batch);
                }
                Ok(Err(err)) => {
                    warn!(source = source.name(), error = %err, "source attempt failed");
                }
                Err(_) => {
                    warn!(source = source.name(), "source attempt timed out");
                }
            }
        }

        collected.truncate(query.max_results);
        collected
    }
}

#[async_trait]
impl ListingProvider for ListingAcquirer {
    async fn condominiums(
        &self,
        city: &str,
        neighborhood: Option<&str>,
        max_results: usize,
    ) -> AcquisitionOutcome {
        let query = ListingQuery {
            city: city.to_string(),
            neighborhood: neighborhood.map(str::to_string),
            sector: None,
            max_results,
        };

        let collected = self.collect(&query).await;
        if collected.is_empty() {
            info!(%city, max_results, "all sources empty; synthesizing condominium listings");
            AcquisitionOutcome::Simulated(self.simulator.condominiums(
                city,
                neighborhood,
                max_results,
            ))
        } else {
            AcquisitionOutcome::Scraped(collected)
        }
    }

    async fn businesses(
        &self,
        city: &str,
        sector: BusinessSector,
        max_results: usize,
    ) -> AcquisitionOutcome {
        let query = ListingQuery {
            city: city.to_string(),
            neighborhood: None,
            sector: Some(sector),
            max_results,
        };

        let collected = self.collect(&query).await;
        if collected.is_empty() {
            info!(%city, sector = sector.label(), "all sources empty; synthesizing business listings");
            AcquisitionOutcome::Simulated(self.simulator.businesses(city, sector, max_results))
        } else {
            AcquisitionOutcome::Scraped(collected)
        }
    }
}
