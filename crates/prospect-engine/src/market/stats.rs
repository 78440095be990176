use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::info;

use super::crime::{CrimeSnapshot, CrimeTable};
use super::demographics::PopulationProvider;
use super::scoring::opportunity_index;

/// Canonical (registry code, display name) pair for a region member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MunicipalityRef {
    pub code: &'static str,
    pub name: &'static str,
}

const BAIXADA_SANTISTA: &[MunicipalityRef] = &[
    MunicipalityRef { code: "3548500", name: "Santos" },
    MunicipalityRef { code: "3551009", name: "São Vicente" },
    MunicipalityRef { code: "3518701", name: "Guarujá" },
    MunicipalityRef { code: "3541000", name: "Praia Grande" },
    MunicipalityRef { code: "3513504", name: "Cubatão" },
];

/// Canonical municipality enumeration for a region slug; empty when unknown.
pub fn region_municipalities(region: &str) -> &'static [MunicipalityRef] {
    match region.trim().to_ascii_lowercase().as_str() {
        "baixada_santista" | "baixada-santista" | "baixada santista" => BAIXADA_SANTISTA,
        _ => &[],
    }
}

/// City names used as the fixed vocabulary for prospect statistics.
pub fn region_city_names() -> Vec<&'static str> {
    BAIXADA_SANTISTA.iter().map(|entry| entry.name).collect()
}

/// Snapshot of a municipality, recomputed per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub code: String,
    pub name: String,
    /// 0 means "unknown", not "zero population".
    pub population: u64,
    pub crime: CrimeSnapshot,
    pub estimated_condominiums: u64,
    pub estimated_businesses: u64,
    pub opportunity_index: f64,
}

/// Region statistics aggregated over the canonical municipality list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub region: String,
    pub municipalities: Vec<Municipality>,
}

/// Aggregates demographic and crime inputs into scored municipality rows.
pub struct RegionStatsService<P> {
    populations: Arc<P>,
    crime: Arc<CrimeTable>,
}

impl<P> RegionStatsService<P>
where
    P: PopulationProvider + 'static,
{
    pub fn new(populations: Arc<P>, crime: Arc<CrimeTable>) -> Self {
        Self { populations, crime }
    }

    /// Builds per-municipality statistics for a region.
    ///
    /// Population lookups are independent and idempotent, so they run
    /// concurrently; the output order always follows the canonical
    /// enumeration, never completion order. Unknown regions yield an empty
    /// municipality list.
    pub async fn region_statistics(&self, region: &str) -> RegionStats {
        let members = region_municipalities(region);

        let mut lookups = JoinSet::new();
        for (position, member) in members.iter().enumerate() {
            let provider = Arc::clone(&self.populations);
            let code = member.code.to_string();
            lookups.spawn(async move { (position, provider.population(&code).await) });
        }

        let mut populations = vec![0u64; members.len()];
        while let Some(joined) = lookups.join_next().await {
            if let Ok((position, population)) = joined {
                populations[position] = population;
            }
        }

        let municipalities = members
            .iter()
            .zip(populations)
            .map(|(member, population)| self.municipality(member, population))
            .collect();

        info!(%region, municipalities = members.len(), "region statistics built");

        RegionStats {
            region: region.to_string(),
            municipalities,
        }
    }

    fn municipality(&self, member: &MunicipalityRef, population: u64) -> Municipality {
        let crime = self.crime.snapshot(member.name);
        let estimated_condominiums = population / 350;
        let estimated_businesses = population / 45;
        let market_density = estimated_condominiums + estimated_businesses;

        Municipality {
            code: member.code.to_string(),
            name: member.name.to_string(),
            population,
            crime,
            estimated_condominiums,
            estimated_businesses,
            opportunity_index: opportunity_index(population, crime.index, market_density),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::demographics::StaticPopulation;

    fn service() -> RegionStatsService<StaticPopulation> {
        RegionStatsService::new(
            Arc::new(StaticPopulation::reference()),
            Arc::new(CrimeTable::reference()),
        )
    }

    #[tokio::test]
    async fn preserves_canonical_order() {
        let stats = service().region_statistics("baixada_santista").await;
        let names: Vec<&str> = stats
            .municipalities
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Santos", "São Vicente", "Guarujá", "Praia Grande", "Cubatão"]
        );
    }

    #[tokio::test]
    async fn derived_counts_are_linear_in_population() {
        let stats = service().region_statistics("baixada_santista").await;
        let santos = &stats.municipalities[0];
        assert_eq!(santos.estimated_condominiums, santos.population / 350);
        assert_eq!(santos.estimated_businesses, santos.population / 45);
        assert!(santos.opportunity_index > 0.0);
    }

    #[tokio::test]
    async fn unknown_region_is_empty_not_error() {
        let stats = service().region_statistics("unknown_region").await;
        assert!(stats.municipalities.is_empty());
    }

    #[tokio::test]
    async fn unknown_population_scores_on_crime_alone() {
        let service = RegionStatsService::new(
            Arc::new(StaticPopulation::default()),
            Arc::new(CrimeTable::reference()),
        );
        let stats = service.region_statistics("baixada_santista").await;
        let santos = &stats.municipalities[0];
        assert_eq!(santos.population, 0);
        assert_eq!(
            santos.opportunity_index,
            opportunity_index(0, santos.crime.index, 0)
        );
    }
}
