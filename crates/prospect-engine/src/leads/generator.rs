use std::sync::Arc;

use crate::market::zones::{Zone, ZoneCatalog, ZoneCategory};

use super::domain::{lead_id, Lead, PriorityTier};

const BASE_PROBABILITY: u8 = 15;
const PROBABILITY_CAP: u8 = 85;

/// Expands a municipality into scored leads, one per cataloged zone.
pub struct LeadGenerator {
    zones: Arc<ZoneCatalog>,
}

impl LeadGenerator {
    pub fn new(zones: Arc<ZoneCatalog>) -> Self {
        Self { zones }
    }

    /// One lead per zone; municipalities absent from the catalog yield an
    /// empty list (a data-coverage gap, not an error).
    pub fn leads_for_municipality(&self, municipality: &str) -> Vec<Lead> {
        self.zones
            .zones(municipality)
            .iter()
            .map(|zone| self.lead(municipality, zone))
            .collect()
    }

    fn lead(&self, municipality: &str, zone: &Zone) -> Lead {
        Lead {
            id: lead_id(municipality, &zone.name),
            municipality: municipality.to_string(),
            zone: zone.name.clone(),
            category: zone.category,
            approximate_address: zone.approximate_address.clone(),
            condominiums: zone.condominiums,
            businesses: zone.businesses,
            crime_index: zone.crime_index,
            close_probability: close_probability(zone),
            priority: priority_tier(zone),
            best_visit_window: best_visit_window(zone.category).to_string(),
            note: String::new(),
        }
    }
}

/// Fixed heuristic ladder, not a statistical model; each threshold is a
/// design decision and must stay exact for test parity.
pub fn close_probability(zone: &Zone) -> u8 {
    let mut probability = u32::from(BASE_PROBABILITY);

    if zone.crime_index > 7.0 {
        probability += 12;
    } else if zone.crime_index > 5.0 {
        probability += 8;
    }

    match zone.category {
        ZoneCategory::Residential => probability += 10,
        ZoneCategory::Mixed => probability += 7,
        ZoneCategory::Commercial => {}
    }

    if zone.condominiums > 30 {
        probability += 8;
    }

    probability.min(u32::from(PROBABILITY_CAP)) as u8
}

/// Tiering over `2*crime + 0.5*condominiums + 0.3*businesses`.
pub fn priority_tier(zone: &Zone) -> PriorityTier {
    let score = 2.0 * zone.crime_index
        + 0.5 * f64::from(zone.condominiums)
        + 0.3 * f64::from(zone.businesses);

    if score > 30.0 {
        PriorityTier::High
    } else if score > 20.0 {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}

/// Residential buildings answer in the evening, commerce before lunch.
pub fn best_visit_window(category: ZoneCategory) -> &'static str {
    match category {
        ZoneCategory::Residential => "18:00-20:30",
        ZoneCategory::Commercial => "10:00-12:00",
        ZoneCategory::Mixed => "14:00-17:00",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(category: ZoneCategory, condominiums: u32, businesses: u32, crime: f64) -> Zone {
        Zone {
            name: "Test Zone".to_string(),
            category,
            approximate_address: "Rua de Teste, 1".to_string(),
            condominiums,
            businesses,
            crime_index: crime,
        }
    }

    #[test]
    fn probability_ladder_adds_each_threshold() {
        // 15 base + 12 high crime + 10 residential + 8 large condo stock
        let high = zone(ZoneCategory::Residential, 40, 10, 8.0);
        assert_eq!(close_probability(&high), 45);

        // 15 base + 8 mid crime + 7 mixed
        let mid = zone(ZoneCategory::Mixed, 10, 10, 6.0);
        assert_eq!(close_probability(&mid), 30);

        // commercial with no crime signal stays at base
        let floor = zone(ZoneCategory::Commercial, 0, 10, 0.0);
        assert_eq!(close_probability(&floor), BASE_PROBABILITY);
    }

    #[test]
    fn probability_stays_within_bounds_and_is_deterministic() {
        let best = zone(ZoneCategory::Residential, 500, 5_000, 10.0);
        let first = close_probability(&best);
        assert!(first >= BASE_PROBABILITY && first <= PROBABILITY_CAP);
        assert_eq!(first, close_probability(&best));
    }

    #[test]
    fn priority_thresholds_split_tiers() {
        // 2*9 + 0.5*20 + 0.3*20 = 34 -> high
        assert_eq!(
            priority_tier(&zone(ZoneCategory::Mixed, 20, 20, 9.0)),
            PriorityTier::High
        );
        // 2*5 + 0.5*20 + 0.3*10 = 23 -> medium
        assert_eq!(
            priority_tier(&zone(ZoneCategory::Mixed, 20, 10, 5.0)),
            PriorityTier::Medium
        );
        // 2*2 + 0.5*10 + 0.3*10 = 12 -> low
        assert_eq!(
            priority_tier(&zone(ZoneCategory::Mixed, 10, 10, 2.0)),
            PriorityTier::Low
        );
    }

    #[test]
    fn unknown_municipality_yields_no_leads() {
        let generator = LeadGenerator::new(Arc::new(ZoneCatalog::reference()));
        assert!(generator.leads_for_municipality("UnknownCity").is_empty());
    }

    #[test]
    fn santos_leads_carry_windows_and_ids() {
        let generator = LeadGenerator::new(Arc::new(ZoneCatalog::reference()));
        let leads = generator.leads_for_municipality("Santos");
        assert!(!leads.is_empty());
        for lead in &leads {
            assert!(lead.id.starts_with("santos_"));
            assert!(!lead.best_visit_window.is_empty());
            assert!(lead.close_probability >= 15 && lead.close_probability <= 85);
        }
    }
}
