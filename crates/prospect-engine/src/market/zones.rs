use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Broad land-use classification for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCategory {
    Residential,
    Commercial,
    Mixed,
}

impl ZoneCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ZoneCategory::Residential => "residential",
            ZoneCategory::Commercial => "commercial",
            ZoneCategory::Mixed => "mixed",
        }
    }
}

/// Named sub-area of a municipality carrying market and crime attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub category: ZoneCategory,
    pub approximate_address: String,
    pub condominiums: u32,
    pub businesses: u32,
    pub crime_index: f64,
}

impl Zone {
    fn new(
        name: &str,
        category: ZoneCategory,
        approximate_address: &str,
        condominiums: u32,
        businesses: u32,
        crime_index: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            approximate_address: approximate_address.to_string(),
            condominiums,
            businesses,
            crime_index,
        }
    }
}

/// Immutable zone reference table keyed by municipality name.
///
/// Municipalities with no entry yield an empty zone list, which downstream
/// consumers must treat as a data-coverage gap rather than an error.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    entries: BTreeMap<String, Vec<Zone>>,
}

impl ZoneCatalog {
    pub fn new(entries: BTreeMap<String, Vec<Zone>>) -> Self {
        Self { entries }
    }

    pub fn reference() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "Santos".to_string(),
            vec![
                Zone::new(
                    "Gonzaga",
                    ZoneCategory::Residential,
                    "Av. Ana Costa, alt. 500",
                    64,
                    180,
                    7.9,
                ),
                Zone::new(
                    "Centro",
                    ZoneCategory::Commercial,
                    "Rua XV de Novembro, alt. 100",
                    12,
                    420,
                    8.4,
                ),
                Zone::new(
                    "Ponta da Praia",
                    ZoneCategory::Residential,
                    "Av. Epitácio Pessoa, alt. 300",
                    48,
                    95,
                    6.2,
                ),
                Zone::new(
                    "Boqueirão",
                    ZoneCategory::Mixed,
                    "Av. Conselheiro Nébias, alt. 600",
                    55,
                    230,
                    7.1,
                ),
                Zone::new(
                    "Embaré",
                    ZoneCategory::Residential,
                    "Av. Bartolomeu de Gusmão, alt. 200",
                    39,
                    110,
                    5.8,
                ),
            ],
        );
        entries.insert(
            "São Vicente".to_string(),
            vec![
                Zone::new(
                    "Centro",
                    ZoneCategory::Commercial,
                    "Rua Frei Gaspar, alt. 200",
                    9,
                    310,
                    8.5,
                ),
                Zone::new(
                    "Itararé",
                    ZoneCategory::Residential,
                    "Av. Manoel da Nóbrega, alt. 400",
                    41,
                    85,
                    7.6,
                ),
                Zone::new(
                    "Gonzaguinha",
                    ZoneCategory::Mixed,
                    "Av. Presidente Wilson, alt. 100",
                    27,
                    140,
                    7.9,
                ),
            ],
        );
        entries.insert(
            "Guarujá".to_string(),
            vec![
                Zone::new(
                    "Pitangueiras",
                    ZoneCategory::Mixed,
                    "Av. Puglisi, alt. 300",
                    52,
                    260,
                    7.2,
                ),
                Zone::new(
                    "Enseada",
                    ZoneCategory::Residential,
                    "Av. Dom Pedro I, alt. 1000",
                    67,
                    120,
                    6.8,
                ),
                Zone::new(
                    "Vicente de Carvalho",
                    ZoneCategory::Commercial,
                    "Av. Thiago Ferreira, alt. 500",
                    14,
                    290,
                    8.1,
                ),
            ],
        );
        entries.insert(
            "Praia Grande".to_string(),
            vec![
                Zone::new(
                    "Boqueirão",
                    ZoneCategory::Mixed,
                    "Av. Presidente Kennedy, alt. 900",
                    58,
                    240,
                    6.7,
                ),
                Zone::new(
                    "Guilhermina",
                    ZoneCategory::Residential,
                    "Av. Presidente Castelo Branco, alt. 1500",
                    46,
                    90,
                    6.3,
                ),
                Zone::new(
                    "Ocian",
                    ZoneCategory::Residential,
                    "Av. Presidente Kennedy, alt. 7000",
                    33,
                    70,
                    6.9,
                ),
            ],
        );
        Self::new(entries)
    }

    /// Zones for a municipality; empty when the name is not covered.
    pub fn zones(&self, municipality: &str) -> &[Zone] {
        self.entries
            .get(municipality)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn santos_has_zone_coverage() {
        let catalog = ZoneCatalog::reference();
        let zones = catalog.zones("Santos");
        assert!(!zones.is_empty());
        assert!(zones.iter().any(|zone| zone.name == "Gonzaga"));
    }

    #[test]
    fn unknown_municipality_yields_empty_slice() {
        let catalog = ZoneCatalog::reference();
        assert!(catalog.zones("UnknownCity").is_empty());
    }
}
