use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-municipality offense counts plus a composite 0-10 index.
///
/// This is the only non-probabilistic data source in the engine: no scraping,
/// no randomness, so the opportunity score stays stable and auditable even
/// when acquisition fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CrimeSnapshot {
    pub robbery: u32,
    pub theft: u32,
    pub vehicle_theft: u32,
    pub residential_burglary: u32,
    pub commercial_burglary: u32,
    pub index: f64,
}

/// Immutable crime reference table keyed by municipality display name.
///
/// Injected at construction so tests can substitute fixtures; unknown names
/// resolve to the all-zero snapshot rather than failing the pipeline.
#[derive(Debug, Clone)]
pub struct CrimeTable {
    entries: BTreeMap<String, CrimeSnapshot>,
}

impl CrimeTable {
    pub fn new(entries: BTreeMap<String, CrimeSnapshot>) -> Self {
        Self { entries }
    }

    /// Reference data for the Baixada Santista municipalities.
    pub fn reference() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "Santos".to_string(),
            CrimeSnapshot {
                robbery: 3_412,
                theft: 8_950,
                vehicle_theft: 1_268,
                residential_burglary: 742,
                commercial_burglary: 519,
                index: 7.8,
            },
        );
        entries.insert(
            "São Vicente".to_string(),
            CrimeSnapshot {
                robbery: 2_874,
                theft: 5_110,
                vehicle_theft: 1_035,
                residential_burglary: 611,
                commercial_burglary: 348,
                index: 8.2,
            },
        );
        entries.insert(
            "Guarujá".to_string(),
            CrimeSnapshot {
                robbery: 2_240,
                theft: 4_480,
                vehicle_theft: 890,
                residential_burglary: 533,
                commercial_burglary: 287,
                index: 7.4,
            },
        );
        entries.insert(
            "Praia Grande".to_string(),
            CrimeSnapshot {
                robbery: 1_985,
                theft: 4_905,
                vehicle_theft: 812,
                residential_burglary: 498,
                commercial_burglary: 260,
                index: 6.9,
            },
        );
        entries.insert(
            "Cubatão".to_string(),
            CrimeSnapshot {
                robbery: 1_120,
                theft: 2_010,
                vehicle_theft: 402,
                residential_burglary: 231,
                commercial_burglary: 155,
                index: 6.1,
            },
        );
        Self::new(entries)
    }

    /// Snapshot for a municipality; all zeros when the name is not covered.
    pub fn snapshot(&self, municipality: &str) -> CrimeSnapshot {
        self.entries
            .get(municipality)
            .copied()
            .unwrap_or_default()
    }

    pub fn covers(&self, municipality: &str) -> bool {
        self.entries.contains_key(municipality)
    }
}
