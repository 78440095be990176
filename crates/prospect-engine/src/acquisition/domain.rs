use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prospects::domain::AccessControlType;

pub const SIMULATED_SOURCE: &str = "simulated";

/// Business segment for sector-specific acquisition and vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessSector {
    Retail,
    Food,
    Health,
    Education,
    Logistics,
}

impl BusinessSector {
    pub const fn label(self) -> &'static str {
        match self {
            BusinessSector::Retail => "retail",
            BusinessSector::Food => "food",
            BusinessSector::Health => "health",
            BusinessSector::Education => "education",
            BusinessSector::Logistics => "logistics",
        }
    }
}

/// Raw acquired record, before dedup and prospect creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    /// Source tag; `"simulated"` marks synthetic fallback records.
    pub source: String,
    pub access_control: AccessControlType,
    pub units: Option<u32>,
    pub towers: Option<u32>,
    pub built_year: Option<u32>,
    pub sector: Option<BusinessSector>,
    pub captured_at: DateTime<Utc>,
}

/// Tagged acquisition result so callers can assert on provenance without
/// string-matching the `source` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AcquisitionOutcome {
    Scraped(Vec<Listing>),
    Simulated(Vec<Listing>),
}

impl AcquisitionOutcome {
    pub fn records(&self) -> &[Listing] {
        match self {
            AcquisitionOutcome::Scraped(records) | AcquisitionOutcome::Simulated(records) => {
                records
            }
        }
    }

    pub fn into_records(self) -> Vec<Listing> {
        match self {
            AcquisitionOutcome::Scraped(records) | AcquisitionOutcome::Simulated(records) => {
                records
            }
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, AcquisitionOutcome::Simulated(_))
    }
}

/// Guess the entry-security posture from free text in a listing.
pub fn guess_access_control(text: &str) -> AccessControlType {
    let text = text.to_lowercase();
    if text.contains("portaria 24") || text.contains("24h") || text.contains("24 horas") {
        AccessControlType::Doorman24h
    } else if text.contains("portaria remota") || text.contains("controle remoto") {
        AccessControlType::RemoteAccessControl
    } else if text.contains("portaria diurna") || text.contains("meio período") {
        AccessControlType::DaytimeDoorman
    } else if text.contains("sem portaria") || text.contains("sem controle") {
        AccessControlType::None
    } else if text.contains("mista") || text.contains("compartilhada") {
        AccessControlType::Mixed
    } else {
        AccessControlType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_exposes_records_regardless_of_provenance() {
        let listing = Listing {
            name: "Residencial Teste".to_string(),
            address: "Rua Um, 1".to_string(),
            phone: None,
            source: SIMULATED_SOURCE.to_string(),
            access_control: AccessControlType::Unknown,
            units: None,
            towers: None,
            built_year: None,
            sector: None,
            captured_at: Utc::now(),
        };
        let simulated = AcquisitionOutcome::Simulated(vec![listing.clone()]);
        assert!(simulated.is_simulated());
        assert_eq!(simulated.records().len(), 1);

        let scraped = AcquisitionOutcome::Scraped(vec![listing]);
        assert!(!scraped.is_simulated());
    }

    #[test]
    fn access_guess_matches_keywords() {
        assert_eq!(
            guess_access_control("Portaria 24 horas com ronda"),
            AccessControlType::Doorman24h
        );
        assert_eq!(
            guess_access_control("condomínio com portaria remota"),
            AccessControlType::RemoteAccessControl
        );
        assert_eq!(
            guess_access_control("prédio sem portaria"),
            AccessControlType::None
        );
        assert_eq!(
            guess_access_control("fachada reformada"),
            AccessControlType::Unknown
        );
    }
}
