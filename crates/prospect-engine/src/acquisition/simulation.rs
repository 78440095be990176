use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::prospects::domain::AccessControlType;

use super::domain::{BusinessSector, Listing, SIMULATED_SOURCE};

const CONDO_PREFIXES: &[&str] = &["Residencial", "Edifício", "Condomínio", "Solar"];

const CONDO_CORES: &[&str] = &[
    "Atlântico",
    "Porto Seguro",
    "Jardim das Palmeiras",
    "Costa Azul",
    "Vista Mar",
    "Ilha Bela",
    "Morada do Sol",
    "Maré Alta",
    "Dona Francisca",
    "Monte Serrat",
];

const STREETS: &[&str] = &[
    "Rua XV de Novembro",
    "Av. Ana Costa",
    "Rua Carvalho de Mendonça",
    "Av. Conselheiro Nébias",
    "Rua Euclides da Cunha",
    "Av. Presidente Wilson",
    "Av. Bartolomeu de Gusmão",
    "Rua Oswaldo Cruz",
];

fn sector_vocabulary(sector: BusinessSector) -> (&'static [&'static str], &'static [&'static str]) {
    match sector {
        BusinessSector::Retail => (
            &["Lojas", "Magazine", "Comercial", "Empório"],
            &["Central", "da Orla", "Litoral", "Santista", "do Porto"],
        ),
        BusinessSector::Food => (
            &["Restaurante", "Cantina", "Padaria", "Churrascaria"],
            &["do Mar", "da Praia", "Bella Vista", "São Jorge", "Netuno"],
        ),
        BusinessSector::Health => (
            &["Clínica", "Laboratório", "Farmácia", "Consultório"],
            &["Vida", "Santa Cecília", "BioMar", "da Família", "Litoral"],
        ),
        BusinessSector::Education => (
            &["Colégio", "Escola", "Curso", "Instituto"],
            &["Santista", "Objetivo da Orla", "Novo Saber", "Atlântico"],
        ),
        BusinessSector::Logistics => (
            &["Transportadora", "Armazéns", "Logística", "Despachante"],
            &["do Porto", "Cais 7", "Santos Express", "Valongo"],
        ),
    }
}

fn phone(rng: &mut impl Rng) -> String {
    format!(
        "(13) 3{:03}-{:04}",
        rng.gen_range(100..1000),
        rng.gen_range(1000..10000)
    )
}

fn address(rng: &mut impl Rng, neighborhood: Option<&str>, city: &str) -> String {
    let street = STREETS.choose(rng).copied().unwrap_or(STREETS[0]);
    let number = rng.gen_range(10..2000);
    match neighborhood {
        Some(neighborhood) => format!("{street}, {number} - {neighborhood}, {city}"),
        None => format!("{street}, {number} - {city}"),
    }
}

/// Deterministic-shape synthetic listings for when every web source fails.
///
/// Bounded random generation over fixed vocabularies; the records are
/// plausible but always tagged `source = "simulated"` so downstream
/// reporting can distinguish them from real captures.
#[derive(Debug, Clone, Default)]
pub struct ListingSimulator;

impl ListingSimulator {
    pub fn condominiums(
        &self,
        city: &str,
        neighborhood: Option<&str>,
        count: usize,
    ) -> Vec<Listing> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|index| {
                let prefix = CONDO_PREFIXES.choose(&mut rng).copied().unwrap_or("Residencial");
                let core = CONDO_CORES.choose(&mut rng).copied().unwrap_or("Atlântico");
                let access = AccessControlType::ALL
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(AccessControlType::Unknown);
                Listing {
                    name: format!("{prefix} {core} {}", roman(index + 1)),
                    address: address(&mut rng, neighborhood, city),
                    phone: Some(phone(&mut rng)),
                    source: SIMULATED_SOURCE.to_string(),
                    access_control: access,
                    units: Some(rng.gen_range(20..=220)),
                    towers: Some(rng.gen_range(1..=4)),
                    built_year: Some(rng.gen_range(1975..=2020)),
                    sector: None,
                    captured_at: Utc::now(),
                }
            })
            .collect()
    }

    pub fn businesses(&self, city: &str, sector: BusinessSector, count: usize) -> Vec<Listing> {
        let mut rng = rand::thread_rng();
        let (kinds, names) = sector_vocabulary(sector);
        (0..count)
            .map(|_| {
                let kind = kinds.choose(&mut rng).copied().unwrap_or(kinds[0]);
                let name = names.choose(&mut rng).copied().unwrap_or(names[0]);
                Listing {
                    name: format!("{kind} {name}"),
                    address: address(&mut rng, None, city),
                    phone: Some(phone(&mut rng)),
                    source: SIMULATED_SOURCE.to_string(),
                    access_control: AccessControlType::Business,
                    units: None,
                    towers: None,
                    built_year: Some(rng.gen_range(1975..=2020)),
                    sector: Some(sector),
                    captured_at: Utc::now(),
                }
            })
            .collect()
    }
}

// Suffix keeps generated names distinct enough for the (name, city) dedup key.
fn roman(value: usize) -> &'static str {
    const NUMERALS: &[&str] = &[
        "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
        "XV", "XVI", "XVII", "XVIII", "XIX", "XX",
    ];
    NUMERALS[(value - 1) % NUMERALS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_exact_count_of_tagged_condominiums() {
        let simulator = ListingSimulator;
        let listings = simulator.condominiums("Santos", Some("Gonzaga"), 12);
        assert_eq!(listings.len(), 12);
        for listing in &listings {
            assert_eq!(listing.source, SIMULATED_SOURCE);
            assert!(listing.address.contains("Gonzaga"));
            assert!(listing.address.contains("Santos"));
            let units = listing.units.expect("condos carry unit counts");
            assert!((20..=220).contains(&units));
            let towers = listing.towers.expect("condos carry tower counts");
            assert!((1..=4).contains(&towers));
            let year = listing.built_year.expect("condos carry build year");
            assert!((1975..=2020).contains(&year));
            let phone = listing.phone.as_deref().expect("phone present");
            assert!(phone.starts_with("(13) 3"));
        }
    }

    #[test]
    fn business_listings_follow_sector_vocabulary() {
        let simulator = ListingSimulator;
        let listings = simulator.businesses("Santos", BusinessSector::Food, 5);
        assert_eq!(listings.len(), 5);
        let (kinds, _) = sector_vocabulary(BusinessSector::Food);
        for listing in &listings {
            assert!(kinds.iter().any(|kind| listing.name.starts_with(kind)));
            assert_eq!(listing.access_control, AccessControlType::Business);
            assert_eq!(listing.sector, Some(BusinessSector::Food));
            assert!(listing.units.is_none());
        }
    }
}
