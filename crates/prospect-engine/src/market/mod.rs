//! Region intelligence: demographic and crime inputs, zone reference data,
//! and the opportunity scorer that blends them into comparable indices.

pub mod crime;
pub mod demographics;
pub mod scoring;
pub mod stats;
pub mod zones;

pub use crime::{CrimeSnapshot, CrimeTable};
pub use demographics::{IbgeClient, PopulationProvider, StaticPopulation};
pub use scoring::opportunity_index;
pub use stats::{Municipality, MunicipalityRef, RegionStats, RegionStatsService};
pub use zones::{Zone, ZoneCatalog, ZoneCategory};
