//! Lead generation and visit planning over the zone reference data.

pub mod domain;
pub mod generator;
pub mod route;
pub mod seasonality;

pub use domain::{Lead, PriorityTier};
pub use generator::LeadGenerator;
pub use route::{plan_route, Route, RouteStop};
pub use seasonality::{seasonality_report, MonthOutlook, SeasonalityReport};
