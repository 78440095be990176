//! Prospecting intelligence engine for a physical-security services company.
//!
//! The crate turns public demographic and crime data plus scraped business
//! listings into ranked sales leads, visit routes, and a persisted prospect
//! pipeline. Everything upstream of the prospect store is stateless
//! computation over fetched or scraped inputs; the store is the durable sink.

pub mod acquisition;
pub mod config;
pub mod error;
pub mod leads;
pub mod market;
pub mod prospects;
pub mod telemetry;
