//! Tracing setup for the prospecting services. `RUST_LOG` wins over the
//! configured level so operators can raise verbosity without a config edit.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("'{value}' is not a valid tracing filter directive")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("could not install the tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

fn resolve_filter(configured_level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(configured_level).map_err(|source| TelemetryError::Filter {
        value: configured_level.to_string(),
        source,
    })
}

/// Installs the process-wide subscriber: compact single-line output, no
/// ANSI colour, targets suppressed. Fails if a subscriber is already set.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = resolve_filter(&config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_level_is_rejected_with_the_offending_value() {
        std::env::remove_var("RUST_LOG");
        match resolve_filter("not==a==directive") {
            Err(TelemetryError::Filter { value, .. }) => {
                assert_eq!(value, "not==a==directive");
            }
            other => panic!("expected a filter error, got {other:?}"),
        }
    }

    #[test]
    fn plain_level_names_are_accepted() {
        std::env::remove_var("RUST_LOG");
        assert!(resolve_filter("debug").is_ok());
        assert!(resolve_filter("prospect_engine=trace,info").is_ok());
    }
}
