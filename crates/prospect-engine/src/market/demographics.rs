use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

/// Resolves the latest population estimate for a geographic registry code.
///
/// Implementations never fail: 0 means "unknown", not "zero population", and
/// callers must treat it that way.
#[async_trait]
pub trait PopulationProvider: Send + Sync {
    async fn population(&self, code: &str) -> u64;
}

/// Client for the IBGE population-projection API.
pub struct IbgeClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProjectionResponse {
    projecao: Projection,
}

#[derive(Debug, Deserialize)]
struct Projection {
    populacao: u64,
}

impl IbgeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, code: &str) -> Result<u64, reqwest::Error> {
        let url = format!(
            "{}/api/v1/projecoes/populacao/{}",
            self.base_url.trim_end_matches('/'),
            code
        );
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: ProjectionResponse = response.json().await?;
        Ok(body.projecao.populacao)
    }
}

#[async_trait]
impl PopulationProvider for IbgeClient {
    /// Single best-effort attempt; any transport error, non-2xx status, or
    /// malformed body degrades to 0.
    async fn population(&self, code: &str) -> u64 {
        match self.fetch(code).await {
            Ok(population) => population,
            Err(err) => {
                warn!(%code, error = %err, "population lookup degraded to 0");
                0
            }
        }
    }
}

/// Fixed population table for offline demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPopulation {
    entries: Vec<(String, u64)>,
}

impl StaticPopulation {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self { entries }
    }

    /// 2024-vintage estimates for the Baixada Santista registry codes.
    pub fn reference() -> Self {
        Self::new(vec![
            ("3548500".to_string(), 433_656),
            ("3551009".to_string(), 368_355),
            ("3518701".to_string(), 322_750),
            ("3541000".to_string(), 349_935),
            ("3513504".to_string(), 112_843),
        ])
    }
}

#[async_trait]
impl PopulationProvider for StaticPopulation {
    async fn population(&self, code: &str) -> u64 {
        self.entries
            .iter()
            .find(|(entry_code, _)| entry_code == code)
            .map(|(_, population)| *population)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_zero_for_unknown_code() {
        let provider = StaticPopulation::reference();
        assert_eq!(provider.population("0000000").await, 0);
        assert_eq!(provider.population("3548500").await, 433_656);
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_zero() {
        let client = IbgeClient::new("http://127.0.0.1:1", Duration::from_millis(200));
        assert_eq!(client.population("3548500").await, 0);
    }
}
