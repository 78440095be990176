use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};

use crate::prospects::domain::AccessControlType;

use super::domain::{guess_access_control, BusinessSector, Listing};

/// Query handed to a listing source.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub city: String,
    pub neighborhood: Option<String>,
    pub sector: Option<BusinessSector>,
    pub max_results: usize,
}

/// Failure of one source attempt; always caught locally by the acquirer and
/// treated as zero results from that source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unparseable page: {0}")]
    Parse(String),
}

/// A single external listing source.
#[async_trait]
pub trait ListingSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, SourceError>;
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|err| SourceError::Parse(err.to_string()))
}

fn text_of(element: &scraper::ElementRef<'_>, css: &str) -> Result<Option<String>, SourceError> {
    let selector = selector(css)?;
    Ok(element.select(&selector).next().map(|node| {
        node.text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }))
}

// Pulls the first integer out of fragments like "120 unidades".
fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|character| character.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Condominium directory source parsing `li.property-card` entries.
pub struct CondominiumDirectorySource {
    client: reqwest::Client,
    base_url: String,
}

impl CondominiumDirectorySource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    fn parse(&self, body: &str, query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
        let document = Html::parse_document(body);
        let card = selector("li.property-card")?;

        let mut listings = Vec::new();
        for element in document.select(&card).take(query.max_results) {
            let Some(name) = text_of(&element, "h2.property-name")? else {
                continue;
            };
            let address = text_of(&element, "span.address")?
                .unwrap_or_else(|| query.city.clone());
            let phone = text_of(&element, "span.phone")?;
            let details = text_of(&element, "p.details")?.unwrap_or_default();
            let units = text_of(&element, "span.units")?
                .as_deref()
                .and_then(leading_number);

            listings.push(Listing {
                name,
                address,
                phone,
                source: self.name().to_string(),
                access_control: guess_access_control(&details),
                units,
                towers: None,
                built_year: None,
                sector: None,
                captured_at: Utc::now(),
            });
        }
        Ok(listings)
    }
}

#[async_trait]
impl ListingSource for CondominiumDirectorySource {
    fn name(&self) -> &'static str {
        "condominium_directory"
    }

    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
        let mut url = format!(
            "{}/condominios/{}",
            self.base_url.trim_end_matches('/'),
            slug(&query.city)
        );
        if let Some(neighborhood) = &query.neighborhood {
            url.push('/');
            url.push_str(&slug(neighborhood));
        }

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.parse(&body, query)
    }
}

/// Generic business directory source parsing `div.result-card` entries.
pub struct BusinessDirectorySource {
    client: reqwest::Client,
    base_url: String,
}

impl BusinessDirectorySource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    fn parse(&self, body: &str, query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
        let document = Html::parse_document(body);
        let card = selector("div.result-card")?;

        let mut listings = Vec::new();
        for element in document.select(&card).take(query.max_results) {
            let Some(name) = text_of(&element, "h3.result-title")? else {
                continue;
            };
            let address = text_of(&element, "p.result-address")?
                .unwrap_or_else(|| query.city.clone());
            let phone = text_of(&element, "span.result-phone")?;

            let access_control = if query.sector.is_some() {
                AccessControlType::Business
            } else {
                let details = text_of(&element, "p.result-details")?.unwrap_or_default();
                guess_access_control(&details)
            };

            listings.push(Listing {
                name,
                address,
                phone,
                source: self.name().to_string(),
                access_control,
                units: None,
                towers: None,
                built_year: None,
                sector: query.sector,
                captured_at: Utc::now(),
            });
        }
        Ok(listings)
    }
}

#[async_trait]
impl ListingSource for BusinessDirectorySource {
    fn name(&self) -> &'static str {
        "business_directory"
    }

    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
        let segment = query
            .sector
            .map(|sector| sector.label())
            .unwrap_or("condominios");
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            segment,
            slug(&query.city)
        );

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.parse(&body, query)
    }
}

fn slug(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|character| if character.is_whitespace() { '-' } else { character })
        .collect()
}
