use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use prospect_engine::acquisition::ListingProvider;
use prospect_engine::leads::{
    plan_route, seasonality_report, Lead, LeadGenerator, Route, SeasonalityReport,
};
use prospect_engine::market::{PopulationProvider, RegionStats, RegionStatsService};
use prospect_engine::prospects::{prospect_router, ProspectRepository, ProspectService};

/// Read-model services shared by the market intelligence endpoints.
pub(crate) struct MarketState<P> {
    pub(crate) statistics: RegionStatsService<P>,
    pub(crate) leads: LeadGenerator,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoutePlanRequest {
    pub(crate) municipality: String,
    #[serde(default)]
    pub(crate) max_visits: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoutePlanResponse {
    pub(crate) municipality: String,
    pub(crate) leads_considered: usize,
    pub(crate) route: Route,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeasonalityQuery {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date: Option<NaiveDate>,
}

const DEFAULT_MAX_VISITS: usize = 5;

pub(crate) fn with_engine_routes<P, R, A>(
    market: Arc<MarketState<P>>,
    prospects: Arc<ProspectService<R, A>>,
) -> axum::Router
where
    P: PopulationProvider + 'static,
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    prospect_router(prospects)
        .merge(market_router(market))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

fn market_router<P>(market: Arc<MarketState<P>>) -> axum::Router
where
    P: PopulationProvider + 'static,
{
    axum::Router::new()
        .route(
            "/api/v1/market/regions/:region/statistics",
            axum::routing::get(region_statistics_endpoint::<P>),
        )
        .route(
            "/api/v1/market/municipalities/:municipality/leads",
            axum::routing::get(municipality_leads_endpoint::<P>),
        )
        .route(
            "/api/v1/market/routes",
            axum::routing::post(route_plan_endpoint::<P>),
        )
        .route(
            "/api/v1/market/seasonality",
            axum::routing::get(seasonality_endpoint),
        )
        .with_state(market)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn region_statistics_endpoint<P>(
    State(market): State<Arc<MarketState<P>>>,
    Path(region): Path<String>,
) -> Json<RegionStats>
where
    P: PopulationProvider + 'static,
{
    Json(market.statistics.region_statistics(&region).await)
}

pub(crate) async fn municipality_leads_endpoint<P>(
    State(market): State<Arc<MarketState<P>>>,
    Path(municipality): Path<String>,
) -> Json<Vec<Lead>>
where
    P: PopulationProvider + 'static,
{
    Json(market.leads.leads_for_municipality(&municipality))
}

pub(crate) async fn route_plan_endpoint<P>(
    State(market): State<Arc<MarketState<P>>>,
    Json(payload): Json<RoutePlanRequest>,
) -> Json<RoutePlanResponse>
where
    P: PopulationProvider + 'static,
{
    let RoutePlanRequest {
        municipality,
        max_visits,
    } = payload;

    let leads = market.leads.leads_for_municipality(&municipality);
    let route = plan_route(&leads, max_visits.unwrap_or(DEFAULT_MAX_VISITS));

    Json(RoutePlanResponse {
        municipality,
        leads_considered: leads.len(),
        route,
    })
}

pub(crate) async fn seasonality_endpoint(
    Query(query): Query<SeasonalityQuery>,
) -> Json<SeasonalityReport> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    Json(seasonality_report(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospect_engine::market::{CrimeTable, StaticPopulation, ZoneCatalog};

    fn market_state() -> Arc<MarketState<StaticPopulation>> {
        Arc::new(MarketState {
            statistics: RegionStatsService::new(
                Arc::new(StaticPopulation::reference()),
                Arc::new(CrimeTable::reference()),
            ),
            leads: LeadGenerator::new(Arc::new(ZoneCatalog::reference())),
        })
    }

    #[tokio::test]
    async fn region_statistics_endpoint_scores_the_reference_region() {
        let Json(stats) = region_statistics_endpoint(
            State(market_state()),
            Path("baixada_santista".to_string()),
        )
        .await;

        assert_eq!(stats.municipalities.len(), 5);
        assert!(stats
            .municipalities
            .iter()
            .all(|entry| entry.opportunity_index > 0.0));
    }

    #[tokio::test]
    async fn municipality_leads_endpoint_covers_santos() {
        let Json(leads) =
            municipality_leads_endpoint(State(market_state()), Path("Santos".to_string())).await;
        assert!(!leads.is_empty());
        assert!(leads.iter().all(|lead| lead.municipality == "Santos"));
    }

    #[tokio::test]
    async fn route_plan_endpoint_applies_the_default_cap() {
        let Json(body) = route_plan_endpoint(
            State(market_state()),
            Json(RoutePlanRequest {
                municipality: "Santos".to_string(),
                max_visits: None,
            }),
        )
        .await;

        assert_eq!(body.municipality, "Santos");
        assert_eq!(body.leads_considered, 5);
        assert_eq!(body.route.stops.len(), 5);
    }

    #[tokio::test]
    async fn seasonality_endpoint_accepts_an_explicit_date() {
        let Json(report) = seasonality_endpoint(Query(SeasonalityQuery {
            date: NaiveDate::from_ymd_opt(2026, 12, 1),
        }))
        .await;

        assert_eq!(report.current_month.label, "December");
        assert!(report.peak_months.contains(&"December"));
    }
}
