use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProspectRepository};
use crate::routes::{with_engine_routes, MarketState};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use prospect_engine::acquisition::ListingAcquirer;
use prospect_engine::config::AppConfig;
use prospect_engine::error::AppError;
use prospect_engine::leads::LeadGenerator;
use prospect_engine::market::{CrimeTable, IbgeClient, RegionStatsService, ZoneCatalog};
use prospect_engine::prospects::ProspectService;
use prospect_engine::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let populations = Arc::new(IbgeClient::new(
        config.acquisition.demographics_base_url.clone(),
        config.acquisition.source_timeout,
    ));
    let market = Arc::new(MarketState {
        statistics: RegionStatsService::new(populations, Arc::new(CrimeTable::reference())),
        leads: LeadGenerator::new(Arc::new(ZoneCatalog::reference())),
    });

    let repository = Arc::new(InMemoryProspectRepository::default());
    let acquirer = Arc::new(ListingAcquirer::from_config(&config.acquisition));
    let prospect_service = Arc::new(ProspectService::new(repository, acquirer));

    let app = with_engine_routes(market, prospect_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "prospecting intelligence engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
