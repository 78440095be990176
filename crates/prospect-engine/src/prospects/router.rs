use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::acquisition::ListingProvider;

use super::domain::{ProspectDraft, ProspectFilters, ProspectId, ProspectUpdate};
use super::repository::{ProspectRepository, RepositoryError};
use super::service::{ProspectService, ProspectServiceError, ScrapeParams};

/// Router builder exposing the prospect pipeline endpoints.
pub fn prospect_router<R, A>(service: Arc<ProspectService<R, A>>) -> Router
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/prospects",
            post(create_handler::<R, A>).get(list_handler::<R, A>),
        )
        .route(
            "/api/v1/prospects/statistics",
            get(statistics_handler::<R, A>),
        )
        .route("/api/v1/prospects/scrape", post(scrape_handler::<R, A>))
        .route(
            "/api/v1/prospects/:prospect_id",
            get(get_handler::<R, A>)
                .patch(update_handler::<R, A>)
                .delete(delete_handler::<R, A>),
        )
        .with_state(service)
}

fn error_response(error: ProspectServiceError) -> Response {
    let status = match &error {
        ProspectServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ProspectServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProspectServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
    axum::Json(draft): axum::Json<ProspectDraft>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.create(draft) {
        Ok(prospect) => (StatusCode::CREATED, axum::Json(prospect)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
    Query(filters): Query<ProspectFilters>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.list(&filters) {
        Ok(prospects) => (StatusCode::OK, axum::Json(prospects)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
    Path(prospect_id): Path<String>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.get(&ProspectId(prospect_id)) {
        Ok(prospect) => (StatusCode::OK, axum::Json(prospect)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
    Path(prospect_id): Path<String>,
    axum::Json(update): axum::Json<ProspectUpdate>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.update(&ProspectId(prospect_id), update) {
        Ok(prospect) => (StatusCode::OK, axum::Json(prospect)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
    Path(prospect_id): Path<String>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.delete(&ProspectId(prospect_id)) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "deleted": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scrape_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
    axum::Json(params): axum::Json<ScrapeParams>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.scrape_and_create(params).await {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn statistics_handler<R, A>(
    State(service): State<Arc<ProspectService<R, A>>>,
) -> Response
where
    R: ProspectRepository + 'static,
    A: ListingProvider + 'static,
{
    match service.statistics() {
        Ok(statistics) => (StatusCode::OK, axum::Json(statistics)).into_response(),
        Err(error) => error_response(error),
    }
}
