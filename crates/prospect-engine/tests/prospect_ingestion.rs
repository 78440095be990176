//! End-to-end scenarios for prospect ingestion: scraping with the synthetic
//! fallback, lifecycle updates over HTTP, and the statistics rollup, all
//! exercised through the public service facade and router.

mod common {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use prospect_engine::acquisition::ListingAcquirer;
    use prospect_engine::prospects::{
        Prospect, ProspectFilters, ProspectId, ProspectPatch, ProspectRepository,
        ProspectService, RepositoryError,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<Vec<Prospect>>>,
    }

    impl ProspectRepository for MemoryRepository {
        fn insert(&self, prospect: Prospect) -> Result<Prospect, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.push(prospect.clone());
            Ok(prospect)
        }

        fn find(
            &self,
            filters: &ProspectFilters,
            limit: usize,
        ) -> Result<Vec<Prospect>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            let mut matched: Vec<Prospect> = guard
                .iter()
                .filter(|prospect| filters.matches(prospect))
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            matched.truncate(limit);
            Ok(matched)
        }

        fn fetch(&self, id: &ProspectId) -> Result<Option<Prospect>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.iter().find(|prospect| &prospect.id == id).cloned())
        }

        fn apply(
            &self,
            id: &ProspectId,
            patch: ProspectPatch,
        ) -> Result<Prospect, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            let prospect = guard
                .iter_mut()
                .find(|prospect| &prospect.id == id)
                .ok_or(RepositoryError::NotFound)?;
            patch.apply_to(prospect);
            Ok(prospect.clone())
        }

        fn delete(&self, id: &ProspectId) -> Result<bool, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            let before = guard.len();
            guard.retain(|prospect| &prospect.id != id);
            Ok(guard.len() < before)
        }

        fn count(&self, filters: &ProspectFilters) -> Result<u64, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard
                .iter()
                .filter(|prospect| filters.matches(prospect))
                .count() as u64)
        }
    }

    /// Service wired to an acquirer with no live sources: every scrape
    /// exercises the synthetic fallback path.
    pub(super) fn build_service() -> (
        Arc<ProspectService<MemoryRepository, ListingAcquirer>>,
        Arc<MemoryRepository>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let acquirer = Arc::new(ListingAcquirer::new(
            Vec::new(),
            Duration::from_millis(50),
        ));
        let service = Arc::new(ProspectService::new(repository.clone(), acquirer));
        (service, repository)
    }
}

mod ingestion {
    use super::common::*;
    use prospect_engine::prospects::{
        InterestStage, Origin, ProspectFilters, ProspectRepository, ScrapeParams,
    };

    fn params(city: &str, max_results: usize) -> ScrapeParams {
        ScrapeParams {
            city: city.to_string(),
            neighborhood: None,
            kind: None,
            sector: None,
            access_control: None,
            max_results: Some(max_results),
        }
    }

    #[tokio::test]
    async fn dead_sources_still_fill_the_pipeline() {
        let (service, repository) = build_service();

        let summary = service
            .scrape_and_create(params("Santos", 8))
            .await
            .expect("scrape succeeds");

        assert!(summary.simulated);
        assert_eq!(summary.scraped, 8);
        assert!(summary.created >= 1);
        assert_eq!(
            repository.count(&ProspectFilters::default()).expect("count"),
            summary.created as u64
        );
        for prospect in &summary.prospects {
            assert_eq!(prospect.origin, Origin::Scraping);
            assert_eq!(prospect.interest_stage, InterestStage::NotContacted);
            assert_eq!(prospect.city, "Santos");
        }
    }

    #[tokio::test]
    async fn repeated_scrapes_only_add_new_names() {
        let (service, repository) = build_service();

        let first = service
            .scrape_and_create(params("Guarujá", 5))
            .await
            .expect("scrape succeeds");
        let total_after_first = repository
            .count(&ProspectFilters::default())
            .expect("count");
        assert_eq!(total_after_first, first.created as u64);

        let second = service
            .scrape_and_create(params("Guarujá", 5))
            .await
            .expect("scrape succeeds");
        let total_after_second = repository
            .count(&ProspectFilters::default())
            .expect("count");
        assert_eq!(total_after_second, (first.created + second.created) as u64);
    }
}

mod lifecycle_over_http {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use prospect_engine::prospects::prospect_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn scraped_prospects_can_be_advanced_and_counted() {
        let (service, _) = build_service();
        let router = prospect_router(service);

        let scrape = router
            .clone()
            .oneshot(post(
                "/api/v1/prospects/scrape",
                json!({ "city": "Santos", "max_results": 4 }),
            ))
            .await
            .expect("router dispatch");
        assert_eq!(scrape.status(), StatusCode::OK);
        let summary = json_body(scrape).await;
        assert_eq!(summary["simulated"], true);
        let first_id = summary["prospects"][0]["id"]
            .as_str()
            .expect("prospect id")
            .to_string();

        let patched = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/api/v1/prospects/{first_id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "interest_stage": "interested",
                            "action": "left a voicemail with the syndic",
                            "actor": "rep.ana"
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(patched.status(), StatusCode::OK);
        let updated = json_body(patched).await;
        assert_eq!(updated["interest_stage"], "interested");
        let history = updated["history"].as_array().expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1]["actor"], "rep.ana");

        let statistics = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/prospects/statistics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(statistics.status(), StatusCode::OK);
        let rollup = json_body(statistics).await;
        assert_eq!(rollup["by_interest_stage"]["interested"], 1);
        assert_eq!(
            rollup["total"].as_u64().expect("total"),
            rollup["by_city"]["Santos"].as_u64().expect("santos count")
        );
    }
}
