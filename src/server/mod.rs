mod error;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::GenerateRequest;

use crate::service::ConceptMapService;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConceptMapService>,
}

pub fn create_router(state: AppState) -> Router {
    let images = ServeDir::new(state.service.output_dir());
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate_maps", post(handlers::generate_maps))
        .nest_service("/images", images)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(service: Arc<ConceptMapService>, addr: &str) -> Result<()> {
    let app = create_router(AppState { service });
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to bind {}", addr))?;
    info!(%addr, "concept mapper listening");
    axum::serve(listener, app).await.context("HTTP server stopped")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::MockLLMClient;
    use crate::service::tests::{mock_service, push_single_subconcept_run};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(mock: &MockLLMClient, dir: &std::path::Path) -> Router {
        create_router(AppState {
            service: Arc::new(mock_service(mock, dir)),
        })
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate_maps")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn index_serves_landing_page() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&MockLLMClient::new(), dir.path())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/generate_maps"));
    }

    #[tokio::test]
    async fn generate_maps_returns_summary_and_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockLLMClient::new();
        push_single_subconcept_run(&mock);

        let response = app(&mock, dir.path())
            .oneshot(post_json(r#"{"text": "Plants and light"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .starts_with("Photosynthesis Concepts Overview:"));
        assert_eq!(body["concept_maps"]["overview"], "concept_overview_map.png");
        assert_eq!(
            body["concept_maps"]["bloom_levels"]["Remember"],
            "concepts_remember_map.png"
        );
        assert_eq!(
            body["concept_maps"]["detailed"]["Definition"],
            "detailed_definition_map.png"
        );
        let generated_at = body["generated_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(generated_at).is_ok());
    }

    #[tokio::test]
    async fn pipeline_failures_become_structured_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockLLMClient::new();
        mock.push_response("this is not json");

        let response = app(&mock, dir.path())
            .oneshot(post_json(r#"{"text": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"], "parse_error");
        assert!(body["message"].as_str().unwrap().contains("main_concept")
            || body["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&MockLLMClient::new(), dir.path())
            .oneshot(post_json(r#"{"content": "wrong field"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn images_are_served_from_the_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("concept_overview_map.png"), b"png").unwrap();
        let router = app(&MockLLMClient::new(), dir.path());

        let found = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/images/concept_overview_map.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);

        let missing = router
            .oneshot(
                Request::builder()
                    .uri("/images/missing.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
