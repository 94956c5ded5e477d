use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::service::GenerationOutcome;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::{info, info_span};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn generate_maps(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationOutcome>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = info_span!("generate_maps", %request_id);
    info!(parent: &span, chars = request.text.len(), "generation requested");

    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        service.generate(&request.text)
    })
    .await
    .map_err(|err| ApiError::Internal(format!("generation task failed: {}", err)))??;

    Ok(Json(outcome))
}
