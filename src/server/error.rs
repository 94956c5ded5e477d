use crate::error::ConceptMapError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] ConceptMapError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(err) => match err {
                ConceptMapError::TransientService(_) => StatusCode::SERVICE_UNAVAILABLE,
                ConceptMapError::Service(_) | ConceptMapError::Parse { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                ConceptMapError::Render(_) | ConceptMapError::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Pipeline(err) => err.kind(),
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_errors_map_to_5xx() {
        let cases = [
            (ConceptMapError::TransientService("429".into()), 503),
            (ConceptMapError::Service("down".into()), 502),
            (ConceptMapError::parse("bad json", "raw"), 502),
            (ConceptMapError::Render("dot".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), status);
        }
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_errors_do_not_leak_raw_output() {
        let err = ApiError::from(ConceptMapError::parse("missing main_concept", "SECRET RAW"));
        assert_eq!(err.kind(), "parse_error");
        assert!(!err.to_string().contains("SECRET RAW"));
    }
}
