use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction computation failed")]
    Upstream(#[source] anyhow::Error),
    #[error("failed to fetch matches")]
    MatchesUnavailable(#[source] anyhow::Error),
    #[error("worker task failed: {0}")]
    Worker(String),
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
