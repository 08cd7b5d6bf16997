use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::PredictionError;
use crate::football_data::MatchProvider;
use crate::predict::PredictionResult;
use crate::service::PredictionService;
use crate::ttl_cache::Clock;

pub const BANNER: &str = "Football VIP Backend Running";

pub fn build_router<P, C>(service: Arc<PredictionService<P, C>>) -> Router
where
    P: MatchProvider + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/", get(|| async { BANNER }))
        .route("/matches", get(matches::<P, C>))
        .route("/predictions", get(predictions::<P, C>))
        .with_state(service)
}

async fn predictions<P, C>(
    State(service): State<Arc<PredictionService<P, C>>>,
) -> Result<Json<Vec<PredictionResult>>, PredictionError>
where
    P: MatchProvider + 'static,
    C: Clock + 'static,
{
    // The provider client is blocking; keep it off the async workers.
    let out = tokio::task::spawn_blocking(move || service.predictions())
        .await
        .map_err(|err| PredictionError::Worker(err.to_string()))??;
    Ok(Json(out))
}

async fn matches<P, C>(
    State(service): State<Arc<PredictionService<P, C>>>,
) -> Result<impl IntoResponse, PredictionError>
where
    P: MatchProvider + 'static,
    C: Clock + 'static,
{
    let body = tokio::task::spawn_blocking(move || service.raw_matches())
        .await
        .map_err(|err| PredictionError::Worker(err.to_string()))??;
    Ok(([(CONTENT_TYPE, "application/json")], body))
}
