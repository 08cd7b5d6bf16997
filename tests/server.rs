use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;
use tower::util::ServiceExt;

use matchday_signals::config::AppConfig;
use matchday_signals::domain::{Fixture, MatchResult, Score, TeamRef};
use matchday_signals::football_data::MatchProvider;
use matchday_signals::server::{BANNER, build_router};
use matchday_signals::service::PredictionService;

struct StubProvider {
    fail: bool,
}

impl MatchProvider for StubProvider {
    fn scheduled(&self, _limit: usize) -> Result<Vec<Fixture>> {
        if self.fail {
            return Err(anyhow::anyhow!("http 403: invalid token"));
        }
        Ok(vec![Fixture {
            id: 1,
            home: TeamRef::new(1, "Alpha"),
            away: TeamRef::new(2, "Omega"),
            competition: "Bundesliga".to_string(),
            kickoff: Utc.with_ymd_and_hms(2024, 4, 6, 13, 30, 0).unwrap(),
        }])
    }

    fn finished(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<MatchResult>> {
        Ok((1..=4u32)
            .map(|d| MatchResult {
                id: d as u64,
                home: TeamRef::new(if d % 2 == 0 { 1 } else { 2 }, "x"),
                away: TeamRef::new(if d % 2 == 0 { 2 } else { 1 }, "y"),
                competition: "Bundesliga".to_string(),
                kickoff: Utc.with_ymd_and_hms(2024, 3, d, 15, 0, 0).unwrap(),
                score: Some(Score { home: 1, away: 1 }),
            })
            .collect())
    }

    fn raw_matches(&self) -> Result<String> {
        if self.fail {
            return Err(anyhow::anyhow!("http 403: invalid token"));
        }
        Ok(r#"{"matches":[{"id":1}]}"#.to_string())
    }
}

fn app(fail: bool, drop_unqualified: bool) -> axum::Router {
    let cfg = AppConfig {
        drop_unqualified,
        ..AppConfig::default()
    };
    build_router(Arc::new(PredictionService::new(StubProvider { fail }, &cfg)))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn root_reports_running() {
    let (status, body) = get(app(false, true), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), BANNER);
}

#[tokio::test]
async fn predictions_are_a_json_array() {
    let (status, body) = get(app(false, false), "/predictions").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    let rows = v.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["match"], "Alpha vs Omega");
    assert_eq!(rows[0]["prediction"], "No Edge");
    assert_eq!(rows[0]["home_form"]["draws"], 4);
}

#[tokio::test]
async fn unqualified_fixtures_are_filtered_out() {
    let (status, body) = get(app(false, true), "/predictions").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, Value::Array(Vec::new()));
}

#[tokio::test]
async fn provider_failure_is_a_500_with_error_body() {
    let (status, body) = get(app(true, true), "/predictions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"], "prediction computation failed");
}

#[tokio::test]
async fn matches_passes_the_body_through() {
    let (status, body) = get(app(false, true), "/matches").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["matches"][0]["id"], 1);

    let (status, body) = get(app(true, true), "/matches").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"], "failed to fetch matches");
}
