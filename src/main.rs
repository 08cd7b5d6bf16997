use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use matchday_signals::config::AppConfig;
use matchday_signals::football_data::FootballDataClient;
use matchday_signals::server::build_router;
use matchday_signals::service::PredictionService;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("matchday_signals=info")),
        )
        .init();

    let cfg = AppConfig::from_env();
    if cfg.api_key.is_empty() {
        warn!("FOOTBALL_DATA_KEY is not set; provider calls will be rejected");
    }

    let provider =
        FootballDataClient::new(cfg.base_url.clone(), cfg.api_key.clone(), cfg.http_timeout);
    let service = Arc::new(PredictionService::new(provider, &cfg));
    let app = build_router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, model = %cfg.engine.model, "server running");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
