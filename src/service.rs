use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::MatchResult;
use crate::error::PredictionError;
use crate::football_data::{self, MatchProvider};
use crate::predict::{self, EngineConfig, PredictionResult};
use crate::ttl_cache::{Clock, SystemClock, TtlCache};

const HISTORY_KEY: &str = "finished";

pub struct PredictionService<P, C = SystemClock> {
    provider: P,
    history: TtlCache<Arc<Vec<MatchResult>>, C>,
    engine: EngineConfig,
    upcoming_limit: usize,
    history_days: i64,
    history_chunk_days: i64,
    history_ttl: Duration,
    drop_unqualified: bool,
}

impl<P: MatchProvider> PredictionService<P, SystemClock> {
    pub fn new(provider: P, cfg: &AppConfig) -> Self {
        Self::with_clock(provider, cfg, SystemClock)
    }
}

impl<P: MatchProvider, C: Clock> PredictionService<P, C> {
    pub fn with_clock(provider: P, cfg: &AppConfig, clock: C) -> Self {
        Self {
            provider,
            history: TtlCache::with_clock(clock),
            engine: cfg.engine,
            upcoming_limit: cfg.upcoming_limit,
            history_days: cfg.history_days,
            history_chunk_days: cfg.history_chunk_days,
            history_ttl: cfg.history_ttl,
            drop_unqualified: cfg.drop_unqualified,
        }
    }

    pub fn predictions(&self) -> Result<Vec<PredictionResult>, PredictionError> {
        self.predictions_on(Utc::now().date_naive())
    }

    pub fn predictions_on(&self, today: NaiveDate) -> Result<Vec<PredictionResult>, PredictionError> {
        let fixtures = self
            .provider
            .scheduled(self.upcoming_limit)
            .map_err(|err| {
                warn!(error = %format!("{err:#}"), "scheduled fetch failed");
                PredictionError::Upstream(err)
            })?;
        let history = self.history(today)?;

        let out = predict::predict_all(&fixtures, &history, &self.engine, self.drop_unqualified);
        info!(
            fixtures = fixtures.len(),
            history = history.len(),
            signals = out.len(),
            model = %self.engine.model,
            "predictions computed"
        );
        Ok(out)
    }

    pub fn raw_matches(&self) -> Result<String, PredictionError> {
        self.provider.raw_matches().map_err(|err| {
            warn!(error = %format!("{err:#}"), "matches pass-through failed");
            PredictionError::MatchesUnavailable(err)
        })
    }

    fn history(&self, today: NaiveDate) -> Result<Arc<Vec<MatchResult>>, PredictionError> {
        self.history
            .get_or_refresh(HISTORY_KEY, self.history_ttl, || {
                info!(days = self.history_days, "refreshing finished-match history");
                football_data::collect_history(
                    &self.provider,
                    today,
                    self.history_days,
                    self.history_chunk_days,
                )
                .map(Arc::new)
            })
            .map_err(|err| {
                warn!(error = %format!("{err:#}"), "history fetch failed");
                PredictionError::Upstream(err)
            })
    }
}
