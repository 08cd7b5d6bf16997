use std::env;
use std::time::Duration;

use crate::predict::{EngineConfig, ScoringModel};

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
const DEFAULT_PORT: u16 = 10000;
const DEFAULT_UPCOMING_LIMIT: usize = 15;
const DEFAULT_HISTORY_DAYS: i64 = 90;
const DEFAULT_HISTORY_CHUNK_DAYS: i64 = 10;
const DEFAULT_HISTORY_CACHE_SECS: u64 = 3600;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub port: u16,
    pub upcoming_limit: usize,
    pub history_days: i64,
    pub history_chunk_days: i64,
    pub history_ttl: Duration,
    pub drop_unqualified: bool,
    pub http_timeout: Duration,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            history_days: DEFAULT_HISTORY_DAYS,
            history_chunk_days: DEFAULT_HISTORY_CHUNK_DAYS,
            history_ttl: Duration::from_secs(DEFAULT_HISTORY_CACHE_SECS),
            drop_unqualified: true,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FOOTBALL_DATA_KEY")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let base_url = lookup("FOOTBALL_DATA_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let port = lookup("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let upcoming_limit = lookup("UPCOMING_LIMIT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_UPCOMING_LIMIT)
            .clamp(1, 100);
        let history_days = lookup("HISTORY_DAYS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_HISTORY_DAYS)
            .clamp(1, 365);
        // football-data.org rejects date ranges longer than ten days.
        let history_chunk_days = lookup("HISTORY_CHUNK_DAYS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_HISTORY_CHUNK_DAYS)
            .clamp(1, 10);
        let history_cache_secs = lookup("HISTORY_CACHE_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HISTORY_CACHE_SECS);
        let model = lookup("SCORING_MODEL")
            .and_then(|v| v.parse::<ScoringModel>().ok())
            .unwrap_or_default();
        let drop_unqualified = env_bool(lookup("DROP_UNQUALIFIED"), true);
        let http_timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .clamp(1, 120);

        Self {
            api_key,
            base_url,
            port,
            upcoming_limit,
            history_days,
            history_chunk_days,
            history_ttl: Duration::from_secs(history_cache_secs),
            drop_unqualified,
            http_timeout: Duration::from_secs(http_timeout_secs),
            engine: EngineConfig {
                model,
                ..EngineConfig::default()
            },
        }
    }
}

fn env_bool(raw: Option<String>, default: bool) -> bool {
    raw.map(|v| {
        let t = v.trim().to_ascii_lowercase();
        !(t.is_empty() || t == "0" || t == "false" || t == "off" || t == "no")
    })
    .unwrap_or(default)
}
