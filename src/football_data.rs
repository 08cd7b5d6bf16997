use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Fixture, MatchResult, Score, TeamRef};
use crate::http_client::http_client;

const AUTH_HEADER: &str = "X-Auth-Token";

pub trait MatchProvider: Send + Sync {
    fn scheduled(&self, limit: usize) -> Result<Vec<Fixture>>;
    fn finished(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<MatchResult>>;
    fn raw_matches(&self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct FootballDataClient {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl FootballDataClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    fn get(&self, url: &str) -> Result<String> {
        let client = http_client(self.timeout)?;
        debug!(url, "football-data request");
        let resp = client
            .get(url)
            .header(AUTH_HEADER, &self.api_key)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            warn!(%status, url, "football-data returned an error");
            return Err(anyhow::anyhow!("http {}: {}", status, body));
        }
        Ok(body)
    }
}

impl MatchProvider for FootballDataClient {
    fn scheduled(&self, limit: usize) -> Result<Vec<Fixture>> {
        let url = format!("{}/matches?status=SCHEDULED", self.base_url);
        let body = self.get(&url).context("scheduled matches request failed")?;
        let mut fixtures = parse_scheduled_json(&body)?;
        fixtures.truncate(limit);
        Ok(fixtures)
    }

    fn finished(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<MatchResult>> {
        let url = format!(
            "{}/matches?status=FINISHED&dateFrom={}&dateTo={}",
            self.base_url,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        );
        let body = self.get(&url).context("finished matches request failed")?;
        parse_finished_json(&body)
    }

    fn raw_matches(&self) -> Result<String> {
        let url = format!("{}/matches", self.base_url);
        self.get(&url).context("matches request failed")
    }
}

/// Walks backwards from `today` in `chunk_days` windows, dropping duplicate match ids.
pub fn collect_history<P>(
    provider: &P,
    today: NaiveDate,
    days: i64,
    chunk_days: i64,
) -> Result<Vec<MatchResult>>
where
    P: MatchProvider + ?Sized,
{
    let chunk_days = chunk_days.max(1);
    let earliest = today - ChronoDuration::days(days.max(0));
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut end = today;

    while end > earliest {
        let start = (end - ChronoDuration::days(chunk_days)).max(earliest);
        let chunk = provider
            .finished(start, end)
            .with_context(|| format!("history chunk {start}..{end} failed"))?;
        debug!(%start, %end, matches = chunk.len(), "history chunk");
        for m in chunk {
            if seen.insert(m.id) {
                out.push(m);
            }
        }
        end = start;
    }

    Ok(out)
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    id: u64,
    utc_date: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    competition: Option<ApiCompetition>,
    home_team: ApiTeam,
    away_team: ApiTeam,
    #[serde(default)]
    score: Option<ApiScore>,
}

#[derive(Debug, Deserialize)]
struct ApiCompetition {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeam {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiScore {
    #[serde(default)]
    full_time: Option<ApiGoals>,
}

#[derive(Debug, Deserialize)]
struct ApiGoals {
    #[serde(default)]
    home: Option<u8>,
    #[serde(default)]
    away: Option<u8>,
}

pub fn parse_scheduled_json(raw: &str) -> Result<Vec<Fixture>> {
    let data = parse_matches_response(raw)?;
    Ok(data.matches.into_iter().filter_map(to_fixture).collect())
}

pub fn parse_finished_json(raw: &str) -> Result<Vec<MatchResult>> {
    let data = parse_matches_response(raw)?;
    Ok(data
        .matches
        .into_iter()
        .filter(|m| {
            m.status
                .as_deref()
                .is_none_or(|s| s.eq_ignore_ascii_case("FINISHED"))
        })
        .filter_map(to_match_result)
        .collect())
}

fn parse_matches_response(raw: &str) -> Result<MatchesResponse> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(MatchesResponse {
            matches: Vec::new(),
        });
    }
    serde_json::from_str(trimmed).context("invalid football-data json")
}

fn to_fixture(m: ApiMatch) -> Option<Fixture> {
    Some(Fixture {
        id: m.id,
        home: team_ref(&m.home_team)?,
        away: team_ref(&m.away_team)?,
        competition: competition_name(m.competition.as_ref()),
        kickoff: parse_utc(&m.utc_date)?,
    })
}

fn to_match_result(m: ApiMatch) -> Option<MatchResult> {
    Some(MatchResult {
        id: m.id,
        home: team_ref(&m.home_team)?,
        away: team_ref(&m.away_team)?,
        competition: competition_name(m.competition.as_ref()),
        kickoff: parse_utc(&m.utc_date)?,
        score: m.score.as_ref().and_then(full_time_score),
    })
}

// Both sides missing means the score is not published yet; a single missing side counts as 0.
fn full_time_score(score: &ApiScore) -> Option<Score> {
    let ft = score.full_time.as_ref()?;
    match (ft.home, ft.away) {
        (None, None) => None,
        (home, away) => Some(Score {
            home: home.unwrap_or(0),
            away: away.unwrap_or(0),
        }),
    }
}

fn team_ref(team: &ApiTeam) -> Option<TeamRef> {
    let id = team.id?;
    let name = team
        .name
        .as_deref()
        .and_then(non_empty)
        .or_else(|| team.short_name.as_deref().and_then(non_empty))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Team {id}"));
    Some(TeamRef { id, name })
}

fn competition_name(competition: Option<&ApiCompetition>) -> String {
    competition
        .and_then(|c| c.name.as_deref())
        .and_then(non_empty)
        .unwrap_or("Unknown")
        .to_string()
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
