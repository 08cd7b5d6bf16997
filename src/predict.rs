use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Fixture, MatchResult};
use crate::form::{self, FORM_WINDOW, FormSummary};
use crate::league_params;
use crate::poisson::{self, Bucket, ConfidenceTier, ExpectedGoals, Markets, OutcomeProbs};
use crate::qualification::{self, GateConfig, Side};
use crate::strength::{self, StrengthCall, StrengthOutlook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringModel {
    #[default]
    Combined,
    Form,
    ExpectedGoals,
    Strength,
}

impl ScoringModel {
    pub fn uses_gate(self) -> bool {
        matches!(self, ScoringModel::Combined | ScoringModel::Form)
    }
}

impl FromStr for ScoringModel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(ScoringModel::Combined),
            "form" | "threshold" => Ok(ScoringModel::Form),
            "expected-goals" | "expected_goals" | "xg" | "poisson" => {
                Ok(ScoringModel::ExpectedGoals)
            }
            "strength" => Ok(ScoringModel::Strength),
            other => Err(format!("unknown scoring model: {other}")),
        }
    }
}

impl fmt::Display for ScoringModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoringModel::Combined => "combined",
            ScoringModel::Form => "form",
            ScoringModel::ExpectedGoals => "expected-goals",
            ScoringModel::Strength => "strength",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub window: usize,
    pub model: ScoringModel,
    pub gate: GateConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: FORM_WINDOW,
            model: ScoringModel::default(),
            gate: GateConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeLabel {
    #[serde(rename = "Home Win")]
    HomeWin,
    #[serde(rename = "Away Win")]
    AwayWin,
    Draw,
    #[serde(rename = "No Edge")]
    NoEdge,
    #[serde(rename = "Lean Home")]
    LeanHome,
    #[serde(rename = "Lean Away")]
    LeanAway,
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutcomeLabel::HomeWin => "Home Win",
            OutcomeLabel::AwayWin => "Away Win",
            OutcomeLabel::Draw => "Draw",
            OutcomeLabel::NoEdge => "No Edge",
            OutcomeLabel::LeanHome => "Lean Home",
            OutcomeLabel::LeanAway => "Lean Away",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(rename = "match")]
    pub fixture: String,
    pub fixture_id: u64,
    pub home_team: String,
    pub away_team: String,
    pub competition: String,
    pub kickoff: DateTime<Utc>,
    pub home_form: FormSummary,
    pub away_form: FormSummary,
    pub home_h2h: FormSummary,
    pub away_h2h: FormSummary,
    pub qualified: bool,
    pub prediction: OutcomeLabel,
    pub confidence: u8,
    pub rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<OutcomeProbs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_goals: Option<ExpectedGoals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markets: Option<Markets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ConfidenceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<StrengthOutlook>,
}

pub fn predict(fixture: &Fixture, history: &[MatchResult], cfg: &EngineConfig) -> PredictionResult {
    let home_id = fixture.home.id;
    let away_id = fixture.away.id;

    let home_recent = form::recent_matches(home_id, history, cfg.window);
    let away_recent = form::recent_matches(away_id, history, cfg.window);
    let meetings = form::head_to_head(home_id, away_id, history, cfg.window);

    let home_form = form::summarize(home_id, &home_recent);
    let away_form = form::summarize(away_id, &away_recent);
    let home_h2h = form::summarize(home_id, &meetings);
    let away_h2h = form::summarize(away_id, &meetings);

    let mut out = PredictionResult {
        fixture: fixture.label(),
        fixture_id: fixture.id,
        home_team: fixture.home.name.clone(),
        away_team: fixture.away.name.clone(),
        competition: fixture.competition.clone(),
        kickoff: fixture.kickoff,
        home_form,
        away_form,
        home_h2h,
        away_h2h,
        qualified: true,
        prediction: OutcomeLabel::NoEdge,
        confidence: 0,
        rating: String::new(),
        probabilities: None,
        expected_goals: None,
        markets: None,
        tier: None,
        strength: None,
    };

    if matches!(cfg.model, ScoringModel::Combined | ScoringModel::ExpectedGoals) {
        let home_rates = form::recency_rates(home_id, &home_recent);
        let away_rates = form::recency_rates(away_id, &away_recent);
        let params = league_params::params_for(&fixture.competition);
        let xg = poisson::expected_goals(home_rates, away_rates, params.home_advantage);
        let outlook = poisson::outlook(xg);

        out.probabilities = Some(outlook.probabilities);
        out.expected_goals = Some(outlook.expected_goals);
        out.markets = Some(outlook.markets);
        out.tier = Some(outlook.tier);

        if cfg.model == ScoringModel::ExpectedGoals {
            let (label, p) = match outlook.pick {
                Bucket::Home => (OutcomeLabel::HomeWin, outlook.probabilities.home),
                Bucket::Away => (OutcomeLabel::AwayWin, outlook.probabilities.away),
                Bucket::Draw => (OutcomeLabel::Draw, outlook.probabilities.draw),
            };
            out.prediction = label;
            out.confidence = p.round().clamp(0.0, 100.0) as u8;
        }
    }

    if cfg.model.uses_gate() {
        let verdict =
            qualification::evaluate(&home_form, &home_h2h, &away_form, &away_h2h, &cfg.gate);
        out.qualified = verdict.qualified();
        out.prediction = match verdict.winner {
            Some(Side::Home) => OutcomeLabel::HomeWin,
            Some(Side::Away) => OutcomeLabel::AwayWin,
            None => OutcomeLabel::NoEdge,
        };
        out.confidence = verdict.confidence;

        // The tier has to rate the declared outcome, not the Poisson plurality.
        if cfg.model == ScoringModel::Combined {
            out.tier = out.probabilities.and_then(|p| match out.prediction {
                OutcomeLabel::HomeWin => Some(poisson::tier_for(p.home)),
                OutcomeLabel::AwayWin => Some(poisson::tier_for(p.away)),
                _ => None,
            });
        }
    }

    if cfg.model == ScoringModel::Strength {
        let outlook = strength::compare(&home_form, &away_form);
        out.prediction = match outlook.call {
            StrengthCall::HomeWin => OutcomeLabel::HomeWin,
            StrengthCall::LeanHome => OutcomeLabel::LeanHome,
            StrengthCall::Draw => OutcomeLabel::Draw,
            StrengthCall::LeanAway => OutcomeLabel::LeanAway,
            StrengthCall::AwayWin => OutcomeLabel::AwayWin,
        };
        out.confidence = outlook.stars.saturating_mul(20);
        out.strength = Some(outlook);
    }

    out.rating = format!("{}/100", out.confidence);
    out
}

pub fn predict_all(
    fixtures: &[Fixture],
    history: &[MatchResult],
    cfg: &EngineConfig,
    drop_unqualified: bool,
) -> Vec<PredictionResult> {
    fixtures
        .iter()
        .map(|f| predict(f, history, cfg))
        .filter(|p| !drop_unqualified || p.qualified)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Score, TeamRef};
    use chrono::TimeZone;

    const TEAM_A: u32 = 1;
    const TEAM_B: u32 = 2;

    fn played(id: u64, home: u32, away: u32, day: u32, hg: u8, ag: u8) -> MatchResult {
        MatchResult {
            id,
            home: TeamRef::new(home, format!("Team{home}")),
            away: TeamRef::new(away, format!("Team{away}")),
            competition: "Premier League".to_string(),
            kickoff: Utc.with_ymd_and_hms(2024, 2, day, 15, 0, 0).unwrap(),
            score: Some(Score { home: hg, away: ag }),
        }
    }

    fn upcoming() -> Fixture {
        Fixture {
            id: 99,
            home: TeamRef::new(TEAM_A, "TeamA"),
            away: TeamRef::new(TEAM_B, "TeamB"),
            competition: "Premier League".to_string(),
            kickoff: Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap(),
        }
    }

    fn dominant_history() -> Vec<MatchResult> {
        [(4, 1), (3, 0), (2, 1), (3, 1), (2, 0)]
            .iter()
            .enumerate()
            .map(|(i, (hg, ag))| played(i as u64 + 1, TEAM_A, TEAM_B, i as u32 + 1, *hg, *ag))
            .collect()
    }

    #[test]
    fn dominant_home_side_is_called_near_the_cap() {
        let cfg = EngineConfig::default();
        let p = predict(&upcoming(), &dominant_history(), &cfg);
        assert_eq!(p.home_form.wins, 5);
        assert_eq!(p.away_form.losses, 5);
        assert_eq!(p.home_h2h.wins, 5);
        assert!(p.qualified);
        assert_eq!(p.prediction, OutcomeLabel::HomeWin);
        assert_eq!(p.confidence as f64, cfg.gate.confidence_cap);
        assert_eq!(p.rating, "95/100");
        assert!(p.probabilities.is_some());
        assert_eq!(p.fixture, "TeamA vs TeamB");
    }

    #[test]
    fn no_history_gives_no_edge() {
        let cfg = EngineConfig::default();
        let p = predict(&upcoming(), &[], &cfg);
        assert!(!p.qualified);
        assert_eq!(p.prediction, OutcomeLabel::NoEdge);
        assert_eq!(p.confidence, 0);
        assert_eq!(p.home_form.avg_scored, form::NEUTRAL_GOALS);
        assert_eq!(p.tier, None);
        let xg = p.expected_goals.unwrap();
        assert!(xg.home > xg.away);
    }

    #[test]
    fn predictions_are_deterministic() {
        let history = dominant_history();
        for model in [
            ScoringModel::Combined,
            ScoringModel::Form,
            ScoringModel::ExpectedGoals,
            ScoringModel::Strength,
        ] {
            let cfg = EngineConfig {
                model,
                ..EngineConfig::default()
            };
            assert_eq!(
                predict(&upcoming(), &history, &cfg),
                predict(&upcoming(), &history, &cfg)
            );
        }
    }

    #[test]
    fn combined_tier_rates_the_gate_outcome() {
        // A swept the last three meetings, but both sides' latest results
        // point the other way, so the Poisson grid favours the away side.
        let mut history: Vec<MatchResult> = (1..=3)
            .map(|day| played(day as u64, TEAM_A, TEAM_B, day, 1, 0))
            .collect();
        history.push(played(10, TEAM_A, 3, 10, 0, 6));
        history.push(played(11, TEAM_A, 3, 11, 0, 6));
        history.push(played(12, TEAM_B, 4, 10, 6, 0));
        history.push(played(13, TEAM_B, 4, 11, 6, 0));

        let p = predict(&upcoming(), &history, &EngineConfig::default());
        assert_eq!(p.prediction, OutcomeLabel::HomeWin);
        assert_eq!(p.confidence, 80);

        let probs = p.probabilities.unwrap();
        assert!(probs.away > probs.home);
        assert_eq!(poisson::tier_for(probs.away), ConfidenceTier::VeryHigh);
        assert_eq!(p.tier, Some(poisson::tier_for(probs.home)));
        assert_eq!(p.tier, Some(ConfidenceTier::Low));
    }

    #[test]
    fn expected_goals_model_labels_by_plurality() {
        let cfg = EngineConfig {
            model: ScoringModel::ExpectedGoals,
            ..EngineConfig::default()
        };
        let p = predict(&upcoming(), &dominant_history(), &cfg);
        assert!(p.qualified);
        assert_eq!(p.prediction, OutcomeLabel::HomeWin);
        let probs = p.probabilities.unwrap();
        assert_eq!(p.confidence, probs.home.round() as u8);
    }

    #[test]
    fn form_model_omits_probabilities() {
        let cfg = EngineConfig {
            model: ScoringModel::Form,
            ..EngineConfig::default()
        };
        let p = predict(&upcoming(), &dominant_history(), &cfg);
        assert!(p.probabilities.is_none());
        assert_eq!(p.prediction, OutcomeLabel::HomeWin);
    }

    #[test]
    fn strength_model_reports_stars() {
        let cfg = EngineConfig {
            model: ScoringModel::Strength,
            ..EngineConfig::default()
        };
        let p = predict(&upcoming(), &dominant_history(), &cfg);
        assert_eq!(p.prediction, OutcomeLabel::HomeWin);
        assert_eq!(p.strength.unwrap().stars, 5);
        assert_eq!(p.confidence, 100);
    }

    #[test]
    fn unqualified_fixtures_are_dropped_on_request() {
        let cfg = EngineConfig::default();
        let fixtures = vec![upcoming()];
        assert!(predict_all(&fixtures, &[], &cfg, true).is_empty());
        assert_eq!(predict_all(&fixtures, &[], &cfg, false).len(), 1);
    }

    #[test]
    fn model_names_parse() {
        assert_eq!("xg".parse::<ScoringModel>(), Ok(ScoringModel::ExpectedGoals));
        assert_eq!("Form".parse::<ScoringModel>(), Ok(ScoringModel::Form));
        assert!("magic".parse::<ScoringModel>().is_err());
        assert_eq!(ScoringModel::Combined.to_string(), "combined");
        assert_eq!(OutcomeLabel::NoEdge.to_string(), "No Edge");
    }
}
