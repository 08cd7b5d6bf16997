use serde::Serialize;

use crate::domain::MatchResult;

pub const FORM_WINDOW: usize = 5;

/// Neutral goals-per-match prior for a team with no scored history.
pub const NEUTRAL_GOALS: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormSummary {
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub avg_scored: f64,
    pub avg_conceded: f64,
}

impl FormSummary {
    pub fn neutral() -> Self {
        Self {
            matches: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
            avg_scored: NEUTRAL_GOALS,
            avg_conceded: NEUTRAL_GOALS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalRates {
    pub attack: f64,
    pub defense: f64,
}

impl GoalRates {
    pub fn neutral() -> Self {
        Self {
            attack: NEUTRAL_GOALS,
            defense: NEUTRAL_GOALS,
        }
    }
}

pub fn recent_matches(team_id: u32, history: &[MatchResult], n: usize) -> Vec<&MatchResult> {
    window(history, n, |m| m.involves(team_id))
}

/// Up to `n` scored meetings between `a` and `b` in either orientation, most recent first.
pub fn head_to_head(a: u32, b: u32, history: &[MatchResult], n: usize) -> Vec<&MatchResult> {
    window(history, n, |m| m.is_between(a, b))
}

fn window<F>(history: &[MatchResult], n: usize, keep: F) -> Vec<&MatchResult>
where
    F: Fn(&MatchResult) -> bool,
{
    let mut out: Vec<&MatchResult> = history
        .iter()
        .filter(|m| m.score.is_some())
        .filter(|m| keep(m))
        .collect();
    // Stable sort keeps provider order for identical kickoffs.
    out.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));
    out.truncate(n);
    out
}

pub fn summarize(team_id: u32, matches: &[&MatchResult]) -> FormSummary {
    let mut out = FormSummary::neutral();
    let mut scored = 0u32;
    let mut conceded = 0u32;

    for m in matches {
        let Some((gf, ga)) = m.goals_for(team_id) else {
            continue;
        };
        out.matches += 1;
        scored += gf as u32;
        conceded += ga as u32;
        if gf > ga {
            out.wins += 1;
            out.points += 3;
        } else if gf < ga {
            out.losses += 1;
        } else {
            out.draws += 1;
            out.points += 1;
        }
    }

    if out.matches > 0 {
        let n = out.matches as f64;
        out.avg_scored = scored as f64 / n;
        out.avg_conceded = conceded as f64 / n;
    }
    out
}

pub fn recency_rates(team_id: u32, matches: &[&MatchResult]) -> GoalRates {
    let scored: Vec<(u8, u8)> = matches
        .iter()
        .filter_map(|m| m.goals_for(team_id))
        .collect();
    if scored.is_empty() {
        return GoalRates::neutral();
    }

    let k = scored.len();
    let mut attack = 0.0;
    let mut defense = 0.0;
    let mut weight_sum = 0.0;
    for (i, (gf, ga)) in scored.iter().enumerate() {
        let w = (k - i) as f64;
        attack += w * *gf as f64;
        defense += w * *ga as f64;
        weight_sum += w;
    }

    GoalRates {
        attack: attack / weight_sum,
        defense: defense / weight_sum,
    }
}
