use serde::Serialize;

use crate::form::GoalRates;

pub const MAX_GOALS: u32 = 6;

const ATTACK_WEIGHT: f64 = 0.6;
const DEFENSE_WEIGHT: f64 = 0.4;
const MIN_LAMBDA: f64 = 0.05;
const TIE_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Markets {
    pub over_2_5: f64,
    pub btts: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bucket {
    Home,
    Draw,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceTier {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoissonOutlook {
    pub expected_goals: ExpectedGoals,
    pub probabilities: OutcomeProbs,
    pub markets: Markets,
    pub pick: Bucket,
    pub tier: ConfidenceTier,
}

pub fn expected_goals(home: GoalRates, away: GoalRates, home_advantage: f64) -> ExpectedGoals {
    let lambda_home = ATTACK_WEIGHT * home.attack + DEFENSE_WEIGHT * away.defense + home_advantage;
    let lambda_away = ATTACK_WEIGHT * away.attack + DEFENSE_WEIGHT * home.defense;
    ExpectedGoals {
        home: lambda_home.max(MIN_LAMBDA),
        away: lambda_away.max(MIN_LAMBDA),
    }
}

pub fn outlook(xg: ExpectedGoals) -> PoissonOutlook {
    let pmf_h = poisson_pmf(xg.home, MAX_GOALS);
    let pmf_a = poisson_pmf(xg.away, MAX_GOALS);

    let mut p_home = 0.0;
    let mut p_draw = 0.0;
    let mut p_away = 0.0;
    let mut p_over = 0.0;
    let mut p_btts = 0.0;

    for (h, p_h) in pmf_h.iter().enumerate() {
        for (a, p_a) in pmf_a.iter().enumerate() {
            let p = p_h * p_a;
            if h > a {
                p_home += p;
            } else if h < a {
                p_away += p;
            } else {
                p_draw += p;
            }
            if h + a > 2 {
                p_over += p;
            }
            if h > 0 && a > 0 {
                p_btts += p;
            }
        }
    }

    // The grid truncates the tails, so everything is scaled by the covered mass.
    let mass = (p_home + p_draw + p_away).max(1e-12);
    let probabilities = OutcomeProbs {
        home: p_home / mass * 100.0,
        draw: p_draw / mass * 100.0,
        away: p_away / mass * 100.0,
    };
    let markets = Markets {
        over_2_5: p_over / mass * 100.0,
        btts: p_btts / mass * 100.0,
    };
    let pick = plurality(probabilities);
    let tier = tier_for(match pick {
        Bucket::Home => probabilities.home,
        Bucket::Draw => probabilities.draw,
        Bucket::Away => probabilities.away,
    });

    PoissonOutlook {
        expected_goals: xg,
        probabilities,
        markets,
        pick,
        tier,
    }
}

/// Strict plurality; any tie for first place resolves to a draw.
pub fn plurality(p: OutcomeProbs) -> Bucket {
    if p.home > p.draw + TIE_EPS && p.home > p.away + TIE_EPS {
        Bucket::Home
    } else if p.away > p.home + TIE_EPS && p.away > p.draw + TIE_EPS {
        Bucket::Away
    } else {
        Bucket::Draw
    }
}

pub fn tier_for(p: f64) -> ConfidenceTier {
    if p >= 70.0 {
        ConfidenceTier::VeryHigh
    } else if p >= 60.0 {
        ConfidenceTier::High
    } else if p >= 55.0 {
        ConfidenceTier::Moderate
    } else {
        ConfidenceTier::Low
    }
}

fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let mut out = vec![0.0; max_k + 1];
    out[0] = (-lambda.max(0.0)).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}
