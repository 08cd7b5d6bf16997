use serde::Serialize;

use crate::form::{FORM_WINDOW, FormSummary};

const FORM_SHARE: f64 = 40.0;
const ATTACK_SHARE: f64 = 30.0;
const DEFENSE_SHARE: f64 = 20.0;
const HOME_BONUS: f64 = 10.0;
const GOALS_SCALE: f64 = 3.0;

const STRONG_EDGE: f64 = 15.0;
const LEAN_EDGE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthCall {
    HomeWin,
    LeanHome,
    Draw,
    LeanAway,
    AwayWin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthOutlook {
    pub home_strength: f64,
    pub away_strength: f64,
    pub diff: f64,
    pub call: StrengthCall,
    pub stars: u8,
}

pub fn team_strength(form: &FormSummary, is_home: bool) -> f64 {
    let max_points = (FORM_WINDOW as f64) * 3.0;
    let form_score = (form.points as f64 / max_points) * FORM_SHARE;
    let attack_score = (form.avg_scored / GOALS_SCALE) * ATTACK_SHARE;
    let defense_score = (1.0 - form.avg_conceded / GOALS_SCALE) * DEFENSE_SHARE;
    let bonus = if is_home { HOME_BONUS } else { 0.0 };
    form_score + attack_score + defense_score + bonus
}

pub fn compare(home: &FormSummary, away: &FormSummary) -> StrengthOutlook {
    let home_strength = team_strength(home, true);
    let away_strength = team_strength(away, false);
    let diff = home_strength - away_strength;

    let call = if diff > STRONG_EDGE {
        StrengthCall::HomeWin
    } else if diff > LEAN_EDGE {
        StrengthCall::LeanHome
    } else if diff < -STRONG_EDGE {
        StrengthCall::AwayWin
    } else if diff < -LEAN_EDGE {
        StrengthCall::LeanAway
    } else {
        StrengthCall::Draw
    };
    let stars = (diff.abs() / 5.0).round().clamp(1.0, 5.0) as u8;

    StrengthOutlook {
        home_strength,
        away_strength,
        diff,
        call,
        stars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(points: u32, avg_scored: f64, avg_conceded: f64) -> FormSummary {
        FormSummary {
            points,
            avg_scored,
            avg_conceded,
            ..FormSummary::neutral()
        }
    }

    #[test]
    fn perfect_home_form_scores_high() {
        let s = team_strength(&form(15, 3.0, 0.0), true);
        assert!((s - 100.0).abs() < 1e-9);
    }

    #[test]
    fn equal_sides_lean_on_home_bonus_only() {
        let f = form(7, 1.2, 1.2);
        let out = compare(&f, &f);
        assert!((out.diff - HOME_BONUS).abs() < 1e-9);
        assert_eq!(out.call, StrengthCall::LeanHome);
        assert_eq!(out.stars, 2);
    }

    #[test]
    fn dominant_away_side_is_called() {
        let out = compare(&form(0, 0.2, 2.8), &form(15, 2.6, 0.4));
        assert_eq!(out.call, StrengthCall::AwayWin);
        assert_eq!(out.stars, 5);
    }

    #[test]
    fn stars_never_drop_below_one() {
        let home = form(6, 1.0, 1.3);
        let away = form(9, 1.4, 1.0);
        let out = compare(&home, &away);
        assert_eq!(out.call, StrengthCall::Draw);
        assert!(out.stars >= 1);
    }
}
