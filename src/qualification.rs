use crate::form::FormSummary;

#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    pub min_form_wins: u32,
    pub min_h2h_wins: u32,
    pub max_h2h_wins: Option<u32>,
    pub min_opp_form_losses: u32,
    pub min_opp_h2h_losses: u32,
    pub form_weight: f64,
    pub h2h_weight: f64,
    pub confidence_base: f64,
    pub confidence_per_unit: f64,
    pub confidence_floor: f64,
    pub confidence_cap: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_form_wins: 3,
            min_h2h_wins: 3,
            max_h2h_wins: Some(5),
            min_opp_form_losses: 3,
            min_opp_h2h_losses: 3,
            form_weight: 1.0,
            h2h_weight: 1.0,
            confidence_base: 60.0,
            confidence_per_unit: 5.0,
            confidence_floor: 0.0,
            confidence_cap: 95.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateVerdict {
    pub home_qualified: bool,
    pub away_qualified: bool,
    pub home_score: f64,
    pub away_score: f64,
    pub winner: Option<Side>,
    pub confidence: u8,
}

impl GateVerdict {
    pub fn qualified(&self) -> bool {
        self.home_qualified || self.away_qualified
    }
}

pub fn qualifies(
    form: &FormSummary,
    h2h: &FormSummary,
    opp_form: &FormSummary,
    opp_h2h: &FormSummary,
    cfg: &GateConfig,
) -> bool {
    let h2h_ok = h2h.wins >= cfg.min_h2h_wins && cfg.max_h2h_wins.is_none_or(|cap| h2h.wins <= cap);
    form.wins >= cfg.min_form_wins
        && h2h_ok
        && opp_form.losses >= cfg.min_opp_form_losses
        && opp_h2h.losses >= cfg.min_opp_h2h_losses
}

pub fn combined_score(form: &FormSummary, h2h: &FormSummary, cfg: &GateConfig) -> f64 {
    cfg.form_weight * form.wins as f64 + cfg.h2h_weight * h2h.wins as f64
}

/// Percent confidence for a combined-score gap, clamped to `[floor, cap]`.
pub fn confidence_for_gap(gap: f64, cfg: &GateConfig) -> u8 {
    let raw = cfg.confidence_base + cfg.confidence_per_unit * gap.max(0.0);
    raw.clamp(cfg.confidence_floor, cfg.confidence_cap).round() as u8
}

pub fn evaluate(
    home_form: &FormSummary,
    home_h2h: &FormSummary,
    away_form: &FormSummary,
    away_h2h: &FormSummary,
    cfg: &GateConfig,
) -> GateVerdict {
    let home_qualified = qualifies(home_form, home_h2h, away_form, away_h2h, cfg);
    let away_qualified = qualifies(away_form, away_h2h, home_form, home_h2h, cfg);
    let home_score = combined_score(home_form, home_h2h, cfg);
    let away_score = combined_score(away_form, away_h2h, cfg);
    let floor = cfg.confidence_floor.round() as u8;

    let mut verdict = GateVerdict {
        home_qualified,
        away_qualified,
        home_score,
        away_score,
        winner: None,
        confidence: floor,
    };
    if !verdict.qualified() {
        return verdict;
    }

    let gap = (home_score - away_score).abs();
    if home_score > away_score {
        verdict.winner = Some(Side::Home);
    } else if away_score > home_score {
        verdict.winner = Some(Side::Away);
    } else {
        return verdict;
    }
    verdict.confidence = confidence_for_gap(gap, cfg);
    verdict
}
