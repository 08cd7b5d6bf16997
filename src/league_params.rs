pub const DEFAULT_HOME_ADVANTAGE: f64 = 0.25;

// Matched case-insensitively against the provider's competition name.
const HOME_ADVANTAGE: &[(&str, f64)] = &[
    ("Premier League", 0.28),
    ("Championship", 0.26),
    ("Primera Division", 0.30),
    ("Bundesliga", 0.27),
    ("Serie A", 0.29),
    ("Ligue 1", 0.26),
    ("Eredivisie", 0.32),
    ("Primeira Liga", 0.31),
    ("Campeonato Brasileiro Série A", 0.32),
    ("UEFA Champions League", 0.25),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueParams {
    pub home_advantage: f64,
    pub known: bool,
}

pub fn params_for(competition: &str) -> LeagueParams {
    let key = competition.trim();
    HOME_ADVANTAGE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, adv)| LeagueParams {
            home_advantage: *adv,
            known: true,
        })
        .unwrap_or(LeagueParams {
            home_advantage: DEFAULT_HOME_ADVANTAGE,
            known: false,
        })
}
