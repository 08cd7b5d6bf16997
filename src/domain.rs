use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

impl TeamRef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: u64,
    pub home: TeamRef,
    pub away: TeamRef,
    pub competition: String,
    pub kickoff: DateTime<Utc>,
    pub score: Option<Score>,
}

impl MatchResult {
    pub fn involves(&self, team_id: u32) -> bool {
        self.home.id == team_id || self.away.id == team_id
    }

    pub fn is_between(&self, a: u32, b: u32) -> bool {
        (self.home.id == a && self.away.id == b) || (self.home.id == b && self.away.id == a)
    }

    /// Goals (for, against) from `team_id`'s point of view, if scored.
    pub fn goals_for(&self, team_id: u32) -> Option<(u8, u8)> {
        let score = self.score?;
        if self.home.id == team_id {
            Some((score.home, score.away))
        } else if self.away.id == team_id {
            Some((score.away, score.home))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u64,
    pub home: TeamRef,
    pub away: TeamRef,
    pub competition: String,
    pub kickoff: DateTime<Utc>,
}

impl Fixture {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home.name, self.away.name)
    }
}
