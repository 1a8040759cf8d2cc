//! Fixture (a single scheduled match) and its status.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Where a fixture is in its life.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// One scheduled match between two teams. Created in bulk by the fixture
/// generator; scores and status are written exactly once on submission.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    pub match_date: DateTime<Utc>,
    pub status: FixtureStatus,
}

impl Fixture {
    pub fn new(
        tournament_id: TournamentId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        match_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            home_team_id,
            away_team_id,
            home_score: 0,
            away_score: 0,
            match_date,
            status: FixtureStatus::Scheduled,
        }
    }

    /// Whether the given team plays in this fixture.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}
