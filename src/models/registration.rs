//! Join rows tying teams and players to a tournament.

use crate::models::player::PlayerId;
use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team's participation in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentTeam {
    pub id: Uuid,
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub created_at: DateTime<Utc>,
}

impl TournamentTeam {
    pub fn new(tournament_id: TournamentId, team_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            team_id,
            created_at: Utc::now(),
        }
    }
}

/// A player's participation in a tournament, with their team assignment.
/// `team_id` starts empty and is set by the randomizer before fixtures exist;
/// at most one row per (tournament, player).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentPlayer {
    pub id: Uuid,
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub team_id: Option<TeamId>,
    pub created_at: DateTime<Utc>,
}

impl TournamentPlayer {
    pub fn new(tournament_id: TournamentId, player_id: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            player_id,
            team_id: None,
            created_at: Utc::now(),
        }
    }
}
