//! Standing: a team's cumulative record within one tournament.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points awarded per win (classic football scoring; a draw is worth 1).
pub const POINTS_PER_WIN: u32 = 3;

/// One row per (tournament, team). Counters start at zero when the
/// tournament starts; `goal_difference` and `points` are derived and
/// recomputed on every update, never set directly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: Uuid,
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl Standing {
    /// Zeroed row for a team entering a tournament.
    pub fn zeroed(tournament_id: TournamentId, team_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            team_id,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Apply one completed match from this team's perspective: `scored` own
    /// goals, `conceded` opponent goals. Increments the counters in place and
    /// recomputes the derived fields.
    pub fn record_result(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        if scored > conceded {
            self.wins += 1;
        } else if scored < conceded {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.points = POINTS_PER_WIN * self.wins + self.draws;
    }
}
