//! Tournament, its lifecycle status, and the shared error type.

use crate::models::fixture::MatchId;
use crate::models::player::PlayerId;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Name is empty after trimming.
    EmptyName,
    /// An entity with this name already exists (names are unique, case-insensitive).
    DuplicateName,
    /// Tournament not found.
    TournamentNotFound(TournamentId),
    /// Team not found in the registry or tournament.
    TeamNotFound(TeamId),
    /// Player not found in the registry or tournament.
    PlayerNotFound(PlayerId),
    /// Match not found.
    MatchNotFound(MatchId),
    /// Team is registered to a tournament and cannot be deleted.
    TeamInUse(TeamId),
    /// Player is registered to a tournament and cannot be deleted.
    PlayerInUse(PlayerId),
    /// Team or player is already registered to this tournament.
    AlreadyRegistered,
    /// Tournament is not in a status that allows this action.
    InvalidStatus,
    /// No fixture generator exists for this format (only league is supported).
    UnsupportedFormat(TournamentFormat),
    /// Tournament has no registered players.
    NoPlayersRegistered,
    /// Tournament has no registered teams.
    NoTeamsRegistered,
    /// Fewer distinct assigned teams than a round-robin needs.
    NotEnoughTeams { required: usize },
    /// Some registered players have no team yet; run the randomizer first.
    AssignmentIncomplete { unassigned: usize },
    /// Someone already recorded a result for this match.
    MatchAlreadyCompleted(MatchId),
    /// Match is cancelled or otherwise not open for a result.
    MatchNotPlayable(MatchId),
    /// No standings row exists for this team; the tournament needs repair.
    StandingMissing {
        tournament_id: TournamentId,
        team_id: TeamId,
    },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateName => write!(f, "An entry with this name already exists"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::TeamInUse(_) => {
                write!(f, "Team is registered to a tournament and cannot be deleted")
            }
            TournamentError::PlayerInUse(_) => {
                write!(f, "Player is registered to a tournament and cannot be deleted")
            }
            TournamentError::AlreadyRegistered => {
                write!(f, "Already registered to this tournament")
            }
            TournamentError::InvalidStatus => write!(f, "Invalid tournament status for this action"),
            TournamentError::UnsupportedFormat(format) => {
                write!(f, "No fixture generator for the {} format", format.as_str())
            }
            TournamentError::NoPlayersRegistered => write!(f, "No players registered"),
            TournamentError::NoTeamsRegistered => write!(f, "No teams registered"),
            TournamentError::NotEnoughTeams { required } => {
                write!(f, "Need at least {} teams with assigned players", required)
            }
            TournamentError::AssignmentIncomplete { unassigned } => {
                write!(
                    f,
                    "{} player(s) have no team yet; randomize teams first",
                    unassigned
                )
            }
            TournamentError::MatchAlreadyCompleted(_) => {
                write!(f, "This match already has a recorded result")
            }
            TournamentError::MatchNotPlayable(_) => {
                write!(f, "This match is not open for a result")
            }
            TournamentError::StandingMissing { .. } => {
                write!(f, "No standings row for this team; tournament needs repair")
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Registering teams/players, assigning teams; no fixtures yet.
    #[default]
    Draft,
    /// Fixtures generated; results being recorded.
    InProgress,
    /// Every fixture completed.
    Completed,
}

/// Competition format. Only `League` (double round-robin) has a generator;
/// the other two are accepted at creation but cannot be started.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    League,
    Knockout,
    GroupStage,
}

impl TournamentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentFormat::League => "league",
            TournamentFormat::Knockout => "knockout",
            TournamentFormat::GroupStage => "group_stage",
        }
    }
}

/// A tournament: name, format, lifecycle status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft status.
    pub fn new(name: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            status: TournamentStatus::Draft,
            created_at: Utc::now(),
        }
    }
}
