//! Data structures for the league organizer: tournaments, teams, players,
//! registrations, fixtures, standings.

mod fixture;
mod player;
mod registration;
mod standing;
mod team;
mod tournament;

pub use fixture::{Fixture, FixtureStatus, MatchId};
pub use player::{Player, PlayerId};
pub use registration::{TournamentPlayer, TournamentTeam};
pub use standing::{Standing, POINTS_PER_WIN};
pub use team::{Team, TeamId};
pub use tournament::{
    Tournament, TournamentError, TournamentFormat, TournamentId, TournamentStatus,
};
