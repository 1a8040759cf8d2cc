//! League tournament web app: library with models, store, and business logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{league_table, randomize_assignments, start_tournament, submit_score, tournament_insights};
pub use models::{
    Fixture, FixtureStatus, MatchId, Player, PlayerId, Standing, Team, TeamId, Tournament,
    TournamentError, TournamentFormat, TournamentId, TournamentPlayer, TournamentStatus,
    TournamentTeam, POINTS_PER_WIN,
};
pub use store::Store;
