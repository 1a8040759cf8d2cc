//! Tournament business logic: team assignment, fixture generation, scoring.

mod assignment;
mod insights;
mod schedule;
mod scoring;

pub use assignment::randomize_assignments;
pub use insights::{league_table, tournament_insights};
pub use schedule::start_tournament;
pub use scoring::submit_score;
