//! Standings ledger: record a final score and update both teams' records.

use crate::models::{FixtureStatus, MatchId, TournamentError, TournamentStatus};
use crate::store::Store;

/// Record the final score of a scheduled fixture.
///
/// The fixture must still be `Scheduled`: a completed fixture returns
/// `MatchAlreadyCompleted` (so a second submission, racing or repeated, can
/// never double-apply the increments), and a cancelled or in-progress one
/// returns `MatchNotPlayable`. Both standings rows are resolved before any
/// write; only then are the score, the fixture status, and the two standings
/// updated, followed by the terminal check on the tournament.
pub fn submit_score(
    store: &mut Store,
    match_id: MatchId,
    home_score: u32,
    away_score: u32,
) -> Result<(), TournamentError> {
    let fixture = store.fixture(match_id)?;
    match fixture.status {
        FixtureStatus::Scheduled => {}
        FixtureStatus::Completed => return Err(TournamentError::MatchAlreadyCompleted(match_id)),
        FixtureStatus::InProgress | FixtureStatus::Cancelled => {
            return Err(TournamentError::MatchNotPlayable(match_id))
        }
    }
    let tournament_id = fixture.tournament_id;
    let home_team_id = fixture.home_team_id;
    let away_team_id = fixture.away_team_id;

    // Resolve every row this update touches before writing anything.
    if !store.has_standing(tournament_id, home_team_id) {
        return Err(TournamentError::StandingMissing {
            tournament_id,
            team_id: home_team_id,
        });
    }
    if !store.has_standing(tournament_id, away_team_id) {
        return Err(TournamentError::StandingMissing {
            tournament_id,
            team_id: away_team_id,
        });
    }

    let fixture = store.fixture_mut(match_id)?;
    fixture.home_score = home_score;
    fixture.away_score = away_score;
    fixture.status = FixtureStatus::Completed;

    store
        .standing_mut(tournament_id, home_team_id)?
        .record_result(home_score, away_score);
    store
        .standing_mut(tournament_id, away_team_id)?
        .record_result(away_score, home_score);

    let all_completed = store
        .fixtures_for(tournament_id)
        .iter()
        .all(|m| m.status == FixtureStatus::Completed);
    if all_completed {
        store.tournament_mut(tournament_id)?.status = TournamentStatus::Completed;
        log::info!("Tournament {} completed: all fixtures played", tournament_id);
    }
    Ok(())
}
