//! Fixture generator: double round-robin over the assigned teams.

use crate::models::{
    Fixture, TeamId, TournamentError, TournamentFormat, TournamentId, TournamentStatus,
};
use crate::store::Store;
use chrono::{Duration, Utc};

/// Start a tournament: generate the full double round-robin, reset standings,
/// and move Draft -> InProgress.
///
/// Participants are the distinct teams that received at least one player, in
/// registration order. Every ordered pair (home, away) of distinct teams gets
/// exactly one fixture, so T teams produce T*(T-1) fixtures; a team never
/// meets itself. Fixture dates run one day apart from generation time, in
/// fixture order.
///
/// All preconditions are checked before the first write, so a failure leaves
/// the tournament untouched in Draft and the call can simply be retried.
pub fn start_tournament(
    store: &mut Store,
    tournament_id: TournamentId,
) -> Result<(), TournamentError> {
    let tournament = store.tournament(tournament_id)?;
    if tournament.status != TournamentStatus::Draft {
        return Err(TournamentError::InvalidStatus);
    }
    if tournament.format != TournamentFormat::League {
        return Err(TournamentError::UnsupportedFormat(tournament.format));
    }

    let players = store.players_for(tournament_id);
    if players.is_empty() {
        return Err(TournamentError::NoPlayersRegistered);
    }
    let unassigned = players.iter().filter(|tp| tp.team_id.is_none()).count();
    if unassigned > 0 {
        return Err(TournamentError::AssignmentIncomplete { unassigned });
    }

    // Distinct teams with at least one assigned player, in registration order.
    let assigned: Vec<TeamId> = players.iter().filter_map(|tp| tp.team_id).collect();
    let participants: Vec<TeamId> = store
        .teams_for(tournament_id)
        .iter()
        .map(|tt| tt.team_id)
        .filter(|team_id| assigned.contains(team_id))
        .collect();
    if participants.len() < 2 {
        return Err(TournamentError::NotEnoughTeams { required: 2 });
    }

    let kickoff = Utc::now();
    let mut fixtures = Vec::with_capacity(participants.len() * (participants.len() - 1));
    for (i, &home) in participants.iter().enumerate() {
        for (j, &away) in participants.iter().enumerate() {
            if i == j {
                continue;
            }
            let match_date = kickoff + Duration::days(fixtures.len() as i64);
            fixtures.push(Fixture::new(tournament_id, home, away, match_date));
        }
    }

    // Standings cover every registered team, including any left without a
    // player when teams outnumber players; those rows just stay at zero.
    let all_team_ids: Vec<TeamId> = store
        .teams_for(tournament_id)
        .iter()
        .map(|tt| tt.team_id)
        .collect();

    let fixture_count = fixtures.len();
    store.insert_fixtures(fixtures);
    store.reset_standings(tournament_id, &all_team_ids);
    store.tournament_mut(tournament_id)?.status = TournamentStatus::InProgress;

    log::info!(
        "Tournament {} started: {} fixture(s) across {} team(s)",
        tournament_id,
        fixture_count,
        participants.len()
    );
    Ok(())
}
