//! Team randomizer: bind every registered player to a registered team.

use crate::models::{PlayerId, TeamId, TournamentError, TournamentId, TournamentStatus};
use crate::store::Store;
use rand::seq::SliceRandom;

/// Randomly assign every registered player to a registered team.
///
/// Shuffles teams and players independently (Fisher-Yates), then assigns the
/// i-th shuffled player to `teams[i % team_count]`, so team load never
/// differs by more than one player. The whole batch is validated before the
/// first write; re-running while the tournament is still in Draft simply
/// reassigns. Returns the persisted (player, team) pairs.
pub fn randomize_assignments(
    store: &mut Store,
    tournament_id: TournamentId,
) -> Result<Vec<(PlayerId, TeamId)>, TournamentError> {
    if store.tournament(tournament_id)?.status != TournamentStatus::Draft {
        return Err(TournamentError::InvalidStatus);
    }

    let mut team_ids: Vec<TeamId> = store
        .teams_for(tournament_id)
        .iter()
        .map(|tt| tt.team_id)
        .collect();
    let mut player_ids: Vec<PlayerId> = store
        .players_for(tournament_id)
        .iter()
        .map(|tp| tp.player_id)
        .collect();

    if team_ids.is_empty() {
        return Err(TournamentError::NoTeamsRegistered);
    }
    if player_ids.is_empty() {
        return Err(TournamentError::NoPlayersRegistered);
    }

    let mut rng = rand::thread_rng();
    team_ids.shuffle(&mut rng);
    player_ids.shuffle(&mut rng);

    let assignments: Vec<(PlayerId, TeamId)> = player_ids
        .iter()
        .enumerate()
        .map(|(i, &player_id)| (player_id, team_ids[i % team_ids.len()]))
        .collect();

    store.set_assignments(tournament_id, &assignments)?;
    log::info!(
        "Assigned {} player(s) across {} team(s) for tournament {}",
        assignments.len(),
        team_ids.len(),
        tournament_id
    );
    Ok(assignments)
}
