//! Integration tests for the team randomizer.

use league_tournament_web::{
    randomize_assignments, start_tournament, Store, TournamentError, TournamentFormat,
    TournamentId,
};
use std::collections::HashMap;

fn league_with(team_count: usize, player_count: usize) -> (Store, TournamentId) {
    let mut store = Store::new();
    let tournament = store
        .create_tournament("Friday League", TournamentFormat::League)
        .unwrap();
    for i in 0..team_count {
        let team = store.create_team(&format!("Team {i}")).unwrap();
        store.register_team(tournament.id, team.id).unwrap();
    }
    for i in 0..player_count {
        let player = store.create_player(&format!("P{i}")).unwrap();
        store.register_player(tournament.id, player.id).unwrap();
    }
    (store, tournament.id)
}

#[test]
fn randomize_requires_teams_and_players() {
    let (mut store, id) = league_with(0, 3);
    assert_eq!(
        randomize_assignments(&mut store, id),
        Err(TournamentError::NoTeamsRegistered)
    );

    let (mut store, id) = league_with(2, 0);
    assert_eq!(
        randomize_assignments(&mut store, id),
        Err(TournamentError::NoPlayersRegistered)
    );
}

#[test]
fn every_player_gets_exactly_one_registered_team() {
    let (mut store, id) = league_with(3, 7);
    let assignments = randomize_assignments(&mut store, id).unwrap();

    assert_eq!(assignments.len(), 7);
    let team_ids: Vec<_> = store.teams_for(id).iter().map(|tt| tt.team_id).collect();
    for (_, team_id) in &assignments {
        assert!(team_ids.contains(team_id));
    }

    // Persisted on the registration rows too.
    for tp in store.players_for(id) {
        assert!(tp.team_id.is_some());
    }
}

#[test]
fn team_load_is_balanced() {
    // 7 players over 3 teams: every team ends up with 2 or 3.
    let (mut store, id) = league_with(3, 7);
    let assignments = randomize_assignments(&mut store, id).unwrap();

    let mut per_team: HashMap<_, usize> = HashMap::new();
    for (_, team_id) in &assignments {
        *per_team.entry(*team_id).or_default() += 1;
    }
    assert_eq!(per_team.len(), 3);
    assert_eq!(per_team.values().sum::<usize>(), 7);
    let max = per_team.values().max().unwrap();
    let min = per_team.values().min().unwrap();
    assert!(max - min <= 1);
}

#[test]
fn rerunning_in_draft_reassigns() {
    let (mut store, id) = league_with(2, 4);
    randomize_assignments(&mut store, id).unwrap();
    let again = randomize_assignments(&mut store, id).unwrap();

    assert_eq!(again.len(), 4);
    for tp in store.players_for(id) {
        assert!(tp.team_id.is_some());
    }
}

#[test]
fn randomize_rejected_once_started() {
    let (mut store, id) = league_with(2, 4);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();

    assert_eq!(
        randomize_assignments(&mut store, id),
        Err(TournamentError::InvalidStatus)
    );
}
