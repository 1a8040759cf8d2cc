//! Integration tests for fixture generation and the tournament start.

use league_tournament_web::{
    randomize_assignments, start_tournament, FixtureStatus, Store, TournamentError,
    TournamentFormat, TournamentId, TournamentStatus,
};
use std::collections::HashSet;

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
fn start_requires_finished_assignment() {
    let (mut store, id) = league_with(2, 4);
    assert_eq!(
        start_tournament(&mut store, id),
        Err(TournamentError::AssignmentIncomplete { unassigned: 4 })
    );
    // Nothing committed: still Draft, no fixtures.
    assert_eq!(store.tournament(id).unwrap().status, TournamentStatus::Draft);
    assert!(store.fixtures_for(id).is_empty());
}

#[test]
fn double_round_robin_covers_every_ordered_pair_once() {
    let (mut store, id) = league_with(4, 4);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();

    let fixtures = store.fixtures_for(id);
    assert_eq!(fixtures.len(), 4 * 3);

    let pairs: HashSet<_> = fixtures
        .iter()
        .map(|m| (m.home_team_id, m.away_team_id))
        .collect();
    assert_eq!(pairs.len(), 4 * 3);

    let team_ids: Vec<_> = store.teams_for(id).iter().map(|tt| tt.team_id).collect();
    for &home in &team_ids {
        for &away in &team_ids {
            if home != away {
                assert!(pairs.contains(&(home, away)));
            }
        }
    }
}

#[test]
fn no_team_plays_itself() {
    let (mut store, id) = league_with(5, 5);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();

    for m in store.fixtures_for(id) {
        assert_ne!(m.home_team_id, m.away_team_id);
    }
}

#[test]
fn fixtures_start_scheduled_at_nil_nil_with_increasing_dates() {
    let (mut store, id) = league_with(3, 3);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();

    let fixtures = store.fixtures_for(id);
    assert_eq!(fixtures.len(), 3 * 2);
    for m in &fixtures {
        assert_eq!(m.status, FixtureStatus::Scheduled);
        assert_eq!((m.home_score, m.away_score), (0, 0));
    }
    for pair in fixtures.windows(2) {
        assert!(pair[0].match_date < pair[1].match_date);
    }
}

#[test]
fn start_zeroes_standings_and_moves_to_in_progress() {
    let (mut store, id) = league_with(3, 6);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();

    assert_eq!(
        store.tournament(id).unwrap().status,
        TournamentStatus::InProgress
    );
    let standings = store.standings_for(id);
    assert_eq!(standings.len(), 3);
    for s in standings {
        assert_eq!(s.played, 0);
        assert_eq!(s.points, 0);
        assert_eq!(s.goal_difference, 0);
    }
}

#[test]
fn start_is_not_repeatable() {
    let (mut store, id) = league_with(2, 2);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();
    assert_eq!(
        start_tournament(&mut store, id),
        Err(TournamentError::InvalidStatus)
    );
    // The first schedule survives untouched.
    assert_eq!(store.fixtures_for(id).len(), 2);
}

#[test]
fn only_league_format_can_start() {
    let mut store = Store::new();
    let tournament = store
        .create_tournament("Cup", TournamentFormat::Knockout)
        .unwrap();
    let team_a = store.create_team("A").unwrap();
    let team_b = store.create_team("B").unwrap();
    store.register_team(tournament.id, team_a.id).unwrap();
    store.register_team(tournament.id, team_b.id).unwrap();
    let player = store.create_player("P0").unwrap();
    store.register_player(tournament.id, player.id).unwrap();
    randomize_assignments(&mut store, tournament.id).unwrap();

    assert_eq!(
        start_tournament(&mut store, tournament.id),
        Err(TournamentError::UnsupportedFormat(TournamentFormat::Knockout))
    );
}

#[test]
fn single_assigned_team_is_rejected() {
    let (mut store, id) = league_with(1, 3);
    randomize_assignments(&mut store, id).unwrap();
    assert_eq!(
        start_tournament(&mut store, id),
        Err(TournamentError::NotEnoughTeams { required: 2 })
    );
    assert_eq!(store.tournament(id).unwrap().status, TournamentStatus::Draft);
}

#[test]
fn teams_without_players_get_standings_but_no_fixtures() {
    // 3 teams, 2 players: one team is left without a player and plays nobody.
    let (mut store, id) = league_with(3, 2);
    randomize_assignments(&mut store, id).unwrap();
    start_tournament(&mut store, id).unwrap();

    // Two assigned teams -> one home and one away leg.
    assert_eq!(store.fixtures_for(id).len(), 2);
    // Standings still cover all three registered teams.
    assert_eq!(store.standings_for(id).len(), 3);
}
