//! Integration tests for score submission and the standings ledger.

use league_tournament_web::{
    randomize_assignments, start_tournament, submit_score, FixtureStatus, MatchId, Standing,
    Store, TournamentError, TournamentFormat, TournamentId, TournamentStatus, POINTS_PER_WIN,
};

fn started_league(team_count: usize, player_count: usize) -> (Store, TournamentId) {
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
    randomize_assignments(&mut store, tournament.id).unwrap();
    start_tournament(&mut store, tournament.id).unwrap();
    (store, tournament.id)
}

fn assert_consistent(standing: &Standing) {
    assert_eq!(
        standing.played,
        standing.wins + standing.draws + standing.losses
    );
    assert_eq!(
        standing.points,
        POINTS_PER_WIN * standing.wins + standing.draws
    );
    assert_eq!(
        standing.goal_difference,
        i64::from(standing.goals_for) - i64::from(standing.goals_against)
    );
}

#[test]
fn two_team_league_with_split_legs_mirrors_standings() {
    // 4 players over 2 teams: one home and one away leg. Each side wins its
    // home leg 2-1.
    let (mut store, id) = started_league(2, 4);
    let fixture_ids: Vec<MatchId> = store.fixtures_for(id).iter().map(|m| m.id).collect();
    assert_eq!(fixture_ids.len(), 2);

    submit_score(&mut store, fixture_ids[0], 2, 1).unwrap();
    submit_score(&mut store, fixture_ids[1], 2, 1).unwrap();

    for standing in store.standings_for(id) {
        assert_eq!(standing.played, 2);
        assert_eq!(standing.wins, 1);
        assert_eq!(standing.losses, 1);
        assert_eq!(standing.draws, 0);
        assert_eq!(standing.points, 3);
        assert_eq!(standing.goals_for, 3);
        assert_eq!(standing.goals_against, 3);
        assert_eq!(standing.goal_difference, 0);
        assert_consistent(standing);
    }
    assert_eq!(
        store.tournament(id).unwrap().status,
        TournamentStatus::Completed
    );
}

#[test]
fn draw_gives_both_teams_one_point() {
    let (mut store, id) = started_league(2, 2);
    let first = store.fixtures_for(id)[0].id;
    submit_score(&mut store, first, 1, 1).unwrap();

    for standing in store.standings_for(id) {
        assert_eq!(standing.played, 1);
        assert_eq!(standing.draws, 1);
        assert_eq!(standing.points, 1);
        assert_consistent(standing);
    }
}

#[test]
fn second_submission_is_rejected_and_changes_nothing() {
    let (mut store, id) = started_league(2, 2);
    let first = store.fixtures_for(id)[0].id;
    submit_score(&mut store, first, 3, 0).unwrap();

    let before: Vec<Standing> = store.standings_for(id).into_iter().cloned().collect();
    assert_eq!(
        submit_score(&mut store, first, 0, 3),
        Err(TournamentError::MatchAlreadyCompleted(first))
    );

    let after: Vec<Standing> = store.standings_for(id).into_iter().cloned().collect();
    assert_eq!(before, after);
    let fixture = store.fixture(first).unwrap();
    assert_eq!((fixture.home_score, fixture.away_score), (3, 0));
}

#[test]
fn unknown_match_is_rejected() {
    let (mut store, _) = started_league(2, 2);
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        submit_score(&mut store, missing, 1, 0),
        Err(TournamentError::MatchNotFound(missing))
    );
}

#[test]
fn tournament_completes_only_after_the_last_fixture() {
    let (mut store, id) = started_league(3, 3);
    let fixture_ids: Vec<MatchId> = store.fixtures_for(id).iter().map(|m| m.id).collect();
    assert_eq!(fixture_ids.len(), 6);

    for &fixture_id in &fixture_ids[..5] {
        submit_score(&mut store, fixture_id, 1, 0).unwrap();
        assert_eq!(
            store.tournament(id).unwrap().status,
            TournamentStatus::InProgress
        );
    }
    submit_score(&mut store, fixture_ids[5], 0, 0).unwrap();
    assert_eq!(
        store.tournament(id).unwrap().status,
        TournamentStatus::Completed
    );
}

#[test]
fn points_sum_matches_decisive_and_drawn_counts() {
    // 6 fixtures: 3 decisive, 3 drawn. Total points must be 3*3 + 2*3.
    let (mut store, id) = started_league(3, 3);
    let fixture_ids: Vec<MatchId> = store.fixtures_for(id).iter().map(|m| m.id).collect();

    for (i, &fixture_id) in fixture_ids.iter().enumerate() {
        if i % 2 == 0 {
            submit_score(&mut store, fixture_id, 2, 0).unwrap();
        } else {
            submit_score(&mut store, fixture_id, 1, 1).unwrap();
        }
    }

    let total: u32 = store.standings_for(id).iter().map(|s| s.points).sum();
    assert_eq!(total, 3 * 3 + 2 * 3);
    for standing in store.standings_for(id) {
        assert_consistent(standing);
    }
    // All played twice per opponent count: each team appears in 4 of 6 fixtures.
    for standing in store.standings_for(id) {
        assert_eq!(standing.played, 4);
    }
}

#[test]
fn every_fixture_flips_to_completed_on_submission() {
    let (mut store, id) = started_league(2, 2);
    let first = store.fixtures_for(id)[0].id;
    submit_score(&mut store, first, 2, 2).unwrap();
    assert_eq!(
        store.fixture(first).unwrap().status,
        FixtureStatus::Completed
    );
}
