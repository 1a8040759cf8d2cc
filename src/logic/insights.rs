//! Read-only reporting over standings and the remaining schedule: the sorted
//! league table and the commentary lines shown on the tournament overview.
//! Pure presentation; nothing here mutates state.

use crate::models::{
    Fixture, FixtureStatus, Standing, TeamId, TournamentError, TournamentId, POINTS_PER_WIN,
};
use crate::store::Store;

/// The tournament's standings sorted for display: points, then goal
/// difference, then goals scored, all descending.
pub fn league_table(store: &Store, tournament_id: TournamentId) -> Vec<Standing> {
    let mut table: Vec<Standing> = store
        .standings_for(tournament_id)
        .into_iter()
        .cloned()
        .collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    table
}

fn remaining_for(remaining: &[&Fixture], team_id: TeamId) -> usize {
    remaining.iter().filter(|m| m.involves(team_id)).count()
}

/// Commentary lines for the tournament overview: leader summary, who can
/// still catch whom, threatened positions, tight races. Empty until
/// standings exist.
pub fn tournament_insights(
    store: &Store,
    tournament_id: TournamentId,
) -> Result<Vec<String>, TournamentError> {
    store.tournament(tournament_id)?;
    let table = league_table(store, tournament_id);
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let fixtures = store.fixtures_for(tournament_id);
    let remaining: Vec<&Fixture> = fixtures
        .into_iter()
        .filter(|m| m.status == FixtureStatus::Scheduled)
        .collect();

    let name = |team_id: TeamId| -> Result<String, TournamentError> {
        Ok(store.team(team_id)?.name.clone())
    };

    let mut lines = Vec::new();
    let leader = &table[0];
    let leader_name = name(leader.team_id)?;

    // Can second place still close the gap with wins alone?
    let can_be_overtaken = match table.get(1) {
        Some(second) => {
            let points_behind = leader.points - second.points;
            let max_possible =
                remaining_for(&remaining, second.team_id) as u32 * POINTS_PER_WIN;
            max_possible > points_behind
        }
        None => false,
    };

    if remaining.is_empty() {
        lines.push(format!(
            "{} win the tournament with {} points.",
            leader_name, leader.points
        ));
    } else if !can_be_overtaken && remaining.len() < 3 {
        lines.push(format!(
            "{} can no longer be caught on {} points.",
            leader_name, leader.points
        ));
    } else if remaining.len() == 1 {
        lines.push("One fixture left to play.".to_string());
    } else {
        lines.push(format!(
            "{} lead the table with {} points.",
            leader_name, leader.points
        ));
    }

    // Chances of moving up a place.
    for (index, standing) in table.iter().enumerate().skip(1) {
        let team_remaining = remaining_for(&remaining, standing.team_id);
        if team_remaining == 0 {
            continue;
        }
        let team_name = name(standing.team_id)?;
        let above = &table[index - 1];
        let above_name = name(above.team_id)?;
        let points_needed = above.points - standing.points;
        if points_needed == 0 {
            lines.push(format!(
                "{} are level on points with {}; any win changes the order.",
                team_name, above_name
            ));
            continue;
        }
        let wins_needed = (points_needed + POINTS_PER_WIN - 1) / POINTS_PER_WIN;
        if wins_needed as usize <= team_remaining {
            if wins_needed as usize == team_remaining {
                lines.push(format!(
                    "{} can still overtake {}, but must win all {} remaining fixture(s).",
                    team_name, above_name, team_remaining
                ));
            } else {
                lines.push(format!(
                    "{} need {} win(s) from {} fixture(s) to overtake {}.",
                    team_name, wins_needed, team_remaining, above_name
                ));
            }
        } else {
            lines.push(format!(
                "{} can no longer catch {}: {} win(s) needed with only {} fixture(s) left.",
                team_name, above_name, wins_needed, team_remaining
            ));
        }
    }

    // Positions under threat from directly below.
    for (index, standing) in table.iter().enumerate() {
        if index + 1 >= table.len() {
            break;
        }
        let chaser = &table[index + 1];
        let gap = standing.points - chaser.points;
        if gap <= POINTS_PER_WIN && remaining_for(&remaining, chaser.team_id) > 0 {
            lines.push(format!(
                "{} are only {} point(s) behind {} with fixtures still to play.",
                name(chaser.team_id)?,
                gap,
                name(standing.team_id)?
            ));
        }
    }

    // Tight races anywhere in the table.
    for pair in table.windows(2) {
        let gap = pair[0].points - pair[1].points;
        if gap <= 2 {
            lines.push(format!(
                "Only {} point(s) separate {} and {}.",
                gap,
                name(pair[0].team_id)?,
                name(pair[1].team_id)?
            ));
        }
    }

    Ok(lines)
}
