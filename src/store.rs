//! In-memory store: named collections with typed CRUD, the persistence
//! collaborator behind the business logic. The web binary wraps one `Store`
//! in an `RwLock`, so every operation runs under a single writer and
//! multi-row writes are never observable half-applied.

use crate::models::{
    Fixture, MatchId, Player, PlayerId, Standing, Team, TeamId, Tournament, TournamentError,
    TournamentFormat, TournamentId, TournamentPlayer, TournamentStatus, TournamentTeam,
};
use std::collections::HashMap;

/// All collections. Entities live in maps keyed by id; join rows, fixtures,
/// and standings are plain vectors filtered per tournament, in insertion
/// order.
#[derive(Debug, Default)]
pub struct Store {
    tournaments: HashMap<TournamentId, Tournament>,
    teams: HashMap<TeamId, Team>,
    players: HashMap<PlayerId, Player>,
    tournament_teams: Vec<TournamentTeam>,
    tournament_players: Vec<TournamentPlayer>,
    fixtures: Vec<Fixture>,
    standings: Vec<Standing>,
}

/// Trim a display name; empty names are rejected everywhere.
fn normalize_name(name: &str) -> Result<&str, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    Ok(trimmed)
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- team registry -----

    /// Add a team to the global registry. Names are unique, case-insensitive.
    pub fn create_team(&mut self, name: &str) -> Result<Team, TournamentError> {
        let name = normalize_name(name)?;
        if self.teams.values().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateName);
        }
        let team = Team::new(name);
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, TournamentError> {
        self.teams.get(&id).ok_or(TournamentError::TeamNotFound(id))
    }

    /// All teams, sorted by name for display.
    pub fn list_teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        teams
    }

    /// Delete a team. Refused while any tournament references it.
    pub fn delete_team(&mut self, id: TeamId) -> Result<(), TournamentError> {
        if !self.teams.contains_key(&id) {
            return Err(TournamentError::TeamNotFound(id));
        }
        if self.tournament_teams.iter().any(|tt| tt.team_id == id) {
            return Err(TournamentError::TeamInUse(id));
        }
        self.teams.remove(&id);
        Ok(())
    }

    // ----- player registry -----

    /// Add a player to the global registry. Names are unique, case-insensitive.
    pub fn create_player(&mut self, name: &str) -> Result<Player, TournamentError> {
        let name = normalize_name(name)?;
        if self.players.values().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateName);
        }
        let player = Player::new(name);
        self.players.insert(player.id, player.clone());
        Ok(player)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, TournamentError> {
        self.players
            .get(&id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    /// All players, sorted by name for display.
    pub fn list_players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        players
    }

    /// Delete a player. Refused while any tournament references them.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<(), TournamentError> {
        if !self.players.contains_key(&id) {
            return Err(TournamentError::PlayerNotFound(id));
        }
        if self.tournament_players.iter().any(|tp| tp.player_id == id) {
            return Err(TournamentError::PlayerInUse(id));
        }
        self.players.remove(&id);
        Ok(())
    }

    // ----- tournaments -----

    pub fn create_tournament(
        &mut self,
        name: &str,
        format: TournamentFormat,
    ) -> Result<Tournament, TournamentError> {
        let name = normalize_name(name)?;
        if self
            .tournaments
            .values()
            .any(|t| t.name.eq_ignore_ascii_case(name))
        {
            return Err(TournamentError::DuplicateName);
        }
        let tournament = Tournament::new(name, format);
        self.tournaments.insert(tournament.id, tournament.clone());
        Ok(tournament)
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, TournamentError> {
        self.tournaments
            .get(&id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, TournamentError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    /// All tournaments, newest first.
    pub fn list_tournaments(&self) -> Vec<Tournament> {
        let mut tournaments: Vec<Tournament> = self.tournaments.values().cloned().collect();
        tournaments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tournaments
    }

    // ----- registrations -----

    /// Register a team to a tournament (Draft only, no duplicates).
    pub fn register_team(
        &mut self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> Result<TournamentTeam, TournamentError> {
        if self.tournament(tournament_id)?.status != TournamentStatus::Draft {
            return Err(TournamentError::InvalidStatus);
        }
        self.team(team_id)?;
        if self
            .tournament_teams
            .iter()
            .any(|tt| tt.tournament_id == tournament_id && tt.team_id == team_id)
        {
            return Err(TournamentError::AlreadyRegistered);
        }
        let row = TournamentTeam::new(tournament_id, team_id);
        self.tournament_teams.push(row.clone());
        Ok(row)
    }

    /// Register a player to a tournament (Draft only, no duplicates).
    /// The team assignment starts empty.
    pub fn register_player(
        &mut self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<TournamentPlayer, TournamentError> {
        if self.tournament(tournament_id)?.status != TournamentStatus::Draft {
            return Err(TournamentError::InvalidStatus);
        }
        self.player(player_id)?;
        if self
            .tournament_players
            .iter()
            .any(|tp| tp.tournament_id == tournament_id && tp.player_id == player_id)
        {
            return Err(TournamentError::AlreadyRegistered);
        }
        let row = TournamentPlayer::new(tournament_id, player_id);
        self.tournament_players.push(row.clone());
        Ok(row)
    }

    /// Teams registered to a tournament, in registration order.
    pub fn teams_for(&self, tournament_id: TournamentId) -> Vec<&TournamentTeam> {
        self.tournament_teams
            .iter()
            .filter(|tt| tt.tournament_id == tournament_id)
            .collect()
    }

    /// Players registered to a tournament, in registration order.
    pub fn players_for(&self, tournament_id: TournamentId) -> Vec<&TournamentPlayer> {
        self.tournament_players
            .iter()
            .filter(|tp| tp.tournament_id == tournament_id)
            .collect()
    }

    /// Write a batch of team assignments onto the tournament's player rows.
    /// Every targeted row is resolved before the first write, so a bad id
    /// leaves all rows untouched.
    pub fn set_assignments(
        &mut self,
        tournament_id: TournamentId,
        assignments: &[(PlayerId, TeamId)],
    ) -> Result<(), TournamentError> {
        for &(player_id, _) in assignments {
            if !self
                .tournament_players
                .iter()
                .any(|tp| tp.tournament_id == tournament_id && tp.player_id == player_id)
            {
                return Err(TournamentError::PlayerNotFound(player_id));
            }
        }
        for &(player_id, team_id) in assignments {
            if let Some(row) = self
                .tournament_players
                .iter_mut()
                .find(|tp| tp.tournament_id == tournament_id && tp.player_id == player_id)
            {
                row.team_id = Some(team_id);
            }
        }
        Ok(())
    }

    // ----- fixtures -----

    pub fn insert_fixtures(&mut self, fixtures: Vec<Fixture>) {
        self.fixtures.extend(fixtures);
    }

    pub fn fixture(&self, id: MatchId) -> Result<&Fixture, TournamentError> {
        self.fixtures
            .iter()
            .find(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    pub fn fixture_mut(&mut self, id: MatchId) -> Result<&mut Fixture, TournamentError> {
        self.fixtures
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// Fixtures of a tournament ordered by match date.
    pub fn fixtures_for(&self, tournament_id: TournamentId) -> Vec<&Fixture> {
        let mut fixtures: Vec<&Fixture> = self
            .fixtures
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .collect();
        fixtures.sort_by_key(|m| m.match_date);
        fixtures
    }

    // ----- standings -----

    /// Clear the tournament's standings and insert a zeroed row per team.
    pub fn reset_standings(&mut self, tournament_id: TournamentId, team_ids: &[TeamId]) {
        self.standings.retain(|s| s.tournament_id != tournament_id);
        self.standings.extend(
            team_ids
                .iter()
                .map(|&team_id| Standing::zeroed(tournament_id, team_id)),
        );
    }

    pub fn standings_for(&self, tournament_id: TournamentId) -> Vec<&Standing> {
        self.standings
            .iter()
            .filter(|s| s.tournament_id == tournament_id)
            .collect()
    }

    pub fn standing_mut(
        &mut self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> Result<&mut Standing, TournamentError> {
        self.standings
            .iter_mut()
            .find(|s| s.tournament_id == tournament_id && s.team_id == team_id)
            .ok_or(TournamentError::StandingMissing {
                tournament_id,
                team_id,
            })
    }

    pub fn has_standing(&self, tournament_id: TournamentId, team_id: TeamId) -> bool {
        self.standings
            .iter()
            .any(|s| s.tournament_id == tournament_id && s.team_id == team_id)
    }

    // ----- dashboard -----

    pub fn tournament_count(&self) -> usize {
        self.tournaments.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
