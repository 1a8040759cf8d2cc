//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), ACCESS_CODE
//! (when set, sign-in requires it).

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use league_tournament_web::{
    league_table, randomize_assignments, start_tournament, submit_score, tournament_insights,
    Fixture, MatchId, Player, PlayerId, Standing, Store, Team, TeamId, Tournament,
    TournamentError, TournamentFormat, TournamentId, TournamentStatus,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// In-memory state: the whole store behind one lock. Every operation runs
/// under a single writer, which is what keeps multi-row updates atomic.
type AppState = Data<RwLock<Store>>;

const SESSION_ORGANIZER_KEY: &str = "organizer";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct SignInBody {
    name: String,
    #[serde(default)]
    access_code: Option<String>,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    format: TournamentFormat,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    team_id: TeamId,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct ScoreBody {
    home_score: u32,
    away_score: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct IdPath {
    id: uuid::Uuid,
}

#[derive(Serialize)]
struct AssignmentDto {
    player_id: PlayerId,
    team_id: TeamId,
}

#[derive(Serialize)]
struct PlayerEntry {
    player: Player,
    team: Option<Team>,
}

#[derive(Serialize)]
struct StandingRow {
    #[serde(flatten)]
    standing: Standing,
    team_name: String,
}

/// Everything the tournament page needs in one response.
#[derive(Serialize)]
struct TournamentDetail {
    tournament: Tournament,
    teams: Vec<Team>,
    players: Vec<PlayerEntry>,
    matches: Vec<Fixture>,
    standings: Vec<StandingRow>,
}

/// Map a domain error to a response: missing rows are 404, a lost
/// same-match race is 409 so the client can say someone else already
/// recorded the result, partial state is 500, the rest are 400.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_)
        | TournamentError::TeamNotFound(_)
        | TournamentError::PlayerNotFound(_)
        | TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::MatchAlreadyCompleted(_) => HttpResponse::Conflict().json(body),
        TournamentError::StandingMissing { .. } => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn current_organizer(session: &Session) -> Option<String> {
    session.get::<String>(SESSION_ORGANIZER_KEY).ok().flatten()
}

/// All /api routes except health and sign-in require an organizer session.
fn require_organizer(session: &Session) -> Result<String, HttpResponse> {
    current_organizer(session).ok_or_else(|| {
        HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Sign in required" }))
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

// ----- session -----

/// Sign in as an organizer. When ACCESS_CODE is set in the environment the
/// body must carry the matching code.
#[post("/api/session")]
async fn api_sign_in(session: Session, body: Json<SignInBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_response(&TournamentError::EmptyName);
    }
    if let Ok(expected) = std::env::var("ACCESS_CODE") {
        if body.access_code.as_deref() != Some(expected.as_str()) {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Wrong access code" }));
        }
    }
    if session.insert(SESSION_ORGANIZER_KEY, name.to_string()).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    log::info!("Organizer '{}' signed in", name);
    HttpResponse::Ok().json(serde_json::json!({ "organizer": name }))
}

#[get("/api/session")]
async fn api_whoami(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "organizer": current_organizer(&session) }))
}

#[delete("/api/session")]
async fn api_sign_out(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

// ----- dashboard -----

#[get("/api/dashboard")]
async fn api_dashboard(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournaments = g.list_tournaments();
    let in_progress = tournaments
        .iter()
        .filter(|t| t.status == TournamentStatus::InProgress)
        .count();
    HttpResponse::Ok().json(serde_json::json!({
        "tournaments": g.tournament_count(),
        "teams": g.team_count(),
        "players": g.player_count(),
        "in_progress": in_progress,
    }))
}

// ----- team registry -----

#[post("/api/teams")]
async fn api_create_team(state: AppState, session: Session, body: Json<NameBody>) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.create_team(&body.name) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&e),
    }
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.list_teams())
}

#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_team(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

// ----- player registry -----

#[post("/api/players")]
async fn api_create_player(
    state: AppState,
    session: Session,
    body: Json<NameBody>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.create_player(&body.name) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.list_players())
}

#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, session: Session, path: Path<IdPath>) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_player(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

// ----- tournaments -----

#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.create_tournament(&body.name, body.format) {
        Ok(tournament) => HttpResponse::Ok().json(tournament),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.list_tournaments())
}

fn tournament_detail(
    g: &Store,
    tournament_id: TournamentId,
) -> Result<TournamentDetail, TournamentError> {
    let tournament = g.tournament(tournament_id)?.clone();
    let mut teams = Vec::new();
    for tt in g.teams_for(tournament_id) {
        teams.push(g.team(tt.team_id)?.clone());
    }
    let mut players = Vec::new();
    for tp in g.players_for(tournament_id) {
        let team = match tp.team_id {
            Some(team_id) => Some(g.team(team_id)?.clone()),
            None => None,
        };
        players.push(PlayerEntry {
            player: g.player(tp.player_id)?.clone(),
            team,
        });
    }
    let matches = g.fixtures_for(tournament_id).into_iter().cloned().collect();
    let mut standings = Vec::new();
    for standing in league_table(g, tournament_id) {
        let team_name = g.team(standing.team_id)?.name.clone();
        standings.push(StandingRow {
            standing,
            team_name,
        });
    }
    Ok(TournamentDetail {
        tournament,
        teams,
        players,
        matches,
        standings,
    })
}

/// Get a tournament with its teams, players, fixtures, and standings.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match tournament_detail(&g, path.id) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => error_response(&e),
    }
}

/// Register an existing team to a tournament (Draft only).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.register_team(path.id, body.team_id) {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => error_response(&e),
    }
}

/// Register an existing player to a tournament (Draft only).
#[post("/api/tournaments/{id}/players")]
async fn api_register_player(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<RegisterPlayerBody>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.register_player(path.id, body.player_id) {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => error_response(&e),
    }
}

/// Randomize team assignments (Draft only; may be re-run until start).
#[post("/api/tournaments/{id}/assignments")]
async fn api_randomize_assignments(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match randomize_assignments(&mut g, path.id) {
        Ok(assignments) => HttpResponse::Ok().json(
            assignments
                .into_iter()
                .map(|(player_id, team_id)| AssignmentDto { player_id, team_id })
                .collect::<Vec<_>>(),
        ),
        Err(e) => error_response(&e),
    }
}

/// Start the tournament: generate fixtures, reset standings, Draft -> InProgress.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match start_tournament(&mut g, path.id) {
        Ok(()) => match tournament_detail(&g, path.id) {
            Ok(detail) => HttpResponse::Ok().json(detail),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// Record the final score of a fixture.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_submit_score(
    state: AppState,
    session: Session,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.fixture(path.match_id) {
        Ok(fixture) if fixture.tournament_id != path.id => {
            return error_response(&TournamentError::MatchNotFound(path.match_id))
        }
        Ok(_) => {}
        Err(e) => return error_response(&e),
    }
    match submit_score(&mut g, path.match_id, body.home_score, body.away_score) {
        Ok(()) => match tournament_detail(&g, path.id) {
            Ok(detail) => HttpResponse::Ok().json(detail),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// Standings sorted for display.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = g.tournament(path.id) {
        return error_response(&e);
    }
    let mut rows = Vec::new();
    for standing in league_table(&g, path.id) {
        match g.team(standing.team_id) {
            Ok(team) => rows.push(StandingRow {
                team_name: team.name.clone(),
                standing,
            }),
            Err(e) => return error_response(&e),
        }
    }
    HttpResponse::Ok().json(rows)
}

fn write_standings_csv(rows: &[(String, Standing)]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "team",
        "played",
        "wins",
        "draws",
        "losses",
        "goals_for",
        "goals_against",
        "goal_difference",
        "points",
    ])?;
    for (team_name, standing) in rows {
        writer.write_record([
            team_name.clone(),
            standing.played.to_string(),
            standing.wins.to_string(),
            standing.draws.to_string(),
            standing.losses.to_string(),
            standing.goals_for.to_string(),
            standing.goals_against.to_string(),
            standing.goal_difference.to_string(),
            standing.points.to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Standings as a CSV download.
#[get("/api/tournaments/{id}/standings/export")]
async fn api_standings_export(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = g.tournament(path.id) {
        return error_response(&e);
    }
    let mut rows = Vec::new();
    for standing in league_table(&g, path.id) {
        match g.team(standing.team_id) {
            Ok(team) => rows.push((team.name.clone(), standing)),
            Err(e) => return error_response(&e),
        }
    }
    match write_standings_csv(&rows) {
        Ok(data) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"standings.csv\"",
            ))
            .body(data),
        Err(e) => {
            log::error!("Failed to build standings CSV: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

/// Commentary lines for the tournament overview.
#[get("/api/tournaments/{id}/insights")]
async fn api_insights(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_organizer(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match tournament_insights(&g, path.id) {
        Ok(lines) => HttpResponse::Ok().json(serde_json::json!({ "insights": lines })),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Store::new()));

    // Sessions are cookie-backed; the key is per-process, so a restart signs
    // everyone out.
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_sign_in)
            .service(api_whoami)
            .service(api_sign_out)
            .service(api_dashboard)
            .service(api_create_team)
            .service(api_list_teams)
            .service(api_delete_team)
            .service(api_create_player)
            .service(api_list_players)
            .service(api_delete_player)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_register_team)
            .service(api_register_player)
            .service(api_randomize_assignments)
            .service(api_start_tournament)
            .service(api_submit_score)
            .service(api_standings)
            .service(api_standings_export)
            .service(api_insights)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
