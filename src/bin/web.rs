//! Single binary web server: JSON API over the league and cup, persisted to files.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Env: HOST, PORT, DATA_FILE, HISTORY_FILE, ADMIN_USERNAME, ADMIN_PASSWORD_HASH
//! (or ADMIN_PASSWORD), COOKIE_SECURE.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use league_tournament_web::auth::{AdminCredentials, AuthError};
use league_tournament_web::logic::{
    add_group, add_upcoming, apply_manual_result, archive_cup, archive_league,
    assign_knockout_team, correct_manual_result, draw_cup_groups, edit_team_record,
    generate_league_schedule, record_fixture_result, record_group_result, record_knockout_result,
    refresh_league_table, remove_upcoming, reopen_fixture, set_group_teams, start_league,
    update_upcoming,
};
use league_tournament_web::models::{
    Competition, CompetitionError, FixtureId, GoalTimeline, RecordUpdate, SlotSide, Stage, Team,
    TeamUpdate, UpcomingUpdate,
};
use league_tournament_web::store::{EditError, Store, StoreError, StorePaths};
use serde::Deserialize;
use std::sync::RwLock;

/// Key under which the session remembers a logged-in admin.
const ADMIN_SESSION_KEY: &str = "admin";

/// Password used when neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set.
const FALLBACK_ADMIN_PASSWORD: &str = "admin";

struct AppState {
    store: RwLock<Store>,
    /// Held across file writes so snapshots reach disk in edit order.
    save_lock: tokio::sync::Mutex<()>,
    paths: StorePaths,
    admin: AdminCredentials,
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddTeamBody {
    name: String,
    #[serde(flatten)]
    details: TeamUpdate,
}

#[derive(Deserialize)]
struct StartLeagueBody {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct FixtureResultBody {
    #[serde(default)]
    home: Vec<u32>,
    #[serde(default)]
    away: Vec<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManualResultBody {
    team1: String,
    goals1: u32,
    team2: String,
    goals2: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorrectResultBody {
    team1: String,
    team2: String,
    old_goals1: u32,
    old_goals2: u32,
    goals1: u32,
    goals2: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupTeamsBody {
    teams: Vec<String>,
    #[serde(default)]
    qualifiers_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    #[serde(default)]
    team1_score: Option<u32>,
    #[serde(default)]
    team2_score: Option<u32>,
    #[serde(default)]
    completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawGroupsBody {
    group_count: usize,
}

#[derive(Deserialize)]
struct AssignTeamBody {
    team: String,
}

/// Path segment: team name (e.g. /api/teams/{name})
#[derive(Deserialize)]
struct TeamPath {
    name: String,
}

#[derive(Deserialize)]
struct UpcomingPath {
    id: String,
}

#[derive(Deserialize)]
struct FixturePath {
    id: FixtureId,
}

/// Path segments: group id and match index (e.g. /api/groups/group-A/matches/0)
#[derive(Deserialize)]
struct GroupMatchPath {
    id: String,
    index: usize,
}

#[derive(Deserialize)]
struct GroupPath {
    id: String,
}

/// Path segments: knockout stage and match index (e.g. /api/knockout/quarterFinals/1)
#[derive(Deserialize)]
struct KnockoutPath {
    stage: Stage,
    index: usize,
}

#[derive(Deserialize)]
struct KnockoutSlotPath {
    stage: Stage,
    index: usize,
    side: SlotSide,
}

fn error_json(e: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

fn is_admin(session: &Session) -> bool {
    matches!(session.get::<bool>(ADMIN_SESSION_KEY), Ok(Some(true)))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(error_json("Admin login required"))
}

/// Run `edit` on a copy of the store, persist both documents, then swap the
/// copy in and answer with the updated competition. A failed edit or save
/// leaves the served state untouched. Requires an admin session.
async fn apply_edit<F>(state: &State, session: &Session, edit: F) -> HttpResponse
where
    F: FnOnce(&mut Store) -> Result<(), CompetitionError>,
{
    if !is_admin(session) {
        return unauthorized();
    }
    let _saving = state.save_lock.lock().await;
    let draft = match state.store.read() {
        Ok(g) => g.clone(),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let (saved, competition) = match draft.commit_edit(&state.paths, edit).await {
        Ok(committed) => committed,
        Err(EditError::Rejected(e)) => return HttpResponse::BadRequest().json(error_json(e)),
        Err(EditError::Store(e)) => return store_failure(e),
    };
    match state.store.write() {
        Ok(mut g) => *g = saved,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    }
    HttpResponse::Ok()
        .content_type("application/json")
        .body(competition)
}

fn store_failure(e: StoreError) -> HttpResponse {
    log::error!("{}", e);
    HttpResponse::InternalServerError().json(error_json(e))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-tournament-web",
    })
}

/// Current competition snapshot; public.
#[get("/api/data")]
async fn api_get_data(state: State) -> HttpResponse {
    match state.store.read() {
        Ok(g) => HttpResponse::Ok().json(&g.competition),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Replace the whole snapshot (import).
#[put("/api/data")]
async fn api_put_data(state: State, session: Session, body: Json<Competition>) -> HttpResponse {
    let mut competition = body.into_inner();
    apply_edit(&state, &session, move |store| {
        competition.touch();
        store.competition = competition;
        Ok(())
    })
    .await
}

#[get("/api/history")]
async fn api_get_history(state: State) -> HttpResponse {
    match state.store.read() {
        Ok(g) => HttpResponse::Ok().json(&g.history),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[delete("/api/history")]
async fn api_clear_history(state: State, session: Session) -> HttpResponse {
    apply_edit(&state, &session, |store| {
        store.history.clear();
        Ok(())
    })
    .await
}

#[post("/api/auth/login")]
async fn api_login(state: State, session: Session, body: Json<LoginBody>) -> HttpResponse {
    match state.admin.verify(&body.username, &body.password) {
        Ok(()) => {
            session.renew();
            if let Err(e) = session.insert(ADMIN_SESSION_KEY, true) {
                log::error!("Could not store session: {}", e);
                return HttpResponse::InternalServerError().json(error_json("session error"));
            }
            log::info!("Admin {} logged in", state.admin.username);
            HttpResponse::Ok().json(serde_json::json!({ "admin": true }))
        }
        Err(e @ AuthError::MissingCredentials) => HttpResponse::BadRequest().json(error_json(e)),
        Err(e @ AuthError::InvalidCredentials) => {
            log::warn!("Failed admin login for {:?}", body.username.trim());
            HttpResponse::Unauthorized().json(error_json(e))
        }
    }
}

#[post("/api/auth/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "admin": false }))
}

#[get("/api/auth/status")]
async fn api_auth_status(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "admin": is_admin(&session) }))
}

/// Add a team to the league table; optional colors and stadium in the same body.
#[post("/api/teams")]
async fn api_add_team(state: State, session: Session, body: Json<AddTeamBody>) -> HttpResponse {
    let AddTeamBody { name, details } = body.into_inner();
    apply_edit(&state, &session, move |store| {
        let name = name.trim().to_string();
        store.competition.add_team(Team::new(name.as_str()))?;
        store.competition.update_team(&name, details)
    })
    .await
}

#[put("/api/teams/{name}")]
async fn api_update_team(
    state: State,
    session: Session,
    path: Path<TeamPath>,
    body: Json<TeamUpdate>,
) -> HttpResponse {
    let update = body.into_inner();
    apply_edit(&state, &session, move |store| {
        store.competition.update_team(&path.name, update)
    })
    .await
}

#[delete("/api/teams/{name}")]
async fn api_remove_team(state: State, session: Session, path: Path<TeamPath>) -> HttpResponse {
    apply_edit(&state, &session, move |store| store.competition.remove_team(&path.name)).await
}

/// Overwrite a team's league-table counters; the table is re-ranked.
#[put("/api/teams/{name}/record")]
async fn api_edit_record(
    state: State,
    session: Session,
    path: Path<TeamPath>,
    body: Json<RecordUpdate>,
) -> HttpResponse {
    let update = body.into_inner();
    apply_edit(&state, &session, move |store| {
        edit_team_record(&mut store.competition, &path.name, update)
    })
    .await
}

/// Switch to (or create) a league; the calendar shows its fixtures.
#[post("/api/leagues")]
async fn api_start_league(state: State, session: Session, body: Json<StartLeagueBody>) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        start_league(&mut store.competition, body.id.trim(), body.name.trim());
        Ok(())
    })
    .await
}

/// Generate the double round-robin calendar for the current league.
#[post("/api/schedule/generate")]
async fn api_generate_schedule(state: State, session: Session) -> HttpResponse {
    apply_edit(&state, &session, |store| {
        generate_league_schedule(&mut store.competition).map(|_| ())
    })
    .await
}

/// Enter a fixture result as goal minutes per side.
#[post("/api/fixtures/{id}/result")]
async fn api_fixture_result(
    state: State,
    session: Session,
    path: Path<FixturePath>,
    body: Json<FixtureResultBody>,
) -> HttpResponse {
    let FixtureResultBody { home, away } = body.into_inner();
    apply_edit(&state, &session, move |store| {
        record_fixture_result(&mut store.competition, path.id, GoalTimeline::new(home, away))
    })
    .await
}

#[post("/api/fixtures/{id}/reopen")]
async fn api_fixture_reopen(state: State, session: Session, path: Path<FixturePath>) -> HttpResponse {
    apply_edit(&state, &session, move |store| reopen_fixture(&mut store.competition, path.id)).await
}

/// Add a one-off result straight into the league table.
#[post("/api/league/results")]
async fn api_manual_result(state: State, session: Session, body: Json<ManualResultBody>) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        apply_manual_result(
            &mut store.competition,
            &body.team1,
            body.goals1,
            &body.team2,
            body.goals2,
        )
    })
    .await
}

/// Replace a result entered by hand.
#[put("/api/league/results")]
async fn api_correct_result(state: State, session: Session, body: Json<CorrectResultBody>) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        correct_manual_result(
            &mut store.competition,
            &body.team1,
            &body.team2,
            (body.old_goals1, body.old_goals2),
            (body.goals1, body.goals2),
        )
    })
    .await
}

/// Rebuild the league table from played fixtures.
#[post("/api/league/refresh")]
async fn api_refresh_league(state: State, session: Session) -> HttpResponse {
    apply_edit(&state, &session, |store| {
        refresh_league_table(&mut store.competition);
        Ok(())
    })
    .await
}

/// Archive the league table, then clear it.
#[post("/api/league/archive")]
async fn api_archive_league(state: State, session: Session) -> HttpResponse {
    apply_edit(&state, &session, |store| {
        let Store { competition, history } = store;
        archive_league(history, competition, chrono::Utc::now())
    })
    .await
}

#[post("/api/groups")]
async fn api_add_group(state: State, session: Session) -> HttpResponse {
    apply_edit(&state, &session, |store| {
        let id = add_group(&mut store.competition)?;
        log::info!("Added {}", id);
        Ok(())
    })
    .await
}

#[put("/api/groups/{id}/teams")]
async fn api_group_teams(
    state: State,
    session: Session,
    path: Path<GroupPath>,
    body: Json<GroupTeamsBody>,
) -> HttpResponse {
    let GroupTeamsBody { teams, qualifiers_count } = body.into_inner();
    apply_edit(&state, &session, move |store| {
        set_group_teams(&mut store.competition, &path.id, teams, qualifiers_count)
    })
    .await
}

#[put("/api/groups/{id}/matches/{index}")]
async fn api_group_match(
    state: State,
    session: Session,
    path: Path<GroupMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        record_group_result(
            &mut store.competition,
            &path.id,
            path.index,
            body.team1_score,
            body.team2_score,
            body.completed,
        )
    })
    .await
}

/// Randomly split the league table's teams into groups.
#[post("/api/groups/draw")]
async fn api_draw_groups(state: State, session: Session, body: Json<DrawGroupsBody>) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        draw_cup_groups(&mut store.competition, body.group_count, &mut rand::thread_rng())
    })
    .await
}

/// Enter a knockout score; a decided match pushes its winner forward.
#[put("/api/knockout/{stage}/{index}")]
async fn api_knockout_result(
    state: State,
    session: Session,
    path: Path<KnockoutPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        record_knockout_result(
            &mut store.competition,
            path.stage,
            path.index,
            body.team1_score,
            body.team2_score,
            body.completed,
        )
        .map(|advancement| log::debug!("{:?}", advancement))
    })
    .await
}

#[put("/api/knockout/{stage}/{index}/{side}")]
async fn api_knockout_assign(
    state: State,
    session: Session,
    path: Path<KnockoutSlotPath>,
    body: Json<AssignTeamBody>,
) -> HttpResponse {
    apply_edit(&state, &session, move |store| {
        assign_knockout_team(
            &mut store.competition,
            path.stage,
            path.index,
            path.side,
            body.team.trim(),
        )
    })
    .await
}

/// Add an upcoming-match entry; missing fields get defaults.
#[post("/api/upcoming")]
async fn api_add_upcoming(state: State, session: Session, body: Json<UpcomingUpdate>) -> HttpResponse {
    let update = body.into_inner();
    apply_edit(&state, &session, move |store| {
        add_upcoming(&mut store.competition, update);
        Ok(())
    })
    .await
}

#[put("/api/upcoming/{id}")]
async fn api_update_upcoming(
    state: State,
    session: Session,
    path: Path<UpcomingPath>,
    body: Json<UpcomingUpdate>,
) -> HttpResponse {
    let update = body.into_inner();
    apply_edit(&state, &session, move |store| {
        update_upcoming(&mut store.competition, &path.id, update)
    })
    .await
}

#[delete("/api/upcoming/{id}")]
async fn api_remove_upcoming(state: State, session: Session, path: Path<UpcomingPath>) -> HttpResponse {
    apply_edit(&state, &session, move |store| remove_upcoming(&mut store.competition, &path.id)).await
}

/// Archive the cup, then reset it.
#[post("/api/cup/archive")]
async fn api_archive_cup(state: State, session: Session) -> HttpResponse {
    apply_edit(&state, &session, |store| {
        let Store { competition, history } = store;
        archive_cup(history, competition, chrono::Utc::now());
        Ok(())
    })
    .await
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "data/competition.json".to_string()
}

fn default_history_file() -> String {
    "data/history.json".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn admin_credentials() -> AdminCredentials {
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| default_admin_username());
    if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH") {
        return AdminCredentials::new(username, hash);
    }
    match std::env::var("ADMIN_PASSWORD") {
        Ok(password) => AdminCredentials::from_password(username, &password),
        Err(_) => {
            log::warn!("ADMIN_PASSWORD_HASH and ADMIN_PASSWORD unset; using the default admin password");
            AdminCredentials::from_password(username, FALLBACK_ADMIN_PASSWORD)
        }
    }
}

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let paths = StorePaths {
        data: std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file()).into(),
        history: std::env::var("HISTORY_FILE")
            .unwrap_or_else(|_| default_history_file())
            .into(),
    };

    let store = Store::load(&paths)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    log::info!(
        "Loaded {} teams and {} fixtures from {}",
        store.competition.league.teams.len(),
        store.competition.league_matches.len(),
        paths.data.display()
    );

    let state = Data::new(AppState {
        store: RwLock::new(store),
        save_lock: tokio::sync::Mutex::new(()),
        paths,
        admin: admin_credentials(),
    });
    // Sessions do not survive a restart.
    let key = Key::generate();
    let secure = cookie_secure();

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(secure)
                    .build(),
            )
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_data)
            .service(api_put_data)
            .service(api_get_history)
            .service(api_clear_history)
            .service(api_login)
            .service(api_logout)
            .service(api_auth_status)
            .service(api_add_team)
            .service(api_update_team)
            .service(api_remove_team)
            .service(api_edit_record)
            .service(api_start_league)
            .service(api_generate_schedule)
            .service(api_fixture_result)
            .service(api_fixture_reopen)
            .service(api_manual_result)
            .service(api_correct_result)
            .service(api_refresh_league)
            .service(api_archive_league)
            .service(api_draw_groups)
            .service(api_add_group)
            .service(api_group_teams)
            .service(api_group_match)
            .service(api_knockout_assign)
            .service(api_knockout_result)
            .service(api_add_upcoming)
            .service(api_update_upcoming)
            .service(api_remove_upcoming)
            .service(api_archive_cup)
    })
    .bind(bind)?
    .run()
    .await
}
