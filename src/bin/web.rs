//! Single binary web server: JSON pairing API plus sessioned tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use debate_tournament_web::{
    generate_pairings, PairingRequest, Team, Tournament, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID (sessioned). Entries are removed
/// after long inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    seed: i32,
    #[serde(default)]
    club: Option<String>,
}

/// How the next round's matchups are chosen.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RoundStrategy {
    /// Roster order, last team byes on an odd roster.
    #[default]
    Order,
    /// Random legal matching.
    Random,
    /// Cost-minimized power matching.
    Power,
}

#[derive(Deserialize)]
struct GenerateRoundQuery {
    #[serde(default)]
    strategy: RoundStrategy,
}

#[derive(Deserialize)]
struct RecordResultBody {
    winner: Uuid,
    loser: Uuid,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "debate-tournament-web",
    })
}

/// Stateless pairing: roster snapshot in, matchups by name out.
/// A failed pairing returns 400 with the same response envelope.
#[post("/api/pairing/generate")]
async fn api_generate_pairings(body: Json<PairingRequest>) -> HttpResponse {
    log::info!(
        "Received pairing request for round {} with {} teams",
        body.round_number,
        body.teams.len()
    );
    let response = generate_pairings(&body);
    if response.success {
        log::info!(
            "Generated {} matchups for round {}",
            response.matchups.len(),
            body.round_number
        );
        HttpResponse::Ok().json(response)
    } else {
        log::error!(
            "Failed to generate pairings for round {}: {}",
            body.round_number,
            response.error.as_deref().unwrap_or("unknown error")
        );
        HttpResponse::BadRequest().json(response)
    }
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Register a team (name must be unique within the tournament).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let mut team = Team::new(body.name.trim()).with_seed(body.seed);
    if let Some(club) = &body.club {
        team = team.with_club(club.clone());
    }
    match t.add_team(team) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Generate and commit the next round with the requested strategy
/// (?strategy=order|random|power). The round only lands if it is legal.
#[post("/api/tournaments/{id}/rounds/generate")]
async fn api_generate_round(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<GenerateRoundQuery>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let round = match query.strategy {
        RoundStrategy::Order => Ok(t.generate_round()),
        RoundStrategy::Random => t.generate_random_round(&mut rand::thread_rng()),
        RoundStrategy::Power => t.generate_powermatched_round(),
    };
    let result = round.and_then(|r| t.add_round(r));
    match result {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record a decided matchup outcome: winner gains a win, loser a loss.
#[put("/api/tournaments/{id}/results")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.record_result(body.winner, body.loser) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Current standings: wins descending, losses ascending.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.tournament.standings())
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
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

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_generate_pairings)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_generate_round)
            .service(api_record_result)
            .service(api_standings)
    })
    .bind(bind)?
    .run()
    .await
}
