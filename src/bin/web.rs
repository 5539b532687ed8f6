//! Web server: JSON API over one ranked-cycle engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set DATA_DIR to persist state to disk (otherwise it lives in memory).

use actix_web::{
    get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use ranked_cycle::config::Settings;
use ranked_cycle::export::leaderboard_csv;
use ranked_cycle::{
    Engine, EntrantId, FileStore, MatchFilter, MatchOrder, MemoryStore, StageTag, StandingsView,
    StateStore, Tier, TournamentError,
};
use serde::Deserialize;
use std::sync::RwLock;

/// One engine per process; writes serialize all mutations, reads run concurrently.
type AppState = Data<RwLock<Engine>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AdmitBody {
    name: String,
}

#[derive(Deserialize)]
struct ResultBody {
    player1: EntrantId,
    player2: EntrantId,
    score1: f64,
    score2: f64,
}

#[derive(Deserialize)]
struct LeagueResultBody {
    /// Tier label, e.g. "A".
    tier: String,
    #[serde(flatten)]
    result: ResultBody,
}

#[derive(Deserialize)]
struct KnockoutResultBody {
    bracket: String,
    #[serde(flatten)]
    result: ResultBody,
}

#[derive(Deserialize)]
struct MatchQuery {
    entrant: Option<EntrantId>,
    stage: Option<StageTag>,
    #[serde(default)]
    order: MatchOrder,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::UnknownEntrant(_)
        | TournamentError::UnknownTier(_)
        | TournamentError::UnknownBracket(_) => HttpResponse::NotFound().json(body),
        TournamentError::DuplicateName(_)
        | TournamentError::OutOfSequenceReport
        | TournamentError::StageMismatch { .. }
        | TournamentError::IncompleteRound => HttpResponse::Conflict().json(body),
        TournamentError::Persistence(_) | TournamentError::Export(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => {
            log::warn!("Rejected: {}", e);
            error_response(&e)
        }
    }
}

/// Run a mutation under the write lock. The guard is held through the store's
/// save (fsync + rename for `FileStore`), so a slow disk stalls this worker and
/// queues every other request behind the lock.
fn mutate<T: serde::Serialize>(
    state: &AppState,
    op: impl FnOnce(&mut Engine) -> Result<T, TournamentError>,
) -> HttpResponse {
    match state.write() {
        Ok(mut engine) => respond(op(&mut engine)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Run a query under the read lock.
fn query<T: serde::Serialize>(
    state: &AppState,
    op: impl FnOnce(&Engine) -> Result<T, TournamentError>,
) -> HttpResponse {
    match state.read() {
        Ok(engine) => respond(op(&engine)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "ranked-cycle",
    })
}

/// Full tournament document (stage, pairings, accumulators).
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    query(&state, |e| Ok(e.tournament().state().clone()))
}

/// Entrants by rating, highest first.
#[get("/api/entrants")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    query(&state, |e| Ok(e.leaderboard()))
}

#[get("/api/leaderboard.csv")]
async fn api_leaderboard_csv(state: AppState) -> HttpResponse {
    let csv = match state.read() {
        Ok(engine) => leaderboard_csv(&engine.leaderboard()),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match csv {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(body),
        Err(e) => error_response(&e),
    }
}

#[get("/api/entrants/{id}")]
async fn api_get_entrant(state: AppState, path: Path<EntrantId>) -> HttpResponse {
    let id = path.into_inner();
    query(&state, |e| e.entrant(id))
}

/// Admit an entrant (flagged waiting while a cycle is running).
#[post("/api/entrants")]
async fn api_admit(state: AppState, body: Json<AdmitBody>) -> HttpResponse {
    mutate(&state, |e| e.admit(&body.name))
}

#[get("/api/matches")]
async fn api_matches(state: AppState, q: Query<MatchQuery>) -> HttpResponse {
    let filter = MatchFilter {
        entrant: q.entrant,
        stage: q.stage,
    };
    let order = q.order;
    query(&state, |e| Ok(e.matches(&filter, order)))
}

/// Free-standing rated match.
#[post("/api/matches")]
async fn api_report_match(state: AppState, body: Json<ResultBody>) -> HttpResponse {
    mutate(&state, |e| {
        e.report_match(body.player1, body.player2, body.score1, body.score2)
    })
}

#[post("/api/opener/start")]
async fn api_start_opener(state: AppState) -> HttpResponse {
    mutate(&state, |e| e.start_opener())
}

#[post("/api/opener/results")]
async fn api_opener_result(state: AppState, body: Json<ResultBody>) -> HttpResponse {
    mutate(&state, |e| {
        e.report_opener_result(body.player1, body.player2, body.score1, body.score2)
    })
}

#[post("/api/swiss/start")]
async fn api_start_swiss(state: AppState) -> HttpResponse {
    mutate(&state, |e| e.start_swiss())
}

#[post("/api/swiss/results")]
async fn api_swiss_result(state: AppState, body: Json<ResultBody>) -> HttpResponse {
    mutate(&state, |e| {
        e.report_swiss_result(body.player1, body.player2, body.score1, body.score2)
    })
}

#[post("/api/league/results")]
async fn api_league_result(state: AppState, body: Json<LeagueResultBody>) -> HttpResponse {
    let tier: Tier = match body.tier.parse() {
        Ok(tier) => tier,
        Err(e) => return error_response(&e),
    };
    let r = &body.result;
    mutate(&state, |e| {
        e.report_league_result(tier, r.player1, r.player2, r.score1, r.score2)
    })
}

#[post("/api/league/finish")]
async fn api_finish_league(state: AppState) -> HttpResponse {
    mutate(&state, |e| e.finish_league())
}

#[post("/api/knockout/results")]
async fn api_knockout_result(state: AppState, body: Json<KnockoutResultBody>) -> HttpResponse {
    let r = &body.result;
    mutate(&state, |e| {
        e.report_knockout_result(&body.bracket, r.player1, r.player2, r.score1, r.score2)
    })
}

#[get("/api/standings/swiss")]
async fn api_swiss_standings(state: AppState) -> HttpResponse {
    query(&state, |e| e.get_standings(StandingsView::Swiss))
}

#[get("/api/standings/league/{tier}")]
async fn api_league_standings(state: AppState, path: Path<String>) -> HttpResponse {
    let tier: Tier = match path.parse() {
        Ok(tier) => tier,
        Err(e) => return error_response(&e),
    };
    query(&state, |e| e.get_standings(StandingsView::League(tier)))
}

#[get("/api/seasons")]
async fn api_seasons(state: AppState) -> HttpResponse {
    query(&state, |e| Ok(e.get_season_archive().to_vec()))
}

fn open_store(settings: &Settings) -> std::io::Result<Box<dyn StateStore>> {
    match &settings.data_dir {
        Some(dir) => {
            let store = FileStore::open(dir)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            log::info!("Persisting state to {}", store.dir().display());
            Ok(Box::new(store))
        }
        None => {
            log::warn!("DATA_DIR not set; state is kept in memory only");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env();
    let engine = Engine::open(open_store(&settings)?)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = Data::new(RwLock::new(engine));

    let bind = (settings.host.as_str(), settings.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_leaderboard)
            .service(api_leaderboard_csv)
            .service(api_get_entrant)
            .service(api_admit)
            .service(api_matches)
            .service(api_report_match)
            .service(api_start_opener)
            .service(api_opener_result)
            .service(api_start_swiss)
            .service(api_swiss_result)
            .service(api_league_result)
            .service(api_finish_league)
            .service(api_knockout_result)
            .service(api_swiss_standings)
            .service(api_league_standings)
            .service(api_seasons)
            .route("/", web::get().to(index))
    })
    .bind(bind)?
    .run()
    .await
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "ranked-cycle",
        "docs": "see /api/health, /api/entrants, /api/tournament, /api/seasons",
    }))
}
