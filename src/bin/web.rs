//! Single binary score keeper: HTML page from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 127.0.0.1:8080 by default. Override with env: HOST, PORT.
//! History and settings are kept in DOMINOS_DATA_FILE (default dominos-data.json; empty disables it).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use dominos_scorekeeper::{
    add_long_press_score, add_score, configure_players, end_round, export_game_csv,
    game_standings, match_title, parse_score_input, persist_new_game, persist_round,
    player_slots, rank_by_score, rank_by_wins, remove_score, restart_round, start_new_round,
    GameHandle, GameStatus, GameStore, MatchConfig, MatchEngine, MatchError, MemoryStore,
    NewGame, PlayerId, PlayerStats, RoundSettlement, ScoreEntry, ScoreId, Settings,
    SettingsStore,
};
use dominos_scorekeeper::models::{validate_long_press_increment, TOURNAMENT_GAME_SIZES};
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockWriteGuard};

/// The one live match plus the history/settings store.
struct AppState {
    engine: RwLock<MatchEngine>,
    store: MemoryStore,
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Player as shown on the score board.
#[derive(Serialize)]
struct PlayerView {
    id: PlayerId,
    name: String,
    #[serde(flatten)]
    stats: PlayerStats,
    score: Vec<ScoreEntry>,
    rank: usize,
}

/// Full match state returned by every match endpoint.
#[derive(Serialize)]
struct MatchView {
    title: String,
    status: GameStatus,
    config: MatchConfig,
    winner_id: Option<PlayerId>,
    loser_id: Option<PlayerId>,
    game_id: Option<GameHandle>,
    players: Vec<PlayerView>,
    /// Set when the change was applied but could not be saved to history.
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

impl MatchView {
    fn new(engine: &MatchEngine, notice: Option<String>) -> Self {
        let ranks = if engine.config.tournament_mode {
            rank_by_wins(&engine.players)
        } else {
            rank_by_score(&engine.players)
        };
        let players = engine
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.name.clone(),
                stats: p.stats(),
                score: p.score.clone(),
                rank: ranks
                    .iter()
                    .find(|r| r.entry.id == p.id)
                    .map(|r| r.rank)
                    .unwrap_or(1),
            })
            .collect();
        Self {
            title: match_title(engine),
            status: engine.status,
            config: engine.config.clone(),
            winner_id: engine.winner_id,
            loser_id: engine.loser_id,
            game_id: engine.registration.as_ref().map(|r| r.game_id),
            players,
            notice,
        }
    }
}

#[derive(Deserialize)]
struct ConfigBody {
    game_size: Option<usize>,
    winning_limit: Option<u32>,
}

#[derive(Deserialize)]
struct PlayersBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct PlayingBody {
    is_playing: bool,
}

/// Raw prompt input; parsed on the server so malformed numbers get a validation error.
#[derive(Deserialize)]
struct ScoreBody {
    value: String,
}

#[derive(Deserialize)]
struct SettingsBody {
    long_press_increment: Option<u32>,
    trio_mode: Option<bool>,
    multi_lose: Option<bool>,
}

#[derive(Deserialize)]
struct SlotsQuery {
    game_size: Option<usize>,
}

/// Path segment: player id (e.g. /api/match/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

/// Path segments: player id and score entry id.
#[derive(Deserialize)]
struct ScorePath {
    player_id: PlayerId,
    score_id: ScoreId,
}

/// Path segment: stored game id (e.g. /api/history/{id})
#[derive(Deserialize)]
struct GamePath {
    id: GameHandle,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn bad_request(e: MatchError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn storage_error(e: impl std::fmt::Display) -> HttpResponse {
    log::error!("Storage error: {}", e);
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
}

fn engine_write(state: &State) -> Result<RwLockWriteGuard<'_, MatchEngine>, HttpResponse> {
    state.engine.write().map_err(|_| lock_error())
}

/// Apply `f` to the engine and answer with the resulting match view.
fn mutate<F>(state: &State, f: F) -> HttpResponse
where
    F: FnOnce(&mut MatchEngine) -> Result<(), MatchError>,
{
    let mut g = match engine_write(state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match f(&mut *g) {
        Ok(()) => HttpResponse::Ok().json(MatchView::new(&g, None)),
        Err(e) => bad_request(e),
    }
}

/// Write a settled round to history. The in-memory result stands either way.
async fn save_round(state: &State, settlement: Option<RoundSettlement>) -> Option<String> {
    let settlement = settlement?;
    let registration = match state.engine.read() {
        Ok(g) => g.registration.clone(),
        Err(_) => None,
    };
    let Some(registration) = registration else {
        log::warn!("Round settled for a game that was never saved; not recorded");
        return Some("Round result was not saved to history".to_string());
    };
    match persist_round(&state.store, &registration, &settlement).await {
        Ok(_) => None,
        Err(e) => {
            log::error!("Failed to save round of game {}: {}", registration.game_id, e);
            Some(format!("Round result was not saved: {}", e))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "dominos-scorekeeper",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Current match state.
#[get("/api/match")]
async fn api_get_match(state: State) -> HttpResponse {
    match state.engine.read() {
        Ok(g) => HttpResponse::Ok().json(MatchView::new(&g, None)),
        Err(_) => lock_error(),
    }
}

/// Name fields for the setup form (defaults to the configured game size).
#[get("/api/match/slots")]
async fn api_player_slots(state: State, query: web::Query<SlotsQuery>) -> HttpResponse {
    let game_size = match state.engine.read() {
        Ok(g) => query
            .game_size
            .unwrap_or(g.config.game_size)
            .min(*TOURNAMENT_GAME_SIZES.end()),
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(player_slots::<String>(game_size, &[]))
}

/// Update game size and/or winning limit (before the match starts).
#[put("/api/match/config")]
async fn api_set_config(state: State, body: Json<ConfigBody>) -> HttpResponse {
    mutate(&state, |engine| {
        if let Some(size) = body.game_size {
            engine.set_game_size(size)?;
        }
        if let Some(points) = body.winning_limit {
            engine.set_winning_limit(points)?;
        }
        Ok(())
    })
}

/// Toggle tournament mode (before the match starts).
#[post("/api/match/tournament-mode")]
async fn api_toggle_tournament_mode(state: State) -> HttpResponse {
    mutate(&state, |engine| engine.toggle_tournament_mode())
}

/// Submit player names: configure the roster, then save the new game to history.
#[post("/api/match/players")]
async fn api_configure_players(state: State, body: Json<PlayersBody>) -> HttpResponse {
    let settings = state.store.load_settings().await;
    let new_game = {
        let mut g = match engine_write(&state) {
            Ok(guard) => guard,
            Err(resp) => return resp,
        };
        g.apply_settings(&settings);
        if let Err(e) = configure_players(&mut g, &body.names) {
            return bad_request(e);
        }
        NewGame::from_engine(&g)
    };

    let notice = match persist_new_game(&state.store, &new_game).await {
        Ok(registration) => {
            let mut g = match engine_write(&state) {
                Ok(guard) => guard,
                Err(resp) => return resp,
            };
            // The game may have been ended while the write was in flight.
            let same_roster = g.players.first().map(|p| p.id) == new_game.players.first().map(|(id, _)| *id);
            if same_roster {
                g.attach_registration(registration);
            }
            None
        }
        Err(e) => {
            log::error!("Failed to save new game: {}", e);
            Some(format!("Game was not saved to history: {}", e))
        }
    };

    match state.engine.read() {
        Ok(g) => HttpResponse::Ok().json(MatchView::new(&g, notice)),
        Err(_) => lock_error(),
    }
}

/// Bench or activate a player for the next tournament round.
#[put("/api/match/players/{player_id}/playing")]
async fn api_set_playing(state: State, path: Path<PlayerPath>, body: Json<PlayingBody>) -> HttpResponse {
    mutate(&state, |engine| engine.set_player_playing(path.player_id, body.is_playing))
}

/// Start a round with the selected players.
#[post("/api/match/round/start")]
async fn api_start_round(state: State) -> HttpResponse {
    mutate(&state, start_new_round)
}

/// Add a typed score. Blank input is treated as a cancelled prompt.
#[post("/api/match/players/{player_id}/scores")]
async fn api_add_score(state: State, path: Path<PlayerPath>, body: Json<ScoreBody>) -> HttpResponse {
    mutate(&state, |engine| {
        if let Some(value) = parse_score_input(&body.value)? {
            add_score(engine, path.player_id, value);
        }
        Ok(())
    })
}

/// Long press: add the configured increment.
#[post("/api/match/players/{player_id}/scores/long-press")]
async fn api_add_long_press_score(state: State, path: Path<PlayerPath>) -> HttpResponse {
    let settings = state.store.load_settings().await;
    mutate(&state, |engine| {
        add_long_press_score(engine, path.player_id, &settings);
        Ok(())
    })
}

/// Remove one score entry (missing entries are ignored).
#[delete("/api/match/players/{player_id}/scores/{score_id}")]
async fn api_remove_score(state: State, path: Path<ScorePath>) -> HttpResponse {
    mutate(&state, |engine| {
        remove_score(engine, path.player_id, path.score_id);
        Ok(())
    })
}

/// End the round: settle a tournament round, or restart a normal game.
#[post("/api/match/round/end")]
async fn api_end_round(state: State) -> HttpResponse {
    let settlement = {
        let mut g = match engine_write(&state) {
            Ok(guard) => guard,
            Err(resp) => return resp,
        };
        let result = if g.config.tournament_mode {
            end_round(&mut g)
        } else {
            restart_round(&mut g)
        };
        match result {
            Ok(s) => s,
            Err(e) => return bad_request(e),
        }
    };

    let notice = save_round(&state, settlement).await;
    match state.engine.read() {
        Ok(g) => HttpResponse::Ok().json(MatchView::new(&g, notice)),
        Err(_) => lock_error(),
    }
}

/// End the game or tournament: back to setup.
#[post("/api/match/end")]
async fn api_end_game(state: State) -> HttpResponse {
    mutate(&state, |engine| {
        engine.end_game();
        Ok(())
    })
}

#[get("/api/settings")]
async fn api_get_settings(state: State) -> HttpResponse {
    HttpResponse::Ok().json(state.store.load_settings().await)
}

/// Update settings; rule flags take effect on the live match immediately.
#[put("/api/settings")]
async fn api_set_settings(state: State, body: Json<SettingsBody>) -> HttpResponse {
    let mut settings: Settings = state.store.load_settings().await;
    if let Some(value) = body.long_press_increment {
        match validate_long_press_increment(value) {
            Ok(v) => settings.long_press_increment = v,
            Err(e) => return bad_request(e),
        }
    }
    if let Some(trio) = body.trio_mode {
        settings.trio_mode = trio;
    }
    if let Some(multi_lose) = body.multi_lose {
        settings.multi_lose = multi_lose;
    }

    match engine_write(&state) {
        Ok(mut g) => g.apply_settings(&settings),
        Err(resp) => return resp,
    }
    if let Err(e) = state.store.save_settings(&settings).await {
        return storage_error(e);
    }
    HttpResponse::Ok().json(settings)
}

/// Game history, newest first.
#[get("/api/history")]
async fn api_list_games(state: State) -> HttpResponse {
    match state.store.list_games().await {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => storage_error(e),
    }
}

/// One stored game with its rounds and final standings.
#[get("/api/history/{id}")]
async fn api_get_game(state: State, path: Path<GamePath>) -> HttpResponse {
    match state.store.get_game(path.id).await {
        Ok(Some(game)) => {
            let standings = game_standings(&game);
            HttpResponse::Ok().json(serde_json::json!({ "game": game, "standings": standings }))
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No game" })),
        Err(e) => storage_error(e),
    }
}

/// CSV export of one stored game.
#[get("/api/history/{id}/export.csv")]
async fn api_export_game(state: State, path: Path<GamePath>) -> HttpResponse {
    let game = match state.store.get_game(path.id).await {
        Ok(Some(game)) => game,
        Ok(None) => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game" })),
        Err(e) => return storage_error(e),
    };
    let mut buf = Vec::new();
    if let Err(e) = export_game_csv(&game, &mut buf) {
        return storage_error(e);
    }
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"game-{}.csv\"", game.id),
        ))
        .body(buf)
}

#[delete("/api/history/{id}")]
async fn api_delete_game(state: State, path: Path<GamePath>) -> HttpResponse {
    match state.store.delete_game(path.id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => storage_error(e),
    }
}

#[delete("/api/history")]
async fn api_delete_all_games(state: State) -> HttpResponse {
    match state.store.delete_all_games().await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => storage_error(e),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "dominos-data.json".to_string()
}

async fn open_store() -> std::io::Result<MemoryStore> {
    let path = std::env::var("DOMINOS_DATA_FILE").unwrap_or_else(|_| default_data_file());
    if path.is_empty() {
        log::info!("History snapshot disabled, keeping history in memory only");
        return Ok(MemoryStore::new());
    }
    MemoryStore::open(&path)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
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

    let store = open_store().await?;
    let mut engine = MatchEngine::default();
    engine.apply_settings(&store.load_settings().await);

    let state = Data::new(AppState {
        engine: RwLock::new(engine),
        store,
    });

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_get_match)
            .service(api_player_slots)
            .service(api_set_config)
            .service(api_toggle_tournament_mode)
            .service(api_configure_players)
            .service(api_set_playing)
            .service(api_start_round)
            .service(api_add_score)
            .service(api_add_long_press_score)
            .service(api_remove_score)
            .service(api_end_round)
            .service(api_end_game)
            .service(api_get_settings)
            .service(api_set_settings)
            .service(api_list_games)
            .service(api_export_game)
            .service(api_get_game)
            .service(api_delete_game)
            .service(api_delete_all_games)
            .service(Files::new("/static", "static"))
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
