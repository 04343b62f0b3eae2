use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use actix_web::cookie::Key;
use actix_files::Files;
use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use crate::game::{Bucket, CardKey, Command, GameSession, SampleKey};
use crate::parser::parse_roster;

const GAME_ID_KEY: &str = "game_id";
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Games kept in memory at once before the least recently used is dropped
pub const MAX_GAMES: usize = 1000;

/// In-memory games keyed by session id, capped at `capacity`
pub struct GameStore {
    games: HashMap<String, (u64, GameSession)>,
    clock: u64,
    capacity: usize,
}

impl GameStore {
    pub fn new(capacity: usize) -> Self {
        GameStore {
            games: HashMap::new(),
            clock: 0,
            capacity: capacity.max(1),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    /// Looks up a game and marks it as just used
    pub fn get_mut(&mut self, id: &str) -> Option<&mut GameSession> {
        let now = self.tick();
        self.games.get_mut(id).map(|(touched, game)| {
            *touched = now;
            game
        })
    }

    /// Stores a game, evicting the least recently used one when full
    pub fn insert(&mut self, id: String, game: GameSession) {
        if !self.games.contains_key(&id) && self.games.len() >= self.capacity {
            let oldest = self
                .games
                .iter()
                .min_by_key(|(_, (touched, _))| *touched)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                info!("evicting idle game {}", oldest);
                self.games.remove(&oldest);
            }
        }
        let now = self.tick();
        self.games.insert(id, (now, game));
    }
}

// One game per browser session, kept only in memory
pub struct AppState {
    pub games: Mutex<GameStore>,
    pub seed: Option<u64>,
}

impl AppState {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_capacity(seed, MAX_GAMES)
    }

    pub fn with_capacity(seed: Option<u64>, capacity: usize) -> Self {
        AppState {
            games: Mutex::new(GameStore::new(capacity)),
            seed,
        }
    }

    // A panic in one request leaves the other games intact, so poisoning is not fatal
    fn games(&self) -> MutexGuard<'_, GameStore> {
        self.games.lock().unwrap_or_else(|poisoned| {
            warn!("game store lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

fn error_json(message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({"success": false, "error": message.into()})
}

/// Returns this browser's game id, minting one on first contact
fn game_id(session: &Session) -> Result<String> {
    if let Some(id) = session.get::<String>(GAME_ID_KEY)? {
        return Ok(id);
    }
    let id = format!("{:016x}", rand::random::<u64>());
    session.insert(GAME_ID_KEY, &id)?;
    Ok(id)
}

/// Applies `command` (or just reads the view) for the caller's game
fn respond(session: &Session, state: &AppState, command: Option<Command>) -> Result<HttpResponse> {
    let id = game_id(session)?;
    let mut games = state.games();
    match games.get_mut(&id) {
        Some(game) => {
            let view = match command {
                Some(command) => game.apply(command),
                None => game.view(),
            };
            Ok(HttpResponse::Ok().json(view))
        }
        None => Ok(HttpResponse::NotFound().json(error_json(
            "No roster loaded. Upload a CSV with columns name, sex, age, region.",
        ))),
    }
}

// CSV upload endpoint: the body is the raw file
async fn upload(
    session: Session,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match parse_roster(&body[..]) {
        Ok(roster) => {
            info!("roster uploaded: {} people", roster.len());
            let id = game_id(&session)?;
            let game = GameSession::with_seed(roster, state.seed);
            let view = game.view();
            state.games().insert(id, game);
            Ok(HttpResponse::Ok().json(view))
        }
        Err(e) => {
            warn!("rejected roster upload: {}", e);
            Ok(HttpResponse::BadRequest().json(error_json(format!("Failed to load CSV: {}", e))))
        }
    }
}

async fn get_state(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    respond(&session, &state, None)
}

async fn draw(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    respond(&session, &state, Some(Command::Draw))
}

async fn assign(
    bucket: web::Path<String>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match bucket.parse::<Bucket>() {
        Ok(bucket) => respond(&session, &state, Some(Command::Assign(bucket))),
        Err(e) => Ok(HttpResponse::BadRequest().json(error_json(e))),
    }
}

async fn undo(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    respond(&session, &state, Some(Command::Undo))
}

async fn reset(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    respond(&session, &state, Some(Command::Reset))
}

async fn reveal_card(
    key: web::Path<String>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match key.parse::<CardKey>() {
        Ok(card) => respond(&session, &state, Some(Command::RevealCard(card))),
        Err(e) => Ok(HttpResponse::BadRequest().json(error_json(e))),
    }
}

async fn reveal_sample(
    key: web::Path<String>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match key.parse::<SampleKey>() {
        Ok(sample) => respond(&session, &state, Some(Command::RevealSample(sample))),
        Err(e) => Ok(HttpResponse::BadRequest().json(error_json(e))),
    }
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html))
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("boom_pam".to_string())
        .cookie_secure(false)
        .build()
}

/// Page and API routes, shared by the server and the tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .route("/", web::get().to(index))
        .route("/api/upload", web::post().to(upload))
        .route("/api/state", web::get().to(get_state))
        .route("/api/draw", web::post().to(draw))
        .route("/api/assign/{bucket}", web::post().to(assign))
        .route("/api/undo", web::post().to(undo))
        .route("/api/reset", web::post().to(reset))
        .route("/api/cards/{key}/reveal", web::post().to(reveal_card))
        .route("/api/samples/{key}/reveal", web::post().to(reveal_sample));
}

pub async fn start_server(bind: &str, port: u16, seed: Option<u64>) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(seed));
    // Sessions do not outlive the process, so a fresh key per start is enough
    let key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(session_middleware(key.clone()))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(routes)
    })
    .bind((bind, port))?
    .run()
    .await
}
