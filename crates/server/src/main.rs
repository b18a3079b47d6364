// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{error, info};

use mat_board_api::{
    ApiError, AutoReorderRequest, CreateBoutRequest, CreateMeetRequest, CreateTeamRequest,
    GeneratePairingsRequest, LoginRequest, MoveBoutRequest, RegisterWrestlerRequest,
    SaveMatOrderingRequest, SetAttendanceRequest, WhoAmIResponse,
};
use mat_board_audit::Cause;
use mat_board_persistence::SqlitePersistence;

mod live;
mod session;

use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use session::SessionOperator;

/// Mat Board Server - HTTP server for the Mat Board system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Create this admin account at startup if it does not exist yet
    /// (requires `--admin-password`)
    #[arg(long)]
    admin_login: Option<String>,

    /// Password for the bootstrap admin account
    #[arg(long)]
    admin_password: Option<String>,
}

/// Monotonic request counter used for audit cause ids.
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialized behind a mutex.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Broadcast channel for live board events.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        state.broadcaster.clone()
    }
}

fn next_cause(description: &str) -> Cause {
    let id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    Cause::new(format!("req_{id}"), String::from(description))
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Wrapper mapping `ApiError` onto HTTP responses.
struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::LockViolation { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
        }
        let body = ErrorBody {
            error: error_kind(&self.0),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn error_kind(err: &ApiError) -> String {
    let kind = match err {
        ApiError::AuthenticationFailed { .. } => "authentication_failed",
        ApiError::Unauthorized { .. } => "unauthorized",
        ApiError::LockViolation { .. } => "lock_violation",
        ApiError::DomainRuleViolation { .. } => "domain_rule_violation",
        ApiError::InvalidInput { .. } => "invalid_input",
        ApiError::ResourceNotFound { .. } => "not_found",
        ApiError::Internal { .. } => "internal",
    };
    String::from(kind)
}

/// Generic success body for endpoints with nothing else to say.
#[derive(Debug, Serialize, Deserialize)]
struct OkBody {
    success: bool,
    message: String,
}

/// Query parameters for candidate suggestions.
#[derive(Debug, Deserialize)]
struct CandidatesQuery {
    /// Maximum number of suggestions.
    limit: Option<usize>,
}

async fn health() -> impl IntoResponse {
    Json(OkBody {
        success: true,
        message: String::from("ok"),
    })
}

async fn login_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = mat_board_api::login(&mut persistence, &request)?;
    Ok(Json(response))
}

async fn logout_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(_, _, token): SessionOperator,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    mat_board_api::logout(&mut persistence, &token)?;
    Ok(Json(OkBody {
        success: true,
        message: String::from("Logged out"),
    }))
}

async fn whoami_handler(
    SessionOperator(actor, operator, _): SessionOperator,
) -> impl IntoResponse {
    Json(WhoAmIResponse {
        login_name: operator.login_name,
        display_name: operator.display_name,
        role: actor.role.as_str().to_string(),
    })
}

async fn create_team_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, _): SessionOperator,
    Json(request): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::create_team(
        &mut persistence,
        &request,
        &actor,
        &operator,
        next_cause("create team"),
    )?;
    Ok(Json(result.response))
}

async fn register_wrestler_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, _): SessionOperator,
    Json(request): Json<RegisterWrestlerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::register_wrestler(
        &mut persistence,
        &request,
        &actor,
        &operator,
        next_cause("register wrestler"),
    )?;
    Ok(Json(result.response))
}

async fn create_meet_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, _): SessionOperator,
    Json(request): Json<CreateMeetRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::create_meet(
        &mut persistence,
        &request,
        &actor,
        &operator,
        next_cause("create meet"),
    )?;
    Ok(Json(result.response))
}

async fn get_board_handler(
    AxumState(state): AxumState<AppState>,
    Path(meet_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let board = mat_board_api::get_mat_board(&mut persistence, meet_id)?;
    Ok(Json(board))
}

async fn candidates_handler(
    AxumState(state): AxumState<AppState>,
    Path((meet_id, wrestler_id)): Path<(i64, i64)>,
    Query(query): Query<CandidatesQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response =
        mat_board_api::suggest_candidates(&mut persistence, meet_id, wrestler_id, query.limit)?;
    Ok(Json(response))
}

async fn acquire_lock_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(_, _, token): SessionOperator,
    Path(meet_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = mat_board_api::acquire_meet_lock(&mut persistence, meet_id, &token)?;
    Ok(Json(response))
}

async fn release_lock_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(_, _, token): SessionOperator,
    Path(meet_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = mat_board_api::release_meet_lock(&mut persistence, meet_id, &token)?;
    Ok(Json(response))
}

async fn generate_pairings_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path(meet_id): Path<i64>,
    Json(request): Json<GeneratePairingsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::generate_pairings(
        &mut persistence,
        meet_id,
        &request,
        &actor,
        &operator,
        &token,
        next_cause("generate pairings"),
    )?;
    state.broadcaster.broadcast(&LiveEvent::PairingsGenerated {
        meet_id,
        bouts_created: result.response.bouts_created,
        under_target: result.response.under_target.len(),
    });
    Ok(Json(result.response))
}

async fn create_bout_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path(meet_id): Path<i64>,
    Json(request): Json<CreateBoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::create_bout(
        &mut persistence,
        meet_id,
        &request,
        &actor,
        &operator,
        &token,
        next_cause("create bout"),
    )?;
    state.broadcaster.broadcast(&LiveEvent::BoutCreated {
        meet_id,
        bout_id: result.response.bout.bout_id,
    });
    Ok(Json(result.response))
}

async fn delete_bout_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path((meet_id, bout_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::delete_bout(
        &mut persistence,
        meet_id,
        bout_id,
        &actor,
        &operator,
        &token,
        next_cause("delete bout"),
    )?;
    state
        .broadcaster
        .broadcast(&LiveEvent::BoutDeleted { meet_id, bout_id });
    Ok(Json(result.response))
}

async fn move_bout_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path((meet_id, bout_id)): Path<(i64, i64)>,
    Json(request): Json<MoveBoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::move_bout(
        &mut persistence,
        meet_id,
        bout_id,
        &request,
        &actor,
        &operator,
        &token,
        next_cause("move bout"),
    )?;
    state.broadcaster.broadcast(&LiveEvent::BoutMoved {
        meet_id,
        bout_id,
        mat: request.mat,
    });
    Ok(Json(result.response))
}

async fn save_ordering_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path(meet_id): Path<i64>,
    Json(request): Json<SaveMatOrderingRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::save_mat_ordering(
        &mut persistence,
        meet_id,
        &request,
        &actor,
        &operator,
        &token,
        next_cause("save mat ordering"),
    )?;
    state
        .broadcaster
        .broadcast(&LiveEvent::MatOrderingSaved { meet_id });
    Ok(Json(result.response))
}

async fn reorder_mat_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path((meet_id, mat)): Path<(i64, u8)>,
    Json(request): Json<AutoReorderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::auto_reorder_mat(
        &mut persistence,
        meet_id,
        mat,
        &request,
        &actor,
        &operator,
        &token,
        next_cause("auto reorder mat"),
    )?;
    state
        .broadcaster
        .broadcast(&LiveEvent::MatReordered { meet_id, mat });
    Ok(Json(result.response))
}

async fn set_attendance_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, _): SessionOperator,
    Path((meet_id, wrestler_id)): Path<(i64, i64)>,
    Json(request): Json<SetAttendanceRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::set_attendance(
        &mut persistence,
        meet_id,
        wrestler_id,
        &request,
        &actor,
        &operator,
        next_cause("set attendance"),
    )?;
    state.broadcaster.broadcast(&LiveEvent::AttendanceChanged {
        meet_id,
        wrestler_id,
        status: result.response.status.clone(),
    });
    Ok(Json(result.response))
}

async fn publish_meet_handler(
    AxumState(state): AxumState<AppState>,
    SessionOperator(actor, operator, token): SessionOperator,
    Path(meet_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let result = mat_board_api::publish_meet(
        &mut persistence,
        meet_id,
        &actor,
        &operator,
        &token,
        next_cause("publish meet"),
    )?;
    state
        .broadcaster
        .broadcast(&LiveEvent::MeetPublished { meet_id });
    Ok(Json(result.response))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/whoami", get(whoami_handler))
        .route("/api/teams", post(create_team_handler))
        .route("/api/wrestlers", post(register_wrestler_handler))
        .route("/api/meets", post(create_meet_handler))
        .route("/api/meets/{meet_id}/board", get(get_board_handler))
        .route(
            "/api/meets/{meet_id}/candidates/{wrestler_id}",
            get(candidates_handler),
        )
        .route(
            "/api/meets/{meet_id}/lock",
            post(acquire_lock_handler).delete(release_lock_handler),
        )
        .route(
            "/api/meets/{meet_id}/pairings",
            post(generate_pairings_handler),
        )
        .route("/api/meets/{meet_id}/bouts", post(create_bout_handler))
        .route(
            "/api/meets/{meet_id}/bouts/{bout_id}",
            delete(delete_bout_handler),
        )
        .route(
            "/api/meets/{meet_id}/bouts/{bout_id}/move",
            post(move_bout_handler),
        )
        .route("/api/meets/{meet_id}/ordering", put(save_ordering_handler))
        .route(
            "/api/meets/{meet_id}/mats/{mat}/reorder",
            post(reorder_mat_handler),
        )
        .route(
            "/api/meets/{meet_id}/attendance/{wrestler_id}",
            put(set_attendance_handler),
        )
        .route("/api/meets/{meet_id}/publish", post(publish_meet_handler))
        .route("/api/live", get(live_events_handler))
        .with_state(state)
}

/// Creates the bootstrap admin account if configured and missing.
fn bootstrap_admin(
    persistence: &mut SqlitePersistence,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(login), Some(password)) = (&args.admin_login, &args.admin_password) else {
        return Ok(());
    };

    if persistence.get_operator_by_login(login)?.is_some() {
        info!(login_name = %login, "Bootstrap admin already exists");
        return Ok(());
    }

    persistence.create_operator(login, login, password, "Admin")?;
    info!(login_name = %login, "Bootstrap admin created");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut persistence = match &args.database {
        Some(path) => {
            info!(%path, "Using file database");
            SqlitePersistence::new_from_file(path)?
        }
        None => {
            info!("Using in-memory database");
            SqlitePersistence::new_in_memory()?
        }
    };
    persistence.verify_foreign_keys()?;
    bootstrap_admin(&mut persistence, &args)?;

    let state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
    };

    let app = router(state);
    let addr = format!("0.0.0.0:{}", args.port);
    info!(%addr, "Mat Board server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
