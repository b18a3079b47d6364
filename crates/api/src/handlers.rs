// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutating handler follows the same shape: authorize the actor,
//! verify the meet edit lock (before any computation), load the meet
//! state, apply a core command, persist the resulting bout set and audit
//! event, and translate the outcome into a response DTO. Reads skip the
//! lock gate entirely.

use std::collections::BTreeMap;
use tracing::info;

use mat_board::{
    Command, ConflictHistogram, MatBoard, MeetState, TransitionResult, apply, candidates,
    conflict_severity, under_target_report,
};
use mat_board_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use mat_board_domain::{
    AttendanceStatus, MatNumber, Meet, MeetStatus, PairingRules, Wrestler,
    validate_pairing_rules, validate_wrestler_fields,
};
use mat_board_persistence::{OperatorData, SqlitePersistence};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::lock::MeetLockService;
use crate::request_response::{
    AcquireLockResponse, AutoReorderRequest, AutoReorderResponse, BoutInfo, CandidateInfo,
    CreateBoutRequest, CreateBoutResponse, CreateMeetRequest, CreateMeetResponse,
    CreateTeamRequest, CreateTeamResponse, DeleteBoutResponse, GeneratePairingsRequest,
    GeneratePairingsResponse, LoginRequest, LoginResponse, MatBoardView, MatView,
    MoveBoutRequest, MoveBoutResponse, PublishMeetResponse, RegisterWrestlerRequest,
    RegisterWrestlerResponse, ReleaseLockResponse, SaveMatOrderingRequest,
    SaveMatOrderingResponse, SetAttendanceRequest, SetAttendanceResponse,
    SuggestCandidatesResponse, UnderTargetInfo,
};

/// Default number of candidate suggestions returned when the caller does
/// not say otherwise.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// The result of an API operation that includes both the response and the
/// audit event. Successful mutations always produce an audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

/// Authenticates an operator and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are rejected.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, actor, operator) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    info!(login_name = %operator.login_name, "Operator logged in");
    Ok(LoginResponse {
        session_token,
        display_name: operator.display_name,
        role: actor.role.as_str().to_string(),
        message: String::from("Login successful"),
    })
}

/// Closes a session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(
    persistence: &mut SqlitePersistence,
    session_token: &str,
) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Creates a team.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the insert fails.
pub fn create_team(
    persistence: &mut SqlitePersistence,
    request: &CreateTeamRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    cause: Cause,
) -> Result<ApiResult<CreateTeamResponse>, ApiError> {
    AuthorizationService::authorize_manage_league(actor)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Team name cannot be empty"),
        });
    }

    let team_id = persistence
        .create_team(&request.name)
        .map_err(translate_persistence_error)?;

    let audit_event = setup_audit_event(
        actor.to_audit_actor(operator),
        cause,
        "CreateTeam",
        format!("Created team '{}'", request.name),
        String::from("team_id=None"),
        format!("team_id={team_id}"),
        None,
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(ApiResult {
        response: CreateTeamResponse {
            team_id,
            name: request.name.clone(),
            message: format!("Team '{}' created", request.name),
        },
        audit_event,
    })
}

/// Registers a wrestler.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, a field is invalid, or
/// the insert fails.
pub fn register_wrestler(
    persistence: &mut SqlitePersistence,
    request: &RegisterWrestlerRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    cause: Cause,
) -> Result<ApiResult<RegisterWrestlerResponse>, ApiError> {
    AuthorizationService::authorize_manage_league(actor)?;

    let wrestler = Wrestler::new(
        request.team_id,
        request.name.clone(),
        request.weight,
        request.birthdate,
        request.experience_years,
        request.skill,
    );
    validate_wrestler_fields(&wrestler).map_err(translate_domain_error)?;

    let wrestler_id = persistence
        .register_wrestler(&wrestler)
        .map_err(translate_persistence_error)?;

    let audit_event = setup_audit_event(
        actor.to_audit_actor(operator),
        cause,
        "RegisterWrestler",
        format!("Registered wrestler '{}'", request.name),
        String::from("wrestler_id=None"),
        format!("wrestler_id={wrestler_id}"),
        None,
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(ApiResult {
        response: RegisterWrestlerResponse {
            wrestler_id,
            name: request.name.clone(),
            message: format!("Wrestler '{}' registered", request.name),
        },
        audit_event,
    })
}

/// Creates a meet with its rule configuration and initial roster.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the rules are invalid,
/// a roster wrestler does not exist, or the insert fails.
pub fn create_meet(
    persistence: &mut SqlitePersistence,
    request: &CreateMeetRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    cause: Cause,
) -> Result<ApiResult<CreateMeetResponse>, ApiError> {
    AuthorizationService::authorize_manage_league(actor)?;

    let rules = PairingRules {
        num_mats: request.num_mats,
        rest_gap: request.rest_gap,
        matches_per_wrestler: request.matches_per_wrestler,
        max_matches_per_wrestler: request.max_matches_per_wrestler,
        allow_same_team_matches: request.allow_same_team_matches,
        first_year_only_with_first_year: request.first_year_only_with_first_year,
        enforce_age_gap_check: request.enforce_age_gap_check,
        max_age_gap_days: request.max_age_gap_days,
        enforce_weight_check: request.enforce_weight_check,
        max_weight_diff_pct: request.max_weight_diff_pct,
    };
    validate_pairing_rules(&rules).map_err(translate_domain_error)?;

    persistence
        .get_team(request.home_team_id)
        .map_err(translate_persistence_error)?;

    // Resolve every roster wrestler before touching the database so a bad
    // id rejects the whole request.
    for wrestler_id in &request.roster_wrestler_ids {
        persistence
            .get_wrestler(*wrestler_id)
            .map_err(translate_persistence_error)?;
    }

    let meet = Meet::new(request.meet_date, request.home_team_id, rules);
    let meet_id = persistence
        .create_meet(&meet)
        .map_err(translate_persistence_error)?;

    for wrestler_id in &request.roster_wrestler_ids {
        persistence
            .add_to_roster(meet_id, *wrestler_id, AttendanceStatus::Coming)
            .map_err(translate_persistence_error)?;
    }

    let audit_event = setup_audit_event(
        actor.to_audit_actor(operator),
        cause,
        "CreateMeet",
        format!(
            "Created meet for {} with {} wrestlers",
            request.meet_date,
            request.roster_wrestler_ids.len()
        ),
        String::from("meet_id=None"),
        format!("meet_id={meet_id},roster={}", request.roster_wrestler_ids.len()),
        Some(meet_id),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    info!(meet_id, roster = request.roster_wrestler_ids.len(), "Meet created");
    Ok(ApiResult {
        response: CreateMeetResponse {
            meet_id,
            status: MeetStatus::Draft.as_str().to_string(),
            roster_size: request.roster_wrestler_ids.len(),
            message: String::from("Meet created"),
        },
        audit_event,
    })
}

/// Acquires (or refreshes) the edit lock for a meet.
///
/// # Errors
///
/// Returns an error if the meet does not exist or another session holds
/// an active lock.
pub fn acquire_meet_lock(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    session_token: &str,
) -> Result<AcquireLockResponse, ApiError> {
    persistence
        .get_meet(meet_id)
        .map_err(translate_persistence_error)?;

    let lock = MeetLockService::acquire(persistence, meet_id, session_token)?;
    Ok(AcquireLockResponse {
        meet_id,
        expires_at: lock.expires_at,
        message: String::from("Edit lock acquired"),
    })
}

/// Releases the edit lock for a meet.
///
/// # Errors
///
/// Returns an error if another session holds an active lock.
pub fn release_meet_lock(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    session_token: &str,
) -> Result<ReleaseLockResponse, ApiError> {
    MeetLockService::release(persistence, meet_id, session_token)?;
    Ok(ReleaseLockResponse {
        meet_id,
        message: String::from("Edit lock released"),
    })
}

/// Bulk-generates pairings for a meet and distributes them across mats.
///
/// # Errors
///
/// Returns an error if the lock or status gate rejects the request, or
/// persistence fails.
pub fn generate_pairings(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    request: &GeneratePairingsRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<GeneratePairingsResponse>, ApiError> {
    let before_count = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)?
        .bouts
        .len();

    let (state, audit_event) = run_board_command(
        persistence,
        meet_id,
        Command::GeneratePairings {
            clear_existing: request.clear_existing,
        },
        actor,
        operator,
        session_token,
        cause,
    )?;

    let under_target: Vec<UnderTargetInfo> = under_target_report(&state)
        .into_iter()
        .map(|entry| UnderTargetInfo {
            wrestler_id: entry.wrestler_id,
            name: wrestler_name(&state, entry.wrestler_id),
            bout_count: entry.bout_count,
            target: entry.target,
        })
        .collect();

    let total_bouts = state.bouts.len();
    let bouts_created = if request.clear_existing {
        total_bouts
    } else {
        total_bouts.saturating_sub(before_count)
    };
    let short = under_target.len();

    info!(meet_id, bouts_created, total_bouts, short, "Pairings generated");
    Ok(ApiResult {
        response: GeneratePairingsResponse {
            meet_id,
            bouts_created,
            total_bouts,
            under_target,
            message: if short == 0 {
                format!("Generated {bouts_created} bouts")
            } else {
                format!("Generated {bouts_created} bouts; {short} wrestlers remain under target")
            },
        },
        audit_event,
    })
}

/// Suggests ranked opponents for a wrestler. Read-only; no lock required.
///
/// # Errors
///
/// Returns an error if the meet does not exist.
pub fn suggest_candidates(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    wrestler_id: i64,
    limit: Option<usize>,
) -> Result<SuggestCandidatesResponse, ApiError> {
    let state = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)?;

    let suggestions = candidates(
        &state,
        wrestler_id,
        limit.unwrap_or(DEFAULT_CANDIDATE_LIMIT),
    );

    let infos: Vec<CandidateInfo> = suggestions
        .into_iter()
        .filter_map(|candidate| {
            state.wrestler(candidate.wrestler_id).map(|w| CandidateInfo {
                wrestler_id: candidate.wrestler_id,
                name: w.name.clone(),
                weight: w.weight,
                experience_years: w.experience_years,
                skill: w.skill,
                score: candidate.score,
            })
        })
        .collect();

    Ok(SuggestCandidatesResponse {
        meet_id,
        wrestler_id,
        candidates: infos,
    })
}

/// Creates a single bout from an accepted suggestion.
///
/// # Errors
///
/// Returns an error if the lock, status, or eligibility gates reject the
/// request.
pub fn create_bout(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    request: &CreateBoutRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<CreateBoutResponse>, ApiError> {
    let (state, audit_event) = run_board_command(
        persistence,
        meet_id,
        Command::CreateBout {
            red_id: request.red_id,
            green_id: request.green_id,
        },
        actor,
        operator,
        session_token,
        cause,
    )?;

    let bout = state
        .bouts
        .iter()
        .find(|b| b.pairs(request.red_id, request.green_id))
        .ok_or_else(|| ApiError::Internal {
            message: String::from("created bout missing from state"),
        })?;
    let bout_id = bout.bout_id.ok_or_else(|| ApiError::Internal {
        message: String::from("created bout has no id"),
    })?;

    Ok(ApiResult {
        response: CreateBoutResponse {
            bout: bout_info(&state, bout_id),
            message: String::from("Bout created"),
        },
        audit_event,
    })
}

/// Deletes a single bout.
///
/// # Errors
///
/// Returns an error if the lock or status gate rejects the request or the
/// bout does not exist.
pub fn delete_bout(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    bout_id: i64,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<DeleteBoutResponse>, ApiError> {
    let (_, audit_event) = run_board_command(
        persistence,
        meet_id,
        Command::DeleteBout { bout_id },
        actor,
        operator,
        session_token,
        cause,
    )?;

    Ok(ApiResult {
        response: DeleteBoutResponse {
            bout_id,
            message: String::from("Bout deleted"),
        },
        audit_event,
    })
}

/// Moves a bout to a position on a mat (manual drag).
///
/// # Errors
///
/// Returns an error if the lock or status gate rejects the request, the
/// bout does not exist, or the mat is out of range.
pub fn move_bout(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    bout_id: i64,
    request: &MoveBoutRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<MoveBoutResponse>, ApiError> {
    let mat = parse_mat(request.mat)?;
    let (state, audit_event) = run_board_command(
        persistence,
        meet_id,
        Command::MoveBout {
            bout_id,
            mat,
            index: request.index,
        },
        actor,
        operator,
        session_token,
        cause,
    )?;

    Ok(ApiResult {
        response: MoveBoutResponse {
            board: board_view(&state),
            message: String::from("Bout moved"),
        },
        audit_event,
    })
}

/// Replaces the full mat ordering (the canonical save format).
///
/// # Errors
///
/// Returns an error if the lock or status gate rejects the request or the
/// ordering references unknown or duplicated bouts or mats.
pub fn save_mat_ordering(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    request: &SaveMatOrderingRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<SaveMatOrderingResponse>, ApiError> {
    let ordering = parse_ordering(&request.ordering)?;
    let (state, audit_event) = run_board_command(
        persistence,
        meet_id,
        Command::SaveMatOrdering { ordering },
        actor,
        operator,
        session_token,
        cause,
    )?;

    Ok(ApiResult {
        response: SaveMatOrderingResponse {
            board: board_view(&state),
            message: String::from("Mat ordering saved"),
        },
        audit_event,
    })
}

/// Runs the conflict optimizer over one mat's running order.
///
/// # Errors
///
/// Returns an error if the lock or status gate rejects the request or the
/// mat is out of range.
pub fn auto_reorder_mat(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    mat: u8,
    request: &AutoReorderRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<AutoReorderResponse>, ApiError> {
    let mat = parse_mat(mat)?;
    let seed: u64 = request.seed.unwrap_or_else(rand::random);

    let before = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)
        .map(|state| ConflictHistogram::compute(&state).total())?;

    let (state, audit_event) = run_board_command(
        persistence,
        meet_id,
        Command::AutoReorderMat { mat, seed },
        actor,
        operator,
        session_token,
        cause,
    )?;

    let after = ConflictHistogram::compute(&state).total();
    info!(meet_id, mat = mat.number(), before, after, "Mat reordered");

    Ok(ApiResult {
        response: AutoReorderResponse {
            board: board_view(&state),
            conflicts_before: before,
            conflicts_after: after,
            message: if after < before {
                format!("Reduced conflicts from {before} to {after}")
            } else {
                String::from("No improving reorder found")
            },
        },
        audit_event,
    })
}

/// Records a wrestler's attendance status. Allowed without the edit lock:
/// attendance is a fact about the wrestler, not a board edit, and never
/// deletes bouts.
///
/// # Errors
///
/// Returns an error if the wrestler is not on the meet roster.
pub fn set_attendance(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    wrestler_id: i64,
    request: &SetAttendanceRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    cause: Cause,
) -> Result<ApiResult<SetAttendanceResponse>, ApiError> {
    AuthorizationService::authorize_edit_board(actor)?;

    let status = AttendanceStatus::parse(&request.status).map_err(translate_domain_error)?;

    let state = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)?;
    let result = apply(
        &state,
        Command::SetAttendance {
            wrestler_id,
            status,
        },
        actor.to_audit_actor(operator),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .set_attendance(meet_id, wrestler_id, status)
        .map_err(translate_persistence_error)?;
    persistence
        .persist_audit_event(&result.audit_event)
        .map_err(translate_persistence_error)?;

    info!(meet_id, wrestler_id, status = status.as_str(), "Attendance updated");
    Ok(ApiResult {
        response: SetAttendanceResponse {
            meet_id,
            wrestler_id,
            status: status.as_str().to_string(),
            message: String::from("Attendance updated"),
        },
        audit_event: result.audit_event,
    })
}

/// Returns the full mat board with conflict highlighting. Read-only; no
/// lock required.
///
/// # Errors
///
/// Returns an error if the meet does not exist.
pub fn get_mat_board(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
) -> Result<MatBoardView, ApiError> {
    let state = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)?;
    Ok(board_view(&state))
}

/// Publishes a meet, freezing its bouts and mat assignments.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the lock gate rejects
/// the request, or the meet is already published.
pub fn publish_meet(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<ApiResult<PublishMeetResponse>, ApiError> {
    AuthorizationService::authorize_publish_meet(actor)?;
    MeetLockService::verify_holder(persistence, meet_id, session_token)?;

    let state = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)?;
    let result = apply(
        &state,
        Command::PublishMeet,
        actor.to_audit_actor(operator),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .set_meet_status(meet_id, MeetStatus::Published)
        .map_err(translate_persistence_error)?;
    persistence
        .persist_audit_event(&result.audit_event)
        .map_err(translate_persistence_error)?;

    info!(meet_id, "Meet published");
    Ok(ApiResult {
        response: PublishMeetResponse {
            meet_id,
            status: MeetStatus::Published.as_str().to_string(),
            message: String::from("Meet published; the board is frozen"),
        },
        audit_event: result.audit_event,
    })
}

// ---- shared plumbing ---------------------------------------------------------

/// Runs a bout/mat mutating command through the full gate-apply-persist
/// pipeline. Returns the new state (with freshly assigned bout ids) and
/// the persisted audit event.
#[allow(clippy::too_many_arguments)]
fn run_board_command(
    persistence: &mut SqlitePersistence,
    meet_id: i64,
    command: Command,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
    session_token: &str,
    cause: Cause,
) -> Result<(MeetState, AuditEvent), ApiError> {
    AuthorizationService::authorize_edit_board(actor)?;
    // The lock gate runs before any computation on the meet.
    MeetLockService::verify_holder(persistence, meet_id, session_token)?;

    let state = persistence
        .load_meet_state(meet_id)
        .map_err(translate_persistence_error)?;
    let TransitionResult {
        mut new_state,
        audit_event,
    } = apply(&state, command, actor.to_audit_actor(operator), cause)
        .map_err(translate_core_error)?;

    let ids = persistence
        .replace_bout_set(meet_id, &new_state.bouts)
        .map_err(translate_persistence_error)?;
    for (bout, id) in new_state.bouts.iter_mut().zip(ids) {
        bout.bout_id = Some(id);
    }

    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok((new_state, audit_event))
}

fn parse_mat(mat: u8) -> Result<MatNumber, ApiError> {
    MatNumber::new(mat).map_err(translate_domain_error)
}

/// Parses the canonical save format: mat number string keys ("1".."N") to
/// ordered bout-id lists.
fn parse_ordering(
    ordering: &BTreeMap<String, Vec<i64>>,
) -> Result<Vec<(MatNumber, Vec<i64>)>, ApiError> {
    let mut parsed: Vec<(MatNumber, Vec<i64>)> = Vec::with_capacity(ordering.len());
    for (key, bout_ids) in ordering {
        let number: u8 = key.parse().map_err(|_| ApiError::InvalidInput {
            field: String::from("ordering"),
            message: format!("'{key}' is not a mat number"),
        })?;
        parsed.push((parse_mat(number)?, bout_ids.clone()));
    }
    Ok(parsed)
}

fn wrestler_name(state: &MeetState, wrestler_id: i64) -> String {
    state
        .wrestler(wrestler_id)
        .map_or_else(|| format!("wrestler {wrestler_id}"), |w| w.name.clone())
}

fn bout_info(state: &MeetState, bout_id: i64) -> BoutInfo {
    let Some(bout) = state.bout(bout_id) else {
        // Callers pass ids taken from the state itself.
        return BoutInfo {
            bout_id,
            red_id: 0,
            red_name: String::new(),
            green_id: 0,
            green_name: String::new(),
            pairing_score: 0.0,
            mat: None,
            order: None,
            original_mat: None,
            moved: false,
            red_conflict: None,
            green_conflict: None,
        };
    };

    BoutInfo {
        bout_id,
        red_id: bout.red_id,
        red_name: wrestler_name(state, bout.red_id),
        green_id: bout.green_id,
        green_name: wrestler_name(state, bout.green_id),
        pairing_score: bout.pairing_score,
        mat: bout.mat.map(|m| m.number()),
        order: bout.order,
        original_mat: bout.original_mat.map(|m| m.number()),
        moved: bout.original_mat.is_some(),
        red_conflict: conflict_severity(state, bout_id, bout.red_id),
        green_conflict: conflict_severity(state, bout_id, bout.green_id),
    }
}

/// Builds the display board: per-mat running orders, the unassigned
/// bucket, and the conflict histogram.
fn board_view(state: &MeetState) -> MatBoardView {
    let board = MatBoard::from_state(state);
    let histogram = ConflictHistogram::compute(state);

    let mats: Vec<MatView> = board
        .mats
        .iter()
        .enumerate()
        .map(|(idx, bout_ids)| MatView {
            mat: u8::try_from(idx + 1).unwrap_or(u8::MAX),
            bouts: bout_ids.iter().map(|id| bout_info(state, *id)).collect(),
        })
        .collect();

    MatBoardView {
        meet_id: state.meet.meet_id.unwrap_or(0),
        status: state.meet.status.as_str().to_string(),
        mats,
        unassigned: board
            .unassigned
            .iter()
            .map(|id| bout_info(state, *id))
            .collect(),
        conflict_histogram: histogram.counts().to_vec(),
    }
}

/// Builds an audit event for league-setup operations that do not flow
/// through the core command pipeline.
fn setup_audit_event(
    actor: Actor,
    cause: Cause,
    name: &str,
    details: String,
    before: String,
    after: String,
    meet_id: Option<i64>,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        Action::new(String::from(name), Some(details)),
        StateSnapshot::new(before),
        StateSnapshot::new(after),
        meet_id,
    )
}
