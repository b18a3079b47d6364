// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::board::{apply_mat_ordering, distribute_bouts, move_bout, remove_bout};
use crate::command::Command;
use crate::conflict::auto_reorder_mat;
use crate::error::CoreError;
use crate::pairing::{PairingOptions, generate_pairings};
use crate::state::{MeetState, TransitionResult};
use mat_board_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use mat_board_domain::{
    Bout, DomainError, MeetStatus, check_eligibility, pairing_score,
};

/// Applies a command to the current meet state, producing a new state and
/// audit event.
///
/// Transitions are atomic: an error leaves the caller's state untouched,
/// a success returns a fully consistent new state. Every bout or mat
/// mutation is rejected when the meet is not `Draft`; attendance changes
/// are allowed in either status (a day-of no-show is still a fact to
/// record, and it never touches bouts).
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates a domain rule
/// - A bout or mat mutation targets a non-`Draft` meet
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &MeetState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = state.to_snapshot();

    let (new_state, action) = match command {
        Command::GeneratePairings { clear_existing } => {
            ensure_draft(state)?;
            let outcome = generate_pairings(state, &PairingOptions { clear_existing });
            let generated: usize = outcome.bouts.len()
                - if clear_existing { 0 } else { state.bouts.len() };
            let short: usize = outcome.under_target.len();

            let mut new_state = state.clone();
            new_state.bouts = outcome.bouts;
            new_state.bouts = distribute_bouts(&new_state);

            let action = Action::new(
                String::from("GeneratePairings"),
                Some(format!(
                    "Generated {generated} bouts (clear_existing={clear_existing}), {short} wrestlers under target"
                )),
            );
            (new_state, action)
        }
        Command::CreateBout { red_id, green_id } => {
            ensure_draft(state)?;
            let bout = build_bout(state, red_id, green_id)?;

            let mut new_state = state.clone();
            new_state.bouts.push(bout);

            let action = Action::new(
                String::from("CreateBout"),
                Some(format!("Paired wrestler {red_id} against {green_id}")),
            );
            (new_state, action)
        }
        Command::DeleteBout { bout_id } => {
            ensure_draft(state)?;
            let mut new_state = state.clone();
            new_state.bouts = remove_bout(state, bout_id)?;

            let action = Action::new(
                String::from("DeleteBout"),
                Some(format!("Deleted bout {bout_id}")),
            );
            (new_state, action)
        }
        Command::MoveBout {
            bout_id,
            mat,
            index,
        } => {
            ensure_draft(state)?;
            let mut new_state = state.clone();
            new_state.bouts = move_bout(state, bout_id, mat, index)?;

            let action = Action::new(
                String::from("MoveBout"),
                Some(format!("Moved bout {bout_id} to mat {mat} index {index}")),
            );
            (new_state, action)
        }
        Command::SaveMatOrdering { ordering } => {
            ensure_draft(state)?;
            let mut new_state = state.clone();
            new_state.bouts = apply_mat_ordering(state, &ordering)?;

            let mats: usize = ordering.len();
            let action = Action::new(
                String::from("SaveMatOrdering"),
                Some(format!("Replaced running order for {mats} mats")),
            );
            (new_state, action)
        }
        Command::AutoReorderMat { mat, seed } => {
            ensure_draft(state)?;
            let mut new_state = state.clone();
            new_state.bouts = auto_reorder_mat(state, mat, seed)?;

            let action = Action::new(
                String::from("AutoReorderMat"),
                Some(format!("Reordered mat {mat} to reduce conflicts")),
            );
            (new_state, action)
        }
        Command::SetAttendance {
            wrestler_id,
            status,
        } => {
            let mut new_state = state.clone();
            let entry = new_state
                .roster
                .iter_mut()
                .find(|e| e.wrestler.wrestler_id == Some(wrestler_id))
                .ok_or(DomainError::WrestlerNotFound { wrestler_id })?;
            entry.status = status;

            let action = Action::new(
                String::from("SetAttendance"),
                Some(format!(
                    "Set wrestler {wrestler_id} attendance to {}",
                    status.as_str()
                )),
            );
            (new_state, action)
        }
        Command::PublishMeet => {
            if !state.meet.status.can_transition_to(MeetStatus::Published) {
                return Err(DomainError::InvalidStatusTransition {
                    from: state.meet.status.to_string(),
                    to: MeetStatus::Published.to_string(),
                }
                .into());
            }
            let mut new_state = state.clone();
            new_state.meet.status = MeetStatus::Published;

            let action = Action::new(
                String::from("PublishMeet"),
                Some(String::from("Published the meet; board is frozen")),
            );
            (new_state, action)
        }
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        state.meet.meet_id,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

/// Rejects bout/mat mutations against a non-`Draft` meet.
fn ensure_draft(state: &MeetState) -> Result<(), CoreError> {
    if state.meet.status.is_locked() {
        return Err(DomainError::MeetReadOnly {
            status: state.meet.status.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates and constructs a single manually requested bout.
fn build_bout(state: &MeetState, red_id: i64, green_id: i64) -> Result<Bout, CoreError> {
    if red_id == green_id {
        return Err(DomainError::SelfPairing {
            wrestler_id: red_id,
        }
        .into());
    }

    let red = resolve_present(state, red_id)?;
    let green = resolve_present(state, green_id)?;

    let limit = state.meet.rules.max_matches_per_wrestler;
    for id in [red_id, green_id] {
        if state.bout_count(id) >= limit as usize {
            return Err(DomainError::MatchLimitReached {
                wrestler_id: id,
                limit,
            }
            .into());
        }
    }

    if state.are_paired(red_id, green_id) {
        return Err(DomainError::DuplicatePairing { red_id, green_id }.into());
    }

    check_eligibility(red, green, &state.meet.rules, state.meet.meet_date).map_err(
        |violation| DomainError::IneligiblePairing {
            red_id,
            green_id,
            rule: violation.to_string(),
        },
    )?;

    let score = pairing_score(red, green, state.meet.meet_date);
    Ok(Bout::new(red_id, green_id, score))
}

fn resolve_present(
    state: &MeetState,
    wrestler_id: i64,
) -> Result<&mat_board_domain::Wrestler, CoreError> {
    let entry = state
        .entry(wrestler_id)
        .ok_or(DomainError::WrestlerNotFound { wrestler_id })?;
    if !entry.is_present() {
        return Err(DomainError::WrestlerNotAttending { wrestler_id }.into());
    }
    Ok(&entry.wrestler)
}
