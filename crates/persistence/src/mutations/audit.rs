// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::NewAuditEvent;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crate::now_iso;
use crate::sqlite::get_last_insert_rowid;
use mat_board_audit::AuditEvent;

/// Persists an audit event and returns its assigned id.
///
/// The structured parts are stored as JSON columns so the timeline can be
/// queried without a schema change per action type.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json = serde_json::json!({
        "id": event.actor.id,
        "actor_type": event.actor.actor_type,
        "operator_id": event.actor.operator_id,
    });
    let cause_json = serde_json::json!({
        "id": event.cause.id,
        "description": event.cause.description,
    });
    let action_json = serde_json::json!({
        "name": event.action.name,
        "details": event.action.details,
    });
    let before_json = serde_json::json!({ "data": event.before.data });
    let after_json = serde_json::json!({ "data": event.after.data });

    diesel::insert_into(audit_events::table)
        .values(NewAuditEvent {
            meet_id: event.meet_id,
            actor_json: actor_json.to_string(),
            cause_json: cause_json.to_string(),
            action_json: action_json.to_string(),
            before_snapshot_json: before_json.to_string(),
            after_snapshot_json: after_json.to_string(),
            created_at: now_iso()?,
        })
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
