// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Fetches the audit timeline for a meet, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_audit_events_for_meet(
    conn: &mut SqliteConnection,
    meet_id: i64,
) -> Result<Vec<AuditEventRow>, PersistenceError> {
    Ok(audit_events::table
        .filter(audit_events::meet_id.eq(meet_id))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?)
}
