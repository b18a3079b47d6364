// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::NewMeetLock;
use crate::diesel_schema::meet_locks;
use crate::error::PersistenceError;
use crate::now_iso;

/// Records an edit lock for a meet, replacing any previous lock row.
///
/// The UNIQUE constraint on `meet_id` keeps at most one lock per meet;
/// replacement is how an expired lock is claimed or a holder refreshes.
/// Whether replacement is *allowed* is the lock service's decision, made
/// before calling this.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_meet_lock(
    conn: &mut SqliteConnection,
    meet_id: i64,
    session_token: &str,
    expires_at: &str,
) -> Result<(), PersistenceError> {
    diesel::replace_into(meet_locks::table)
        .values(NewMeetLock {
            meet_id,
            session_token,
            acquired_at: now_iso()?,
            expires_at: expires_at.to_string(),
        })
        .execute(conn)?;

    debug!(meet_id, "Recorded meet edit lock");
    Ok(())
}

/// Releases the edit lock for a meet. Releasing a meet with no lock is a
/// no-op.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_meet_lock(conn: &mut SqliteConnection, meet_id: i64) -> Result<(), PersistenceError> {
    diesel::delete(meet_locks::table.filter(meet_locks::meet_id.eq(meet_id))).execute(conn)?;
    debug!(meet_id, "Released meet edit lock");
    Ok(())
}
