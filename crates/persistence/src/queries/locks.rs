// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::MeetLockData;
use crate::diesel_schema::meet_locks;
use crate::error::PersistenceError;

/// Fetches the edit lock for a meet, if one is recorded.
///
/// Expiry is not evaluated here; the lock service owns that policy.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_meet_lock(
    conn: &mut SqliteConnection,
    meet_id: i64,
) -> Result<Option<MeetLockData>, PersistenceError> {
    Ok(meet_locks::table
        .filter(meet_locks::meet_id.eq(meet_id))
        .first::<MeetLockData>(conn)
        .optional()?)
}
