// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::BoutRow;
use crate::diesel_schema::bouts;
use crate::error::PersistenceError;

/// Fetches all bout rows for a meet, ordered by bout id.
///
/// Every bout row is returned, including bouts whose participants are
/// currently marked not coming — hiding is a display concern, not a
/// storage one.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_bouts_for_meet(
    conn: &mut SqliteConnection,
    meet_id: i64,
) -> Result<Vec<BoutRow>, PersistenceError> {
    Ok(bouts::table
        .filter(bouts::meet_id.eq(meet_id))
        .order(bouts::bout_id.asc())
        .load::<BoutRow>(conn)?)
}

/// Fetches a single bout row by id.
///
/// # Errors
///
/// Returns `BoutNotFound` if the bout does not exist.
pub fn get_bout_row(conn: &mut SqliteConnection, bout_id: i64) -> Result<BoutRow, PersistenceError> {
    bouts::table
        .filter(bouts::bout_id.eq(bout_id))
        .first::<BoutRow>(conn)
        .optional()?
        .ok_or(PersistenceError::BoutNotFound(bout_id))
}
