// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{AttendanceRow, WrestlerRow};
use crate::diesel_schema::{meet_attendance, wrestlers};
use crate::error::PersistenceError;

/// Fetches a wrestler row by id.
///
/// # Errors
///
/// Returns `WrestlerNotFound` if the wrestler does not exist.
pub fn get_wrestler_row(
    conn: &mut SqliteConnection,
    wrestler_id: i64,
) -> Result<WrestlerRow, PersistenceError> {
    wrestlers::table
        .filter(wrestlers::wrestler_id.eq(wrestler_id))
        .first::<WrestlerRow>(conn)
        .optional()?
        .ok_or(PersistenceError::WrestlerNotFound(wrestler_id))
}

/// Fetches the attendance rows for a meet, joined with their wrestler rows,
/// ordered by wrestler id for deterministic roster ordering.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_meet_roster(
    conn: &mut SqliteConnection,
    meet_id: i64,
) -> Result<Vec<(AttendanceRow, WrestlerRow)>, PersistenceError> {
    Ok(meet_attendance::table
        .inner_join(wrestlers::table)
        .filter(meet_attendance::meet_id.eq(meet_id))
        .order(wrestlers::wrestler_id.asc())
        .load::<(AttendanceRow, WrestlerRow)>(conn)?)
}

/// Fetches a single attendance row for a wrestler at a meet.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_attendance(
    conn: &mut SqliteConnection,
    meet_id: i64,
    wrestler_id: i64,
) -> Result<Option<AttendanceRow>, PersistenceError> {
    Ok(meet_attendance::table
        .filter(meet_attendance::meet_id.eq(meet_id))
        .filter(meet_attendance::wrestler_id.eq(wrestler_id))
        .first::<AttendanceRow>(conn)
        .optional()?)
}
