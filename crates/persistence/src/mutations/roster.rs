// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{NewAttendance, NewWrestler, format_date};
use crate::diesel_schema::meet_attendance;
use crate::diesel_schema::wrestlers;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use mat_board_domain::{AttendanceStatus, Wrestler};

/// Inserts a new wrestler and returns their assigned id.
///
/// # Errors
///
/// Returns an error if the birthdate cannot be formatted or the insert
/// fails.
pub fn insert_wrestler(
    conn: &mut SqliteConnection,
    wrestler: &Wrestler,
) -> Result<i64, PersistenceError> {
    let row = NewWrestler {
        team_id: wrestler.team_id,
        name: &wrestler.name,
        weight: wrestler.weight,
        birthdate: format_date(wrestler.birthdate)?,
        experience_years: i32::from(wrestler.experience_years),
        skill: i32::from(wrestler.skill),
    };

    diesel::insert_into(wrestlers::table)
        .values(row)
        .execute(conn)?;

    let wrestler_id: i64 = get_last_insert_rowid(conn)?;
    debug!(wrestler_id, name = %wrestler.name, "Inserted new wrestler");
    Ok(wrestler_id)
}

/// Adds a wrestler to a meet roster with the given attendance status.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., already on the roster).
pub fn insert_attendance(
    conn: &mut SqliteConnection,
    meet_id: i64,
    wrestler_id: i64,
    status: AttendanceStatus,
) -> Result<(), PersistenceError> {
    diesel::insert_into(meet_attendance::table)
        .values(NewAttendance {
            meet_id,
            wrestler_id,
            status: status.as_str(),
        })
        .execute(conn)?;

    debug!(meet_id, wrestler_id, status = status.as_str(), "Added to meet roster");
    Ok(())
}

/// Updates a wrestler's attendance status for a meet.
///
/// # Errors
///
/// Returns `WrestlerNotFound` if the wrestler has no roster row for the
/// meet.
pub fn update_attendance(
    conn: &mut SqliteConnection,
    meet_id: i64,
    wrestler_id: i64,
    status: AttendanceStatus,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        meet_attendance::table
            .filter(meet_attendance::meet_id.eq(meet_id))
            .filter(meet_attendance::wrestler_id.eq(wrestler_id)),
    )
    .set(meet_attendance::status.eq(status.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::WrestlerNotFound(wrestler_id));
    }
    debug!(meet_id, wrestler_id, status = status.as_str(), "Updated attendance");
    Ok(())
}
