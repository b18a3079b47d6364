// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{NewMeet, NewTeam, format_date};
use crate::diesel_schema::{meets, teams};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use mat_board_domain::{Meet, MeetStatus};

/// Inserts a new team and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate name).
pub fn insert_team(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table)
        .values(NewTeam { name })
        .execute(conn)?;

    let team_id: i64 = get_last_insert_rowid(conn)?;
    debug!(team_id, name, "Inserted new team");
    Ok(team_id)
}

/// Inserts a new meet and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the meet's date cannot be formatted or the insert
/// fails.
pub fn insert_meet(conn: &mut SqliteConnection, meet: &Meet) -> Result<i64, PersistenceError> {
    let row = NewMeet {
        meet_date: format_date(meet.meet_date)?,
        status: meet.status.as_str().to_string(),
        home_team_id: meet.home_team_id,
        num_mats: i32::from(meet.rules.num_mats),
        rest_gap: i32::try_from(meet.rules.rest_gap).unwrap_or(i32::MAX),
        matches_per_wrestler: i32::try_from(meet.rules.matches_per_wrestler).unwrap_or(i32::MAX),
        max_matches_per_wrestler: i32::try_from(meet.rules.max_matches_per_wrestler)
            .unwrap_or(i32::MAX),
        allow_same_team_matches: meet.rules.allow_same_team_matches,
        first_year_only_with_first_year: meet.rules.first_year_only_with_first_year,
        enforce_age_gap_check: meet.rules.enforce_age_gap_check,
        max_age_gap_days: meet.rules.max_age_gap_days,
        enforce_weight_check: meet.rules.enforce_weight_check,
        max_weight_diff_pct: meet.rules.max_weight_diff_pct,
    };

    diesel::insert_into(meets::table).values(row).execute(conn)?;

    let meet_id: i64 = get_last_insert_rowid(conn)?;
    debug!(meet_id, "Inserted new meet");
    Ok(meet_id)
}

/// Updates a meet's lifecycle status.
///
/// # Errors
///
/// Returns `MeetNotFound` if no row was updated.
pub fn update_meet_status(
    conn: &mut SqliteConnection,
    meet_id: i64,
    status: MeetStatus,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(meets::table.filter(meets::meet_id.eq(meet_id)))
        .set(meets::status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::MeetNotFound(meet_id));
    }
    debug!(meet_id, status = status.as_str(), "Updated meet status");
    Ok(())
}
