// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{MeetRow, TeamRow};
use crate::diesel_schema::{meets, teams};
use crate::error::PersistenceError;

/// Fetches a meet row by id.
///
/// # Errors
///
/// Returns `MeetNotFound` if the meet does not exist.
pub fn get_meet_row(conn: &mut SqliteConnection, meet_id: i64) -> Result<MeetRow, PersistenceError> {
    meets::table
        .filter(meets::meet_id.eq(meet_id))
        .first::<MeetRow>(conn)
        .optional()?
        .ok_or(PersistenceError::MeetNotFound(meet_id))
}

/// Lists all meet rows, newest date first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_meet_rows(conn: &mut SqliteConnection) -> Result<Vec<MeetRow>, PersistenceError> {
    Ok(meets::table
        .order(meets::meet_date.desc())
        .load::<MeetRow>(conn)?)
}

/// Fetches a team by id.
///
/// # Errors
///
/// Returns `TeamNotFound` if the team does not exist.
pub fn get_team(conn: &mut SqliteConnection, team_id: i64) -> Result<TeamRow, PersistenceError> {
    teams::table
        .filter(teams::team_id.eq(team_id))
        .first::<TeamRow>(conn)
        .optional()?
        .ok_or(PersistenceError::TeamNotFound(team_id))
}
