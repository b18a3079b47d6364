// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{OperatorRow, SessionData};
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;

/// Fetches the full operator row (including password hash) by login name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) fn get_operator_row_by_login(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<Option<OperatorRow>, PersistenceError> {
    Ok(operators::table
        .filter(operators::login_name.eq(login_name))
        .first::<OperatorRow>(conn)
        .optional()?)
}

/// Fetches the full operator row by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) fn get_operator_row_by_id(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<Option<OperatorRow>, PersistenceError> {
    Ok(operators::table
        .filter(operators::operator_id.eq(operator_id))
        .first::<OperatorRow>(conn)
        .optional()?)
}

/// Fetches a session by its bearer token.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    Ok(sessions::table
        .filter(sessions::token.eq(token))
        .first::<SessionData>(conn)
        .optional()?)
}
