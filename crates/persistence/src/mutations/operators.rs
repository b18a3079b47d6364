// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{NewOperator, NewSession};
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;
use crate::now_iso;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new operator with a bcrypt-hashed password and returns the
/// assigned id.
///
/// # Errors
///
/// Returns an error if hashing or the insert fails (e.g., duplicate login).
pub fn insert_operator(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Password hashing failed: {e}")))?;

    diesel::insert_into(operators::table)
        .values(NewOperator {
            login_name,
            display_name,
            password_hash,
            role,
            is_disabled: false,
            created_at: now_iso()?,
        })
        .execute(conn)?;

    let operator_id: i64 = get_last_insert_rowid(conn)?;
    debug!(operator_id, login_name, role, "Inserted new operator");
    Ok(operator_id)
}

/// Updates an operator's last-login timestamp.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(operators::table.filter(operators::operator_id.eq(operator_id)))
        .set(operators::last_login_at.eq(Some(now_iso()?)))
        .execute(conn)?;
    Ok(())
}

/// Creates a session row for an operator.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_session(
    conn: &mut SqliteConnection,
    token: &str,
    operator_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    let now = now_iso()?;
    diesel::insert_into(sessions::table)
        .values(NewSession {
            operator_id,
            token,
            created_at: now.clone(),
            expires_at,
            last_activity_at: now,
        })
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(session_id, operator_id, "Created session");
    Ok(session_id)
}

/// Updates a session's last-activity timestamp.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(now_iso()?))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token (logout).
///
/// # Errors
///
/// Returns `SessionNotFound` if no row was deleted.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    let deleted =
        diesel::delete(sessions::table.filter(sessions::token.eq(token))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::SessionNotFound(String::from(
            "no session for token",
        )));
    }
    Ok(())
}
