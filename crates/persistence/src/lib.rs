// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Mat Board system.
//!
//! This crate provides `SQLite` persistence (via Diesel with embedded
//! migrations) for teams, wrestlers, meets, per-meet attendance, the bout
//! store, operators and sessions, meet edit locks, and audit events.
//!
//! ## Testing Philosophy
//!
//! - All tests run against in-memory `SQLite` (`new_in_memory`)
//! - No external infrastructure is ever required
//! - File databases get WAL mode for read concurrency
//!
//! ## Atomicity
//!
//! Multi-row writes — bout-set replacement after generation, mat-order
//! saves — run in a single transaction. Either the complete new ordering
//! is recorded for every mat or none of it is; a partial write would break
//! the contiguous-order invariant the engine maintains.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use mat_board::MeetState;
use mat_board_audit::AuditEvent;
use mat_board_domain::{AttendanceStatus, Bout, Meet, MeetStatus, RosterEntry, Wrestler};
use time::format_description::well_known::Iso8601;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    AuditEventRow, MeetLockData, OperatorData, SessionData, TeamRow, parse_date,
};
pub use error::PersistenceError;

/// Returns the current UTC time as an ISO 8601 string.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub(crate) fn now_iso() -> Result<String, PersistenceError> {
    time::OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp: {e}")))
}

/// `SQLite`-backed persistence for the Mat Board system.
///
/// One instance owns one connection. The server wraps it in a mutex; tests
/// construct throwaway in-memory instances.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a persistence layer backed by a fresh in-memory database.
    ///
    /// Each call gets an isolated database; nothing is shared between
    /// instances, which keeps tests deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if connection or migration fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn = sqlite::initialize_database(":memory:")?;
        Ok(Self { conn })
    }

    /// Creates a persistence layer backed by a file database, enabling WAL
    /// mode for read concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, WAL configuration, or migration
    /// fails.
    pub fn new_from_file(path: &str) -> Result<Self, PersistenceError> {
        let mut conn = sqlite::initialize_database(path)?;
        sqlite::enable_wal_mode(&mut conn)?;
        Ok(Self { conn })
    }

    /// Verifies foreign key enforcement is active on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off; the server refuses to start
    /// in that case.
    pub fn verify_foreign_keys(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ---- teams & wrestlers -------------------------------------------------

    /// Creates a team and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_team(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::meets::insert_team(&mut self.conn, name)
    }

    /// Fetches a team by id.
    ///
    /// # Errors
    ///
    /// Returns `TeamNotFound` if the team does not exist.
    pub fn get_team(&mut self, team_id: i64) -> Result<TeamRow, PersistenceError> {
        queries::meets::get_team(&mut self.conn, team_id)
    }

    /// Registers a wrestler and returns their id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn register_wrestler(&mut self, wrestler: &Wrestler) -> Result<i64, PersistenceError> {
        mutations::roster::insert_wrestler(&mut self.conn, wrestler)
    }

    /// Fetches a wrestler by id.
    ///
    /// # Errors
    ///
    /// Returns `WrestlerNotFound` if the wrestler does not exist.
    pub fn get_wrestler(&mut self, wrestler_id: i64) -> Result<Wrestler, PersistenceError> {
        queries::roster::get_wrestler_row(&mut self.conn, wrestler_id)?.into_domain()
    }

    // ---- meets -------------------------------------------------------------

    /// Creates a meet and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_meet(&mut self, meet: &Meet) -> Result<i64, PersistenceError> {
        mutations::meets::insert_meet(&mut self.conn, meet)
    }

    /// Fetches a meet by id.
    ///
    /// # Errors
    ///
    /// Returns `MeetNotFound` if the meet does not exist.
    pub fn get_meet(&mut self, meet_id: i64) -> Result<Meet, PersistenceError> {
        queries::meets::get_meet_row(&mut self.conn, meet_id)?.into_domain()
    }

    /// Lists all meets, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored row fails domain conversion.
    pub fn list_meets(&mut self) -> Result<Vec<Meet>, PersistenceError> {
        queries::meets::list_meet_rows(&mut self.conn)?
            .into_iter()
            .map(data_models::MeetRow::into_domain)
            .collect()
    }

    /// Updates a meet's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `MeetNotFound` if the meet does not exist.
    pub fn set_meet_status(
        &mut self,
        meet_id: i64,
        status: MeetStatus,
    ) -> Result<(), PersistenceError> {
        mutations::meets::update_meet_status(&mut self.conn, meet_id, status)
    }

    // ---- roster & attendance -----------------------------------------------

    /// Adds a wrestler to a meet's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrestler is already on the roster.
    pub fn add_to_roster(
        &mut self,
        meet_id: i64,
        wrestler_id: i64,
        status: AttendanceStatus,
    ) -> Result<(), PersistenceError> {
        mutations::roster::insert_attendance(&mut self.conn, meet_id, wrestler_id, status)
    }

    /// Updates a wrestler's attendance status for a meet.
    ///
    /// The wrestler's bout rows are untouched: an absent wrestler's bouts
    /// are hidden by the engine, never deleted here.
    ///
    /// # Errors
    ///
    /// Returns `WrestlerNotFound` if the wrestler is not on the roster.
    pub fn set_attendance(
        &mut self,
        meet_id: i64,
        wrestler_id: i64,
        status: AttendanceStatus,
    ) -> Result<(), PersistenceError> {
        mutations::roster::update_attendance(&mut self.conn, meet_id, wrestler_id, status)
    }

    // ---- meet state (the engine's unit of work) -----------------------------

    /// Loads the complete engine state for a meet: configuration, roster
    /// with attendance, and every bout row.
    ///
    /// # Errors
    ///
    /// Returns `MeetNotFound` if the meet does not exist, or `InvalidRow`
    /// if a stored row fails domain conversion.
    pub fn load_meet_state(&mut self, meet_id: i64) -> Result<MeetState, PersistenceError> {
        let meet = queries::meets::get_meet_row(&mut self.conn, meet_id)?.into_domain()?;

        let mut roster: Vec<RosterEntry> = Vec::new();
        for (attendance, wrestler_row) in
            queries::roster::get_meet_roster(&mut self.conn, meet_id)?
        {
            let status = attendance.parsed_status()?;
            roster.push(RosterEntry::with_status(wrestler_row.into_domain()?, status));
        }

        let mut bouts: Vec<Bout> = Vec::new();
        for row in queries::bouts::get_bouts_for_meet(&mut self.conn, meet_id)? {
            bouts.push(row.into_domain()?);
        }

        let mut state = MeetState::new(meet);
        state.roster = roster;
        state.bouts = bouts;
        Ok(state)
    }

    // ---- bout store ----------------------------------------------------------

    /// Inserts a single bout and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_bout(&mut self, meet_id: i64, bout: &Bout) -> Result<i64, PersistenceError> {
        mutations::bouts::insert_bout(&mut self.conn, meet_id, bout)
    }

    /// Deletes a single bout.
    ///
    /// # Errors
    ///
    /// Returns `BoutNotFound` if the bout does not exist.
    pub fn delete_bout(&mut self, bout_id: i64) -> Result<(), PersistenceError> {
        mutations::bouts::delete_bout(&mut self.conn, bout_id)
    }

    /// Fetches a single bout.
    ///
    /// # Errors
    ///
    /// Returns `BoutNotFound` if the bout does not exist.
    pub fn get_bout(&mut self, bout_id: i64) -> Result<Bout, PersistenceError> {
        queries::bouts::get_bout_row(&mut self.conn, bout_id)?.into_domain()
    }

    /// Persists a full bout set for a meet atomically: updates positions of
    /// kept bouts, inserts new ones, deletes bouts no longer in the set.
    /// Returns the bout ids in set order.
    ///
    /// This is the single write path for generation results, moves,
    /// mat-order saves, and optimizer output — each of which hands back the
    /// complete set, making retries safe (same set, same result).
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; the transaction rolls back.
    pub fn replace_bout_set(
        &mut self,
        meet_id: i64,
        bout_set: &[Bout],
    ) -> Result<Vec<i64>, PersistenceError> {
        mutations::bouts::replace_bout_set(&mut self.conn, meet_id, bout_set)
    }

    // ---- operators & sessions -------------------------------------------------

    /// Creates an operator account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the login name is taken.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::insert_operator(
            &mut self.conn,
            login_name,
            display_name,
            password,
            role,
        )
    }

    /// Verifies an operator's password and returns the account on success.
    ///
    /// Returns `Ok(None)` for an unknown login or a wrong password — the
    /// caller cannot distinguish the two, deliberately.
    ///
    /// # Errors
    ///
    /// Returns an error only for storage failures, never for bad
    /// credentials.
    pub fn authenticate_operator(
        &mut self,
        login_name: &str,
        password: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        let Some(row) = queries::operators::get_operator_row_by_login(&mut self.conn, login_name)?
        else {
            return Ok(None);
        };

        let verified = bcrypt::verify(password, &row.password_hash)
            .map_err(|e| PersistenceError::Other(format!("Password verification failed: {e}")))?;
        if !verified {
            return Ok(None);
        }
        Ok(Some(row.into_data()))
    }

    /// Fetches an operator by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        Ok(queries::operators::get_operator_row_by_login(&mut self.conn, login_name)?
            .map(data_models::OperatorRow::into_data))
    }

    /// Fetches an operator by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        Ok(queries::operators::get_operator_row_by_id(&mut self.conn, operator_id)?
            .map(data_models::OperatorRow::into_data))
    }

    /// Records an operator's successful login time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id)
    }

    /// Creates a session row and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::insert_session(&mut self.conn, token, operator_id, expires_at)
    }

    /// Fetches a session by bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, token)
    }

    /// Updates a session's last-activity time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session (logout).
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the token has no session.
    pub fn delete_session(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, token)
    }

    // ---- meet edit locks --------------------------------------------------------

    /// Fetches the recorded edit lock for a meet, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_meet_lock(
        &mut self,
        meet_id: i64,
    ) -> Result<Option<MeetLockData>, PersistenceError> {
        queries::locks::get_meet_lock(&mut self.conn, meet_id)
    }

    /// Records (or replaces) the edit lock for a meet.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_meet_lock(
        &mut self,
        meet_id: i64,
        session_token: &str,
        expires_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::locks::upsert_meet_lock(&mut self.conn, meet_id, session_token, expires_at)
    }

    /// Releases the edit lock for a meet.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_meet_lock(&mut self, meet_id: i64) -> Result<(), PersistenceError> {
        mutations::locks::delete_meet_lock(&mut self.conn, meet_id)
    }

    // ---- audit -----------------------------------------------------------------

    /// Persists an audit event and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::insert_audit_event(&mut self.conn, event)
    }

    /// Fetches the audit timeline for a meet, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(
        &mut self,
        meet_id: i64,
    ) -> Result<Vec<AuditEventRow>, PersistenceError> {
        queries::audit::list_audit_events_for_meet(&mut self.conn, meet_id)
    }
}
