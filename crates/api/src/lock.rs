// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The meet edit lock: at most one active editor per meet.
//!
//! Every bout or mat-assignment mutation must hold the lock for its meet;
//! the check runs before any computation. Reads (candidate suggestions,
//! the board view, conflict display) never require the lock.
//!
//! Locks expire after [`MeetLockService::LOCK_DURATION`] so an abandoned
//! editing session cannot strand a meet. The holder refreshes by
//! re-acquiring; anyone may claim an expired lock.

use thiserror::Error;
use time::{Duration, OffsetDateTime};
use time::format_description::well_known::Iso8601;

use mat_board_persistence::{MeetLockData, PersistenceError, SqlitePersistence};

/// Errors from meet edit-lock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// Another session holds an active lock on the meet.
    #[error("meet {meet_id} is being edited by another session")]
    HeldByAnotherEditor {
        /// The contested meet.
        meet_id: i64,
    },
    /// The requesting session holds no active lock on the meet.
    #[error("no active edit lock held for meet {meet_id}; acquire the lock before editing")]
    NotHeld {
        /// The meet that was to be edited.
        meet_id: i64,
    },
    /// The lock store failed.
    #[error("lock storage error: {0}")]
    Storage(String),
}

impl From<PersistenceError> for LockError {
    fn from(err: PersistenceError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Service managing per-meet edit locks.
pub struct MeetLockService;

impl MeetLockService {
    /// How long an acquired lock stays valid without a refresh.
    pub const LOCK_DURATION: Duration = Duration::minutes(15);

    /// Acquires (or refreshes) the edit lock for a meet.
    ///
    /// Succeeds when the meet is unlocked, the existing lock is expired,
    /// or the requesting session already holds it (refresh).
    ///
    /// # Errors
    ///
    /// Returns `HeldByAnotherEditor` if another session holds an active
    /// lock.
    pub fn acquire(
        persistence: &mut SqlitePersistence,
        meet_id: i64,
        session_token: &str,
    ) -> Result<MeetLockData, LockError> {
        if let Some(existing) = persistence.get_meet_lock(meet_id)? {
            if existing.session_token != session_token && !Self::is_expired(&existing)? {
                return Err(LockError::HeldByAnotherEditor { meet_id });
            }
        }

        let expires_at: String = (OffsetDateTime::now_utc() + Self::LOCK_DURATION)
            .format(&Iso8601::DEFAULT)
            .map_err(|e| LockError::Storage(format!("timestamp: {e}")))?;

        persistence.upsert_meet_lock(meet_id, session_token, &expires_at)?;
        persistence
            .get_meet_lock(meet_id)?
            .ok_or_else(|| LockError::Storage(String::from("lock vanished after acquire")))
    }

    /// Releases the edit lock for a meet.
    ///
    /// Releasing an unlocked meet is a no-op; releasing someone else's
    /// active lock is rejected.
    ///
    /// # Errors
    ///
    /// Returns `HeldByAnotherEditor` if another session holds an active
    /// lock.
    pub fn release(
        persistence: &mut SqlitePersistence,
        meet_id: i64,
        session_token: &str,
    ) -> Result<(), LockError> {
        let Some(existing) = persistence.get_meet_lock(meet_id)? else {
            return Ok(());
        };
        if existing.session_token != session_token && !Self::is_expired(&existing)? {
            return Err(LockError::HeldByAnotherEditor { meet_id });
        }
        persistence.delete_meet_lock(meet_id)?;
        Ok(())
    }

    /// Verifies the requesting session holds an active lock on the meet.
    ///
    /// This is the gate every mutating handler runs before touching the
    /// meet's bouts or mat assignments.
    ///
    /// # Errors
    ///
    /// Returns `NotHeld` if there is no active lock (or it expired), or
    /// `HeldByAnotherEditor` if another session holds it.
    pub fn verify_holder(
        persistence: &mut SqlitePersistence,
        meet_id: i64,
        session_token: &str,
    ) -> Result<(), LockError> {
        let Some(existing) = persistence.get_meet_lock(meet_id)? else {
            return Err(LockError::NotHeld { meet_id });
        };
        if Self::is_expired(&existing)? {
            return Err(LockError::NotHeld { meet_id });
        }
        if existing.session_token != session_token {
            return Err(LockError::HeldByAnotherEditor { meet_id });
        }
        Ok(())
    }

    fn is_expired(lock: &MeetLockData) -> Result<bool, LockError> {
        let expires_at = OffsetDateTime::parse(&lock.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| LockError::Storage(format!("bad lock expiry: {e}")))?;
        Ok(OffsetDateTime::now_utc() > expires_at)
    }
}
