// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bout-store mutations.
//!
//! The engine hands back full bout sets; the writers here split them into
//! inserts (bouts without ids) and position updates (bouts with ids), and
//! run anything multi-row inside a transaction so a failure never leaves a
//! mat's running order half-written.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::NewBout;
use crate::diesel_schema::bouts;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use mat_board_domain::Bout;

/// Inserts a single bout and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_bout(
    conn: &mut SqliteConnection,
    meet_id: i64,
    bout: &Bout,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bouts::table)
        .values(NewBout::from_domain(meet_id, bout))
        .execute(conn)?;

    let bout_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        meet_id,
        bout_id,
        red = bout.red_id,
        green = bout.green_id,
        "Inserted new bout"
    );
    Ok(bout_id)
}

/// Deletes a single bout.
///
/// # Errors
///
/// Returns `BoutNotFound` if no row was deleted.
pub fn delete_bout(conn: &mut SqliteConnection, bout_id: i64) -> Result<(), PersistenceError> {
    let deleted = diesel::delete(bouts::table.filter(bouts::bout_id.eq(bout_id))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::BoutNotFound(bout_id));
    }
    debug!(bout_id, "Deleted bout");
    Ok(())
}

/// Deletes every bout of a meet.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn clear_bouts(conn: &mut SqliteConnection, meet_id: i64) -> Result<usize, PersistenceError> {
    let deleted = diesel::delete(bouts::table.filter(bouts::meet_id.eq(meet_id))).execute(conn)?;
    debug!(meet_id, deleted, "Cleared meet bouts");
    Ok(deleted)
}

/// Updates the position columns (mat, order, original mat) of one stored
/// bout.
///
/// # Errors
///
/// Returns `BoutNotFound` if no row was updated.
pub fn update_bout_position(
    conn: &mut SqliteConnection,
    bout: &Bout,
) -> Result<(), PersistenceError> {
    let Some(bout_id) = bout.bout_id else {
        return Err(PersistenceError::InvalidRow(String::from(
            "cannot update position of an unsaved bout",
        )));
    };

    let updated = diesel::update(bouts::table.filter(bouts::bout_id.eq(bout_id)))
        .set((
            bouts::mat.eq(bout.mat.map(|m| i32::from(m.number()))),
            bouts::bout_order.eq(bout.order.map(|o| i32::try_from(o).unwrap_or(i32::MAX))),
            bouts::original_mat.eq(bout.original_mat.map(|m| i32::from(m.number()))),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BoutNotFound(bout_id));
    }
    Ok(())
}

/// Persists a full bout set for a meet atomically.
///
/// Bouts with ids get their position columns updated; bouts without ids
/// are inserted; stored bouts missing from the set are deleted. Either the
/// complete new set is recorded or nothing is — partial writes would break
/// the contiguous-order invariant.
///
/// # Errors
///
/// Returns an error if any statement in the transaction fails.
pub fn replace_bout_set(
    conn: &mut SqliteConnection,
    meet_id: i64,
    bout_set: &[Bout],
) -> Result<Vec<i64>, PersistenceError> {
    conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
        let stored_ids: Vec<i64> = bouts::table
            .filter(bouts::meet_id.eq(meet_id))
            .select(bouts::bout_id)
            .load::<i64>(conn)?;

        let kept_ids: Vec<i64> = bout_set.iter().filter_map(|b| b.bout_id).collect();
        for stored in stored_ids {
            if !kept_ids.contains(&stored) {
                diesel::delete(bouts::table.filter(bouts::bout_id.eq(stored))).execute(conn)?;
            }
        }

        let mut ids: Vec<i64> = Vec::with_capacity(bout_set.len());
        for bout in bout_set {
            if let Some(bout_id) = bout.bout_id {
                update_bout_position(conn, bout)?;
                ids.push(bout_id);
            } else {
                ids.push(insert_bout(conn, meet_id, bout)?);
            }
        }

        debug!(meet_id, count = ids.len(), "Replaced bout set");
        Ok(ids)
    })
}
