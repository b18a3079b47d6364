// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mat assignment and running-order operations.
//!
//! Each mat holds an ordered list of bouts; order values are 1-based and
//! contiguous within a mat, an invariant every operation here restores
//! before returning. Hidden bouts (a participant marked not coming) keep
//! their slot — they are filtered at display time, not evicted.
//!
//! All operations are expressed as snapshot-in, new-bout-set-out: the
//! caller persists the returned set atomically or not at all.

use crate::error::CoreError;
use crate::state::MeetState;
use mat_board_domain::{Bout, DomainError, MatNumber};
use std::collections::HashSet;

/// A read-only view of the mat board: per-mat ordered bout ids plus the
/// unassigned bucket. Built from visible bouts only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatBoard {
    /// Number of mats in the meet configuration.
    pub num_mats: u8,
    /// Ordered bout ids per mat; index 0 is mat 1.
    pub mats: Vec<Vec<i64>>,
    /// Visible bouts with no mat assignment, or assigned to a mat beyond
    /// the current configuration (after a mat-count change).
    pub unassigned: Vec<i64>,
}

impl MatBoard {
    /// Builds the display board from a meet state.
    #[must_use]
    pub fn from_state(state: &MeetState) -> Self {
        let num_mats = state.meet.rules.num_mats;
        let mut mats: Vec<Vec<(u32, i64)>> = vec![Vec::new(); num_mats as usize];
        let mut unassigned: Vec<i64> = Vec::new();

        for bout in state.visible_bouts() {
            let Some(bout_id) = bout.bout_id else {
                continue;
            };
            match (bout.mat, bout.order) {
                (Some(mat), Some(order)) if mat.number() <= num_mats => {
                    mats[usize::from(mat.number()) - 1].push((order, bout_id));
                }
                _ => unassigned.push(bout_id),
            }
        }

        let mats: Vec<Vec<i64>> = mats
            .into_iter()
            .map(|mut list| {
                list.sort_unstable();
                list.into_iter().map(|(_, id)| id).collect()
            })
            .collect();
        unassigned.sort_unstable();

        Self {
            num_mats,
            mats,
            unassigned,
        }
    }

    /// Returns the ordered bout ids for a mat.
    #[must_use]
    pub fn mat(&self, mat: MatNumber) -> &[i64] {
        self.mats
            .get(usize::from(mat.number()) - 1)
            .map_or(&[], Vec::as_slice)
    }
}

/// Moves a bout to a 0-based index on a mat, reindexing both the source and
/// destination lists to stay contiguous.
///
/// The insertion index is clamped to the destination list length. The first
/// time a bout leaves its initial mat its `original_mat` is recorded; the
/// marker is cleared when the bout returns to that mat.
///
/// # Errors
///
/// Returns an error if the bout does not exist or the destination mat is
/// outside the meet's configured mat count.
pub fn move_bout(
    state: &MeetState,
    bout_id: i64,
    mat: MatNumber,
    index: u32,
) -> Result<Vec<Bout>, CoreError> {
    if mat.number() > state.meet.rules.num_mats {
        return Err(DomainError::InvalidMat {
            mat: mat.number(),
            max: state.meet.rules.num_mats,
        }
        .into());
    }
    let moving = state
        .bout(bout_id)
        .ok_or(DomainError::BoutNotFound { bout_id })?;
    let source_mat = moving.mat;

    let mut bouts = state.bouts.clone();

    // Remaining source list, contiguous again.
    if let Some(src) = source_mat {
        let mut remaining = mat_positions(&bouts, src);
        remaining.retain(|&(_, idx)| bouts[idx].bout_id != Some(bout_id));
        reindex(&mut bouts, &remaining);
    }

    // Destination list with the bout inserted at the clamped index.
    let mut destination = mat_positions(&bouts, mat);
    destination.retain(|&(_, idx)| bouts[idx].bout_id != Some(bout_id));
    let moving_idx = index_of(&bouts, bout_id)?;
    let insert_at = (index as usize).min(destination.len());
    destination.insert(insert_at, (0, moving_idx));
    reindex(&mut bouts, &destination);

    let bout = &mut bouts[moving_idx];
    bout.mat = Some(mat);
    if source_mat != Some(mat) && bout.original_mat.is_none() {
        bout.original_mat = source_mat;
    }
    if bout.original_mat == Some(mat) {
        bout.original_mat = None;
    }

    Ok(bouts)
}

/// Removes a bout, closing the gap in its former mat's running order.
///
/// # Errors
///
/// Returns an error if the bout does not exist.
pub fn remove_bout(state: &MeetState, bout_id: i64) -> Result<Vec<Bout>, CoreError> {
    let removed = state
        .bout(bout_id)
        .ok_or(DomainError::BoutNotFound { bout_id })?;
    let source_mat = removed.mat;

    let mut bouts = state.bouts.clone();
    bouts.retain(|b| b.bout_id != Some(bout_id));

    if let Some(src) = source_mat {
        let remaining = mat_positions(&bouts, src);
        reindex(&mut bouts, &remaining);
    }

    Ok(bouts)
}

/// Applies a full mat → ordered-bout-id mapping, the canonical save format.
///
/// Every listed bout receives its mat and 1-based position; every bout not
/// listed anywhere becomes unassigned. This replaces each mat's order
/// wholesale — retries of the same save are therefore harmless.
///
/// # Errors
///
/// Returns an error if a mat is outside the configured count or listed
/// twice, or a bout id is unknown or listed twice.
pub fn apply_mat_ordering(
    state: &MeetState,
    ordering: &[(MatNumber, Vec<i64>)],
) -> Result<Vec<Bout>, CoreError> {
    let num_mats = state.meet.rules.num_mats;
    let mut seen_mats: HashSet<u8> = HashSet::new();
    let mut seen_bouts: HashSet<i64> = HashSet::new();

    for (mat, bout_ids) in ordering {
        if mat.number() > num_mats {
            return Err(DomainError::InvalidMat {
                mat: mat.number(),
                max: num_mats,
            }
            .into());
        }
        if !seen_mats.insert(mat.number()) {
            return Err(DomainError::DuplicateMatInOrdering { mat: mat.number() }.into());
        }
        for &bout_id in bout_ids {
            if state.bout(bout_id).is_none() {
                return Err(DomainError::BoutNotFound { bout_id }.into());
            }
            if !seen_bouts.insert(bout_id) {
                return Err(DomainError::DuplicateBoutInOrdering { bout_id }.into());
            }
        }
    }

    let mut bouts = state.bouts.clone();

    // Unlisted bouts lose their assignment (full replacement, not a patch).
    for bout in &mut bouts {
        if bout.bout_id.is_none_or(|id| !seen_bouts.contains(&id)) {
            bout.mat = None;
            bout.order = None;
        }
    }

    for (mat, bout_ids) in ordering {
        for (slot, &bout_id) in bout_ids.iter().enumerate() {
            let idx = index_of(&bouts, bout_id)?;
            let bout = &mut bouts[idx];
            let previous_mat = bout.mat;
            bout.mat = Some(*mat);
            bout.order = Some(u32::try_from(slot + 1).unwrap_or(u32::MAX));
            if previous_mat != Some(*mat) && bout.original_mat.is_none() {
                bout.original_mat = previous_mat;
            }
            if bout.original_mat == Some(*mat) {
                bout.original_mat = None;
            }
        }
    }

    Ok(bouts)
}

/// Assigns every unassigned bout to a mat.
///
/// Greedy spread: each bout goes to the mat where neither participant
/// appears within the last `rest_gap` slots, preferring the shortest such
/// mat, then the lowest mat number. Run after bulk generation; the
/// optimizer refines from there.
#[must_use]
pub fn distribute_bouts(state: &MeetState) -> Vec<Bout> {
    let num_mats = usize::from(state.meet.rules.num_mats);
    let rest_gap = state.meet.rules.rest_gap as usize;
    let mut bouts = state.bouts.clone();

    // Participants per mat in running order, seeded from existing assignments.
    let mut lineups: Vec<Vec<(i64, i64)>> = vec![Vec::new(); num_mats];
    for mat_number in 1..=state.meet.rules.num_mats {
        if let Ok(mat) = MatNumber::new(mat_number) {
            for (_, idx) in mat_positions(&bouts, mat) {
                let b = &bouts[idx];
                lineups[usize::from(mat_number) - 1].push((b.red_id, b.green_id));
            }
        }
    }

    let unassigned: Vec<usize> = bouts
        .iter()
        .enumerate()
        .filter(|(_, b)| b.mat.is_none())
        .map(|(idx, _)| idx)
        .collect();

    for idx in unassigned {
        let (red, green) = (bouts[idx].red_id, bouts[idx].green_id);

        let mut choice: usize = 0;
        let mut choice_key: (usize, usize) = (usize::MAX, usize::MAX);
        for (mat_idx, lineup) in lineups.iter().enumerate() {
            let recent = lineup
                .iter()
                .rev()
                .take(rest_gap)
                .any(|&(r, g)| r == red || g == red || r == green || g == green);
            let key = (usize::from(recent), lineup.len());
            if key < choice_key {
                choice_key = key;
                choice = mat_idx;
            }
        }

        lineups[choice].push((red, green));
        let bout = &mut bouts[idx];
        bout.mat = MatNumber::new(u8::try_from(choice + 1).unwrap_or(1)).ok();
        bout.order = Some(u32::try_from(lineups[choice].len()).unwrap_or(u32::MAX));
    }

    bouts
}

/// Returns `(order, index)` pairs for the bouts assigned to a mat, sorted
/// by order.
fn mat_positions(bouts: &[Bout], mat: MatNumber) -> Vec<(u32, usize)> {
    let mut positions: Vec<(u32, usize)> = bouts
        .iter()
        .enumerate()
        .filter(|(_, b)| b.mat == Some(mat))
        .map(|(idx, b)| (b.order.unwrap_or(u32::MAX), idx))
        .collect();
    positions.sort_unstable();
    positions
}

/// Rewrites the order values of a mat list to the contiguous sequence 1..k.
fn reindex(bouts: &mut [Bout], positions: &[(u32, usize)]) {
    for (slot, &(_, idx)) in positions.iter().enumerate() {
        bouts[idx].order = Some(u32::try_from(slot + 1).unwrap_or(u32::MAX));
    }
}

fn index_of(bouts: &[Bout], bout_id: i64) -> Result<usize, CoreError> {
    bouts
        .iter()
        .position(|b| b.bout_id == Some(bout_id))
        .ok_or_else(|| CoreError::DomainViolation(DomainError::BoutNotFound { bout_id }))
}
