// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rest-gap conflict detection and the mat reordering optimizer.
//!
//! A conflict is the same wrestler booked twice within `rest_gap` order
//! slots. Distances are order-value differences: exact within one mat, and
//! the same formula across mats — which treats mats as if they ran in
//! lockstep. That is a known approximation (mats do not share a clock in
//! real life), kept because the positions are the only schedule that
//! exists before meet day.
//!
//! The optimizer is best-effort local search, not exhaustive: bounded
//! passes, bounded randomized swap attempts per conflicted slot, and a swap
//! is kept only when the global conflict histogram strictly improves. Each
//! attempt builds a candidate ordering, scores it, and keeps the better of
//! the two orderings explicitly — no in-place splice-and-revert.

use crate::error::CoreError;
use crate::state::MeetState;
use mat_board_domain::{Bout, MatNumber};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::collections::HashMap;

/// Maximum optimizer passes over a mat.
pub const MAX_REORDER_PASSES: usize = 10;

/// Maximum randomized swap candidates per conflicted slot per pass.
pub const MAX_SWAP_ATTEMPTS: usize = 8;

/// Returns the severity of a wrestler's conflict at a bout: the minimum
/// order-distance to another bout on the same mat, within `rest_gap`,
/// involving the same wrestler. `None` when there is no such bout, the
/// bout is unassigned, or the wrestler is not in it.
///
/// Severity is display-only (highlighting); it never blocks a move.
#[must_use]
pub fn conflict_severity(state: &MeetState, bout_id: i64, wrestler_id: i64) -> Option<u32> {
    let bout = state.bout(bout_id)?;
    if !bout.involves(wrestler_id) {
        return None;
    }
    let mat = bout.mat?;
    let order = bout.order?;
    let rest_gap = state.meet.rules.rest_gap;

    state
        .visible_bouts()
        .into_iter()
        .filter(|b| b.bout_id != Some(bout_id))
        .filter(|b| b.mat == Some(mat))
        .filter(|b| b.involves(wrestler_id))
        .filter_map(|b| b.order)
        .map(|other| other.abs_diff(order))
        .filter(|distance| *distance <= rest_gap)
        .min()
}

/// Counts of same-wrestler bout pairs at each order-distance 0..=`rest_gap`.
///
/// Histograms compare lexicographically from the smallest distance up:
/// fewer short-distance conflicts always beats fewer long-distance ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictHistogram {
    counts: Vec<u32>,
}

impl ConflictHistogram {
    /// Computes the histogram over a meet's current bout set.
    #[must_use]
    pub fn compute(state: &MeetState) -> Self {
        Self::compute_for(state, &state.bouts)
    }

    /// Computes the histogram over a candidate bout set, using the state's
    /// roster for visibility and its rules for the distance window.
    #[must_use]
    pub fn compute_for(state: &MeetState, bouts: &[Bout]) -> Self {
        let rest_gap = state.meet.rules.rest_gap;
        let mut counts: Vec<u32> = vec![0; rest_gap as usize + 1];

        // Order positions per wrestler, across every mat.
        let mut appearances: HashMap<i64, Vec<u32>> = HashMap::new();
        for bout in bouts {
            let Some(order) = bout.order else { continue };
            if bout.mat.is_none() {
                continue;
            }
            if !state.is_present(bout.red_id) || !state.is_present(bout.green_id) {
                continue;
            }
            appearances.entry(bout.red_id).or_default().push(order);
            appearances.entry(bout.green_id).or_default().push(order);
        }

        for orders in appearances.values() {
            for (i, first) in orders.iter().enumerate() {
                for second in &orders[i + 1..] {
                    let distance = first.abs_diff(*second);
                    if distance <= rest_gap {
                        counts[distance as usize] += 1;
                    }
                }
            }
        }

        Self { counts }
    }

    /// Returns whether this histogram is strictly better than the other:
    /// lexicographically smaller, comparing from distance zero upward.
    #[must_use]
    pub fn improves_on(&self, other: &Self) -> bool {
        for (mine, theirs) in self.counts.iter().zip(&other.counts) {
            if mine < theirs {
                return true;
            }
            if mine > theirs {
                return false;
            }
        }
        false
    }

    /// Total conflicting pairs across all distances.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// The per-distance counts, index = distance.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }
}

/// Returns whether the bout at the given id conflicts with any other
/// visible assigned bout: a shared wrestler within `rest_gap` order slots,
/// same mat or across mats.
fn has_conflict(state: &MeetState, bouts: &[Bout], bout: &Bout) -> bool {
    let Some(order) = bout.order else {
        return false;
    };
    if bout.mat.is_none() {
        return false;
    }
    if !state.is_present(bout.red_id) || !state.is_present(bout.green_id) {
        return false;
    }
    let rest_gap = state.meet.rules.rest_gap;

    bouts
        .iter()
        .filter(|other| other.bout_id != bout.bout_id)
        .filter(|other| other.mat.is_some())
        .filter(|other| state.is_present(other.red_id) && state.is_present(other.green_id))
        .filter(|other| {
            other.involves(bout.red_id) || other.involves(bout.green_id)
        })
        .filter_map(|other| other.order)
        .any(|other_order| other_order.abs_diff(order) <= rest_gap)
}

/// Reorders one mat's running order to reduce conflicts.
///
/// Local search: up to [`MAX_REORDER_PASSES`] passes scan each slot; a slot
/// whose bout conflicts gets up to [`MAX_SWAP_ATTEMPTS`] randomized swap
/// candidates within the same mat, and a swap is kept only when the global
/// conflict histogram strictly improves. The result is never worse than the
/// input ordering and the search always terminates; it is not guaranteed to
/// reach a conflict-free order.
///
/// # Errors
///
/// Returns an error if the mat is outside the meet's configured count.
pub fn auto_reorder_mat(
    state: &MeetState,
    mat: MatNumber,
    seed: u64,
) -> Result<Vec<Bout>, CoreError> {
    if mat.number() > state.meet.rules.num_mats {
        return Err(mat_board_domain::DomainError::InvalidMat {
            mat: mat.number(),
            max: state.meet.rules.num_mats,
        }
        .into());
    }

    // Current slot order for the target mat.
    let mut slots: Vec<i64> = {
        let mut positions: Vec<(u32, i64)> = state
            .bouts
            .iter()
            .filter(|b| b.mat == Some(mat))
            .filter_map(|b| Some((b.order?, b.bout_id?)))
            .collect();
        positions.sort_unstable();
        positions.into_iter().map(|(_, id)| id).collect()
    };

    if slots.len() < 2 {
        return Ok(state.bouts.clone());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut bouts = with_mat_order(&state.bouts, &slots);
    let mut histogram = ConflictHistogram::compute_for(state, &bouts);

    for _pass in 0..MAX_REORDER_PASSES {
        let mut improved = false;

        for slot in 0..slots.len() {
            let conflicted = bouts
                .iter()
                .find(|b| b.bout_id == Some(slots[slot]))
                .is_some_and(|bout| has_conflict(state, &bouts, bout));
            if !conflicted {
                continue;
            }

            for _attempt in 0..MAX_SWAP_ATTEMPTS {
                let other = rng.random_range(0..slots.len());
                if other == slot {
                    continue;
                }

                let mut candidate_slots = slots.clone();
                candidate_slots.swap(slot, other);
                let candidate = with_mat_order(&bouts, &candidate_slots);
                let candidate_histogram = ConflictHistogram::compute_for(state, &candidate);

                if candidate_histogram.improves_on(&histogram) {
                    slots = candidate_slots;
                    bouts = candidate;
                    histogram = candidate_histogram;
                    improved = true;
                    break;
                }
            }
        }

        if !improved {
            break;
        }
    }

    Ok(bouts)
}

/// Returns a copy of the bout set with the slotted bouts' order values
/// rewritten to their 1-based slot positions. Only the listed bouts change;
/// every other bout, on any mat, is untouched.
fn with_mat_order(bouts: &[Bout], slots: &[i64]) -> Vec<Bout> {
    let mut result = bouts.to_vec();
    for (position, bout_id) in slots.iter().enumerate() {
        if let Some(bout) = result.iter_mut().find(|b| b.bout_id == Some(*bout_id)) {
            bout.order = Some(u32::try_from(position + 1).unwrap_or(u32::MAX));
        }
    }
    result
}
