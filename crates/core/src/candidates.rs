// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ranked opponent suggestions for a single wrestler.
//!
//! Used interactively (a coach picks one bout at a time) and by the bulk
//! pairing generator. The "no candidates" cases are sentinels, never
//! errors: an unknown target, an absent target, or a target already at the
//! match cap all yield an empty list.

use crate::state::MeetState;
use mat_board_domain::{is_eligible, pairing_score};

/// A suggested opponent with its pairing score. Lower scores are better.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The suggested opponent.
    pub wrestler_id: i64,
    /// The pairing score for target vs. this opponent.
    pub score: f64,
}

/// Produces the ranked legal opponents for a wrestler.
///
/// Filters the present roster through the eligibility rules, the
/// not-already-paired rule, and the per-wrestler match cap, then sorts
/// ascending by score (best match first) and truncates to `limit`.
/// Ties are broken by wrestler id so the ranking is deterministic.
///
/// # Arguments
///
/// * `state` - The meet state
/// * `target_id` - The wrestler looking for opponents
/// * `limit` - Maximum number of candidates to return
#[must_use]
pub fn candidates(state: &MeetState, target_id: i64, limit: usize) -> Vec<Candidate> {
    let rules = &state.meet.rules;
    let on = state.meet.meet_date;
    let max: usize = rules.max_matches_per_wrestler as usize;

    let Some(target_entry) = state.entry(target_id) else {
        return Vec::new();
    };
    if !target_entry.is_present() {
        return Vec::new();
    }
    if state.bout_count(target_id) >= max {
        return Vec::new();
    }
    let target = &target_entry.wrestler;

    let mut result: Vec<Candidate> = state
        .roster
        .iter()
        .filter(|e| e.is_present())
        .filter_map(|e| e.wrestler.wrestler_id.map(|id| (id, &e.wrestler)))
        .filter(|(id, _)| *id != target_id)
        .filter(|(id, _)| state.bout_count(*id) < max)
        .filter(|(id, _)| !state.are_paired(target_id, *id))
        .filter(|(_, opponent)| is_eligible(target, opponent, rules, on))
        .map(|(id, opponent)| Candidate {
            wrestler_id: id,
            score: pairing_score(target, opponent, on),
        })
        .collect();

    result.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| a.wrestler_id.cmp(&b.wrestler_id))
    });
    result.truncate(limit);
    result
}
