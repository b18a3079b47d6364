// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk bout generation for a meet.
//!
//! Greedy with fallback, not exact optimization: the generator repeatedly
//! gives the wrestler furthest below the match target their best remaining
//! legal opponent, preferring opponents who are themselves under target and
//! falling back to anyone under the hard cap. Running out of candidates is
//! a reportable condition, never an error — the outcome lists every present
//! wrestler still short of the target so the caller can relax the rules
//! and re-run.

use crate::state::MeetState;
use mat_board_domain::{Bout, PairingRules, Wrestler, is_eligible, pairing_score};
use std::collections::HashSet;

/// Options controlling a bulk generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairingOptions {
    /// Discard the current bout set before generating. When false, existing
    /// bouts and their mat/order assignments are retained and only new
    /// bouts are added (used after an attendance change mid-setup).
    pub clear_existing: bool,
}

/// A present wrestler who ended the run below the match target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnderTarget {
    /// The wrestler.
    pub wrestler_id: i64,
    /// The number of bouts they have.
    pub bout_count: u32,
    /// The target they fell short of.
    pub target: u32,
}

/// The result of a bulk generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingOutcome {
    /// The full bout set after the run (retained plus newly generated).
    pub bouts: Vec<Bout>,
    /// Present wrestlers still below the match target. Informational.
    pub under_target: Vec<UnderTarget>,
}

/// Generates a bout slate for the meet.
///
/// New bouts carry the candidate's pairing score and no mat assignment;
/// mat distribution is a separate step (see [`crate::board::distribute_bouts`]).
/// Deterministic: scan order is by deficit (largest first) with wrestler-id
/// tie-breaking, and opponent choice is by score with the same tie-break.
#[must_use]
pub fn generate_pairings(state: &MeetState, options: &PairingOptions) -> PairingOutcome {
    let rules = &state.meet.rules;
    let on = state.meet.meet_date;
    let target: usize = rules.matches_per_wrestler as usize;
    let max: usize = rules.max_matches_per_wrestler as usize;

    let mut bouts: Vec<Bout> = if options.clear_existing {
        Vec::new()
    } else {
        state.bouts.clone()
    };

    let present: Vec<(i64, &Wrestler)> = state
        .present_wrestlers()
        .into_iter()
        .filter_map(|w| w.wrestler_id.map(|id| (id, w)))
        .collect();

    let count = |bouts: &[Bout], id: i64| bouts.iter().filter(|b| b.involves(id)).count();
    let paired = |bouts: &[Bout], a: i64, b: i64| bouts.iter().any(|bout| bout.pairs(a, b));

    // Once a wrestler has no legal opponent under the cap, they never regain
    // one: bout counts only grow and eligibility is static for the run.
    let mut exhausted: HashSet<i64> = HashSet::new();

    loop {
        let mut seekers: Vec<(i64, usize)> = present
            .iter()
            .map(|(id, _)| (*id, count(&bouts, *id)))
            .filter(|(id, c)| *c < target && !exhausted.contains(id))
            .collect();
        if seekers.is_empty() {
            break;
        }
        seekers.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        let (seeker_id, _) = seekers[0];

        let Some(seeker) = state.wrestler(seeker_id) else {
            exhausted.insert(seeker_id);
            continue;
        };

        match best_opponent(
            &present, &bouts, seeker, seeker_id, rules, target, max, &count, &paired, on,
        ) {
            Some((opponent_id, score)) => {
                bouts.push(Bout::new(seeker_id, opponent_id, score));
            }
            None => {
                exhausted.insert(seeker_id);
            }
        }
    }

    let under_target = report(&present, &bouts, target, &count);
    PairingOutcome {
        bouts,
        under_target,
    }
}

/// Finds the best legal opponent for a seeker.
///
/// Preference order: opponents under the match target beat opponents merely
/// under the cap; within a tier, lower pairing score wins, then lower id.
#[allow(clippy::too_many_arguments)]
fn best_opponent(
    present: &[(i64, &Wrestler)],
    bouts: &[Bout],
    seeker: &Wrestler,
    seeker_id: i64,
    rules: &PairingRules,
    target: usize,
    max: usize,
    count: &impl Fn(&[Bout], i64) -> usize,
    paired: &impl Fn(&[Bout], i64, i64) -> bool,
    on: time::Date,
) -> Option<(i64, f64)> {
    let mut best: Option<(bool, f64, i64)> = None; // (under_target, score, id)

    for (opponent_id, opponent) in present {
        let opponent_id = *opponent_id;
        if opponent_id == seeker_id {
            continue;
        }
        let c = count(bouts, opponent_id);
        if c >= max {
            continue;
        }
        if paired(bouts, seeker_id, opponent_id) {
            continue;
        }
        if !is_eligible(seeker, opponent, rules, on) {
            continue;
        }
        let under = c < target;
        let score = pairing_score(seeker, opponent, on);

        let candidate = (under, score, opponent_id);
        best = Some(match best {
            None => candidate,
            Some(current) => pick_better(current, candidate),
        });
    }

    best.map(|(_, score, id)| (id, score))
}

/// Returns the preferred of two opponent candidates.
fn pick_better(
    current: (bool, f64, i64),
    candidate: (bool, f64, i64),
) -> (bool, f64, i64) {
    // Under-target tier wins; then lower score; then lower id.
    if candidate.0 != current.0 {
        if candidate.0 { candidate } else { current }
    } else if candidate.1 < current.1 {
        candidate
    } else if candidate.1 > current.1 {
        current
    } else if candidate.2 < current.2 {
        candidate
    } else {
        current
    }
}

fn report(
    present: &[(i64, &Wrestler)],
    bouts: &[Bout],
    target: usize,
    count: &impl Fn(&[Bout], i64) -> usize,
) -> Vec<UnderTarget> {
    present
        .iter()
        .filter_map(|(id, _)| {
            let c = count(bouts, *id);
            (c < target).then(|| UnderTarget {
                wrestler_id: *id,
                bout_count: u32::try_from(c).unwrap_or(u32::MAX),
                target: u32::try_from(target).unwrap_or(u32::MAX),
            })
        })
        .collect()
}

/// Reports every present wrestler currently below the meet's match target.
///
/// Used by callers to surface the insufficient-candidates condition after
/// a generation run.
#[must_use]
pub fn under_target_report(state: &MeetState) -> Vec<UnderTarget> {
    let target: usize = state.meet.rules.matches_per_wrestler as usize;
    let present: Vec<(i64, &Wrestler)> = state
        .present_wrestlers()
        .into_iter()
        .filter_map(|w| w.wrestler_id.map(|id| (id, w)))
        .collect();
    let count = |bouts: &[Bout], id: i64| bouts.iter().filter(|b| b.involves(id)).count();
    report(&present, &state.bouts, target, &count)
}
