// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mat_board_audit::{AuditEvent, StateSnapshot};
use mat_board_domain::{Bout, Meet, RosterEntry, Wrestler};

/// The complete pairing state of a single meet.
///
/// This is the unit the engine operates on: the meet configuration, the
/// attending rosters, and the current bout set. It is loaded from the bout
/// store, transformed immutably by [`crate::apply`], and written back.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetState {
    /// The meet this state is scoped to.
    pub meet: Meet,
    /// All wrestlers selected for this meet, with attendance status.
    pub roster: Vec<RosterEntry>,
    /// All bouts of this meet, including bouts whose participants are
    /// currently marked not coming (those are hidden, never deleted).
    pub bouts: Vec<Bout>,
}

impl MeetState {
    /// Creates a new state for a meet with an empty roster and no bouts.
    #[must_use]
    pub const fn new(meet: Meet) -> Self {
        Self {
            meet,
            roster: Vec::new(),
            bouts: Vec::new(),
        }
    }

    /// Returns the roster entry for a wrestler, if they are on the meet roster.
    #[must_use]
    pub fn entry(&self, wrestler_id: i64) -> Option<&RosterEntry> {
        self.roster
            .iter()
            .find(|e| e.wrestler.wrestler_id == Some(wrestler_id))
    }

    /// Returns the wrestler with the given id, if on the meet roster.
    #[must_use]
    pub fn wrestler(&self, wrestler_id: i64) -> Option<&Wrestler> {
        self.entry(wrestler_id).map(|e| &e.wrestler)
    }

    /// Returns whether the wrestler is on the roster and counts as present.
    #[must_use]
    pub fn is_present(&self, wrestler_id: i64) -> bool {
        self.entry(wrestler_id).is_some_and(RosterEntry::is_present)
    }

    /// Returns all present wrestlers.
    #[must_use]
    pub fn present_wrestlers(&self) -> Vec<&Wrestler> {
        self.roster
            .iter()
            .filter(|e| e.is_present())
            .map(|e| &e.wrestler)
            .collect()
    }

    /// Returns the bout with the given id, if it exists in this meet.
    #[must_use]
    pub fn bout(&self, bout_id: i64) -> Option<&Bout> {
        self.bouts.iter().find(|b| b.bout_id == Some(bout_id))
    }

    /// Returns the number of bouts the wrestler takes part in.
    ///
    /// Counts every bout, including hidden ones, so the per-wrestler match
    /// cap holds even while an opponent is marked not coming.
    #[must_use]
    pub fn bout_count(&self, wrestler_id: i64) -> usize {
        self.bouts.iter().filter(|b| b.involves(wrestler_id)).count()
    }

    /// Returns whether a bout already connects the given unordered pair.
    #[must_use]
    pub fn are_paired(&self, a: i64, b: i64) -> bool {
        self.bouts.iter().any(|bout| bout.pairs(a, b))
    }

    /// Returns the bouts visible on the mat board: those whose participants
    /// are both present. Hidden bouts keep their mat and order but are
    /// excluded from display and conflict computation.
    #[must_use]
    pub fn visible_bouts(&self) -> Vec<&Bout> {
        self.bouts
            .iter()
            .filter(|b| self.is_present(b.red_id) && self.is_present(b.green_id))
            .collect()
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "meet={},status={},roster={},bouts={}",
            self.meet.meet_id.unwrap_or(0),
            self.meet.status,
            self.roster.len(),
            self.bouts.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: MeetState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
