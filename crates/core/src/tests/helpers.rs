// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::state::MeetState;
use mat_board_audit::{Actor, Cause};
use mat_board_domain::{
    AttendanceStatus, Bout, MatNumber, Meet, MeetStatus, PairingRules, RosterEntry, Wrestler,
};
use time::Date;
use time::macros::date;

pub const MEET_DATE: Date = date!(2026 - 02 - 07);

pub fn default_rules() -> PairingRules {
    PairingRules {
        num_mats: 2,
        rest_gap: 2,
        matches_per_wrestler: 2,
        max_matches_per_wrestler: 3,
        allow_same_team_matches: true,
        first_year_only_with_first_year: false,
        enforce_age_gap_check: false,
        max_age_gap_days: 730,
        enforce_weight_check: true,
        max_weight_diff_pct: 15.0,
    }
}

pub fn wrestler(id: i64, team_id: i64, weight: f64, experience_years: u8) -> Wrestler {
    Wrestler::with_id(
        id,
        team_id,
        format!("Wrestler {id}"),
        weight,
        date!(2017 - 06 - 01),
        experience_years,
        2,
    )
}

pub fn state_with(rules: PairingRules, wrestlers: Vec<Wrestler>) -> MeetState {
    let meet = Meet::with_id(1, MEET_DATE, MeetStatus::Draft, 1, rules);
    let mut state = MeetState::new(meet);
    state.roster = wrestlers.into_iter().map(RosterEntry::new).collect();
    state
}

pub fn mark(state: &mut MeetState, wrestler_id: i64, status: AttendanceStatus) {
    let entry = state
        .roster
        .iter_mut()
        .find(|e| e.wrestler.wrestler_id == Some(wrestler_id))
        .expect("wrestler on roster");
    entry.status = status;
}

/// An assigned bout fixture: id, pair, mat, and 1-based order.
pub fn assigned_bout(bout_id: i64, red: i64, green: i64, mat: u8, order: u32) -> Bout {
    Bout::with_id(
        bout_id,
        red,
        green,
        1.0,
        Some(mat_number(mat)),
        Some(order),
        None,
    )
}

pub fn mat_number(mat: u8) -> MatNumber {
    MatNumber::new(mat).expect("valid mat number")
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("coach-7"), String::from("coach"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("test"))
}

/// Asserts that every mat's order values form a contiguous 1..k sequence.
pub fn assert_contiguous_orders(state: &MeetState) {
    for mat_number in 1..=state.meet.rules.num_mats {
        let mat = MatNumber::new(mat_number).expect("valid mat number");
        let mut orders: Vec<u32> = state
            .bouts
            .iter()
            .filter(|b| b.mat == Some(mat))
            .map(|b| b.order.expect("assigned bout has an order"))
            .collect();
        orders.sort_unstable();
        let expected: Vec<u32> = (1..=u32::try_from(orders.len()).expect("small list")).collect();
        assert_eq!(orders, expected, "mat {mat_number} orders not contiguous");
    }
}
