// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::candidates::candidates;
use crate::tests::helpers::{default_rules, mark, state_with, wrestler};
use mat_board_domain::{AttendanceStatus, Bout};

#[test]
fn test_candidates_ranked_by_score_ascending() {
    let state = state_with(
        default_rules(),
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 108.0, 1),
            wrestler(4, 2, 104.0, 1),
        ],
    );

    let result = candidates(&state, 1, 10);
    let ids: Vec<i64> = result.iter().map(|c| c.wrestler_id).collect();
    assert_eq!(ids, vec![2, 4, 3]);
    for pair in result.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
}

#[test]
fn test_candidates_respect_limit() {
    let state = state_with(
        default_rules(),
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 102.0, 1),
            wrestler(4, 2, 103.0, 1),
        ],
    );

    assert_eq!(candidates(&state, 1, 2).len(), 2);
}

#[test]
fn test_unknown_target_yields_empty_list() {
    let state = state_with(default_rules(), vec![wrestler(1, 1, 100.0, 1)]);
    assert!(candidates(&state, 99, 10).is_empty());
}

#[test]
fn test_absent_target_yields_empty_list() {
    let mut state = state_with(
        default_rules(),
        vec![wrestler(1, 1, 100.0, 1), wrestler(2, 2, 101.0, 1)],
    );
    mark(&mut state, 1, AttendanceStatus::NotComing);

    assert!(candidates(&state, 1, 10).is_empty());
}

#[test]
fn test_absent_wrestlers_excluded_from_results() {
    let mut state = state_with(
        default_rules(),
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 102.0, 1),
        ],
    );
    mark(&mut state, 2, AttendanceStatus::Absent);

    let ids: Vec<i64> = candidates(&state, 1, 10)
        .iter()
        .map(|c| c.wrestler_id)
        .collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_late_and_early_still_count_as_present() {
    let mut state = state_with(
        default_rules(),
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 102.0, 1),
        ],
    );
    mark(&mut state, 2, AttendanceStatus::Late);
    mark(&mut state, 3, AttendanceStatus::Early);

    assert_eq!(candidates(&state, 1, 10).len(), 2);
}

#[test]
fn test_target_at_cap_yields_empty_list() {
    let mut rules = default_rules();
    rules.matches_per_wrestler = 1;
    rules.max_matches_per_wrestler = 1;
    let mut state = state_with(
        rules,
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 102.0, 1),
        ],
    );
    state.bouts.push(Bout::with_id(1, 1, 2, 1.0, None, None, None));

    assert!(candidates(&state, 1, 10).is_empty());
}

#[test]
fn test_capped_opponents_excluded() {
    let mut rules = default_rules();
    rules.matches_per_wrestler = 1;
    rules.max_matches_per_wrestler = 1;
    let mut state = state_with(
        rules,
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 102.0, 1),
        ],
    );
    state.bouts.push(Bout::with_id(1, 2, 3, 1.0, None, None, None));

    assert!(candidates(&state, 1, 10).is_empty());
}

#[test]
fn test_already_paired_opponent_excluded() {
    let mut state = state_with(
        default_rules(),
        vec![
            wrestler(1, 1, 100.0, 1),
            wrestler(2, 2, 101.0, 1),
            wrestler(3, 2, 102.0, 1),
        ],
    );
    state.bouts.push(Bout::with_id(1, 1, 2, 1.0, None, None, None));

    let ids: Vec<i64> = candidates(&state, 1, 10)
        .iter()
        .map(|c| c.wrestler_id)
        .collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_ineligible_opponents_excluded() {
    let mut rules = default_rules();
    rules.first_year_only_with_first_year = true;
    let state = state_with(
        rules,
        vec![
            wrestler(1, 1, 100.0, 0),
            wrestler(2, 2, 101.0, 0),
            wrestler(3, 2, 102.0, 3),
        ],
    );

    let ids: Vec<i64> = candidates(&state, 1, 10)
        .iter()
        .map(|c| c.wrestler_id)
        .collect();
    assert_eq!(ids, vec![2]);
}
