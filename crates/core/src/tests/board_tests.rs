// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::board::{MatBoard, apply_mat_ordering, distribute_bouts, move_bout, remove_bout};
use crate::error::CoreError;
use crate::tests::helpers::{
    assert_contiguous_orders, assigned_bout, default_rules, mark, mat_number, state_with,
    wrestler,
};
use mat_board_domain::{AttendanceStatus, Bout, DomainError, Wrestler};

/// Sixteen wrestlers so eight bouts never trip the match cap.
fn wide_roster() -> Vec<Wrestler> {
    (1..=16).map(|id| wrestler(id, 1, 100.0, 1)).collect()
}

/// Mat 1 holds bouts 1..=5, mat 2 holds bouts 6..=8.
fn two_mat_state() -> crate::MeetState {
    let mut state = state_with(default_rules(), wide_roster());
    state.bouts = vec![
        assigned_bout(1, 1, 2, 1, 1),
        assigned_bout(2, 3, 4, 1, 2),
        assigned_bout(3, 5, 6, 1, 3),
        assigned_bout(4, 7, 8, 1, 4),
        assigned_bout(5, 9, 10, 1, 5),
        assigned_bout(6, 11, 12, 2, 1),
        assigned_bout(7, 13, 14, 2, 2),
        assigned_bout(8, 15, 16, 2, 3),
    ];
    state
}

#[test]
fn test_move_between_mats_reindexes_both_lists() {
    // Move bout 6 from mat 2 index 0 to mat 1 index 3: mat 2 ends up with
    // 2 contiguous bouts, mat 1 with 6, the moved bout at position 4.
    let state = two_mat_state();
    let bouts = move_bout(&state, 6, mat_number(1), 3).expect("move succeeds");

    let mut new_state = state.clone();
    new_state.bouts = bouts;
    assert_contiguous_orders(&new_state);

    let moved = new_state.bout(6).expect("bout exists");
    assert_eq!(moved.mat, Some(mat_number(1)));
    assert_eq!(moved.order, Some(4));
    assert_eq!(moved.original_mat, Some(mat_number(2)));

    let board = MatBoard::from_state(&new_state);
    assert_eq!(board.mat(mat_number(1)), &[1, 2, 3, 6, 4, 5]);
    assert_eq!(board.mat(mat_number(2)), &[7, 8]);
}

#[test]
fn test_move_within_same_mat_keeps_marker_clear() {
    let state = two_mat_state();
    let bouts = move_bout(&state, 1, mat_number(1), 4).expect("move succeeds");

    let mut new_state = state.clone();
    new_state.bouts = bouts;
    assert_contiguous_orders(&new_state);

    let moved = new_state.bout(1).expect("bout exists");
    assert_eq!(moved.original_mat, None);
    let board = MatBoard::from_state(&new_state);
    assert_eq!(board.mat(mat_number(1)), &[2, 3, 4, 5, 1]);
}

#[test]
fn test_original_mat_not_overwritten_by_second_move() {
    let state = two_mat_state();
    let mut working = state.clone();
    working.bouts = move_bout(&working, 6, mat_number(1), 0).expect("first move");

    // Second move within mat 1 keeps the original mat 2 marker.
    working.bouts = move_bout(&working, 6, mat_number(1), 5).expect("second move");
    assert_eq!(
        working.bout(6).expect("bout exists").original_mat,
        Some(mat_number(2))
    );
}

#[test]
fn test_marker_cleared_when_bout_returns_home() {
    let state = two_mat_state();
    let mut working = state.clone();
    working.bouts = move_bout(&working, 6, mat_number(1), 0).expect("move away");
    assert_eq!(
        working.bout(6).expect("bout exists").original_mat,
        Some(mat_number(2))
    );

    working.bouts = move_bout(&working, 6, mat_number(2), 0).expect("move home");
    assert_eq!(working.bout(6).expect("bout exists").original_mat, None);
    assert_contiguous_orders(&working);
}

#[test]
fn test_move_index_clamped_to_list_length() {
    let state = two_mat_state();
    let bouts = move_bout(&state, 6, mat_number(1), 99).expect("move succeeds");

    let mut new_state = state;
    new_state.bouts = bouts;
    let moved = new_state.bout(6).expect("bout exists");
    assert_eq!(moved.order, Some(6), "clamped to the end of mat 1");
}

#[test]
fn test_move_to_mat_outside_configuration_rejected() {
    let state = two_mat_state(); // num_mats = 2
    let result = move_bout(&state, 6, mat_number(3), 0);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidMat { mat: 3, max: 2 }))
    ));
}

#[test]
fn test_move_unknown_bout_rejected() {
    let state = two_mat_state();
    let result = move_bout(&state, 99, mat_number(1), 0);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::BoutNotFound { bout_id: 99 }))
    ));
}

#[test]
fn test_remove_bout_closes_the_gap() {
    let state = two_mat_state();
    let bouts = remove_bout(&state, 2).expect("remove succeeds");

    let mut new_state = state;
    new_state.bouts = bouts;
    assert_contiguous_orders(&new_state);
    assert!(new_state.bout(2).is_none());

    let board = MatBoard::from_state(&new_state);
    assert_eq!(board.mat(mat_number(1)), &[1, 3, 4, 5]);
}

#[test]
fn test_apply_mat_ordering_replaces_wholesale() {
    let state = two_mat_state();
    let ordering = vec![
        (mat_number(1), vec![5, 4, 3, 2, 1]),
        (mat_number(2), vec![8, 6, 7]),
    ];
    let bouts = apply_mat_ordering(&state, &ordering).expect("save succeeds");

    let mut new_state = state;
    new_state.bouts = bouts;
    assert_contiguous_orders(&new_state);

    let board = MatBoard::from_state(&new_state);
    assert_eq!(board.mat(mat_number(1)), &[5, 4, 3, 2, 1]);
    assert_eq!(board.mat(mat_number(2)), &[8, 6, 7]);
}

#[test]
fn test_apply_mat_ordering_is_idempotent() {
    let state = two_mat_state();
    let ordering = vec![
        (mat_number(1), vec![5, 4, 3, 2, 1]),
        (mat_number(2), vec![8, 6, 7]),
    ];
    let once = apply_mat_ordering(&state, &ordering).expect("first save");

    let mut after_once = state.clone();
    after_once.bouts = once;
    let twice = apply_mat_ordering(&after_once, &ordering).expect("second save");
    assert_eq!(after_once.bouts, twice);
}

#[test]
fn test_apply_mat_ordering_unlisted_bouts_become_unassigned() {
    let state = two_mat_state();
    let ordering = vec![
        (mat_number(1), vec![1, 2, 3, 4]),
        (mat_number(2), vec![6, 7, 8]),
    ];
    let bouts = apply_mat_ordering(&state, &ordering).expect("save succeeds");

    let dropped = bouts
        .iter()
        .find(|b| b.bout_id == Some(5))
        .expect("bout still exists");
    assert_eq!(dropped.mat, None);
    assert_eq!(dropped.order, None);
}

#[test]
fn test_apply_mat_ordering_rejects_unknown_bout() {
    let state = two_mat_state();
    let ordering = vec![(mat_number(1), vec![1, 99])];
    assert!(matches!(
        apply_mat_ordering(&state, &ordering),
        Err(CoreError::DomainViolation(DomainError::BoutNotFound { bout_id: 99 }))
    ));
}

#[test]
fn test_apply_mat_ordering_rejects_duplicate_bout() {
    let state = two_mat_state();
    let ordering = vec![
        (mat_number(1), vec![1, 2]),
        (mat_number(2), vec![2, 3]),
    ];
    assert!(matches!(
        apply_mat_ordering(&state, &ordering),
        Err(CoreError::DomainViolation(
            DomainError::DuplicateBoutInOrdering { bout_id: 2 }
        ))
    ));
}

#[test]
fn test_apply_mat_ordering_rejects_duplicate_mat() {
    let state = two_mat_state();
    let ordering = vec![
        (mat_number(1), vec![1, 2]),
        (mat_number(1), vec![3, 4]),
    ];
    assert!(matches!(
        apply_mat_ordering(&state, &ordering),
        Err(CoreError::DomainViolation(
            DomainError::DuplicateMatInOrdering { mat: 1 }
        ))
    ));
}

#[test]
fn test_distribute_assigns_every_unassigned_bout() {
    let mut state = state_with(default_rules(), wide_roster());
    state.bouts = vec![
        Bout::with_id(1, 1, 2, 1.0, None, None, None),
        Bout::with_id(2, 3, 4, 1.0, None, None, None),
        Bout::with_id(3, 5, 6, 1.0, None, None, None),
        Bout::with_id(4, 7, 8, 1.0, None, None, None),
    ];

    let mut new_state = state.clone();
    new_state.bouts = distribute_bouts(&state);
    assert!(new_state.bouts.iter().all(Bout::is_assigned));
    assert_contiguous_orders(&new_state);
}

#[test]
fn test_distribute_balances_mat_lengths() {
    let mut state = state_with(default_rules(), wide_roster());
    state.bouts = (1..=8)
        .map(|id| Bout::with_id(id, id * 2 - 1, id * 2, 1.0, None, None, None))
        .collect();

    let mut new_state = state.clone();
    new_state.bouts = distribute_bouts(&state);
    let board = MatBoard::from_state(&new_state);
    assert_eq!(board.mat(mat_number(1)).len(), 4);
    assert_eq!(board.mat(mat_number(2)).len(), 4);
}

#[test]
fn test_hidden_bouts_keep_their_slot_but_leave_the_board() {
    let mut state = two_mat_state();
    mark(&mut state, 3, AttendanceStatus::NotComing);

    // Bout 2 (wrestlers 3 and 4) disappears from the board...
    let board = MatBoard::from_state(&state);
    assert_eq!(board.mat(mat_number(1)), &[1, 3, 4, 5]);

    // ...but the bout row itself is untouched.
    let hidden = state.bout(2).expect("bout still stored");
    assert_eq!(hidden.order, Some(2));
}
