// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Board manipulation through the API: moves, saves, and the optimizer.

use std::collections::BTreeMap;

use crate::handlers::{
    auto_reorder_mat, create_bout, delete_bout, get_mat_board, move_bout, save_mat_ordering,
};
use crate::request_response::{
    AutoReorderRequest, CreateBoutRequest, MoveBoutRequest, SaveMatOrderingRequest,
};
use crate::tests::helpers::{TestContext, admin_context, hold_lock, seed_league, test_cause};

/// Creates bouts pairing the six seeded wrestlers in sequence and saves a
/// known two-mat ordering. Returns the bout ids mat by mat.
fn seeded_board(ctx: &mut TestContext, meet_id: i64, ids: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let token = ctx.token.clone();
    let pairs = [
        (ids[0], ids[3]),
        (ids[1], ids[4]),
        (ids[2], ids[5]),
        (ids[0], ids[4]),
        (ids[1], ids[5]),
    ];
    let mut bout_ids: Vec<i64> = Vec::new();
    for (red_id, green_id) in pairs {
        let result = create_bout(
            &mut ctx.persistence,
            meet_id,
            &CreateBoutRequest { red_id, green_id },
            &ctx.actor,
            &ctx.operator,
            &token,
            test_cause(),
        )
        .expect("bout created");
        bout_ids.push(result.response.bout.bout_id);
    }

    let mat1 = vec![bout_ids[0], bout_ids[1], bout_ids[2]];
    let mat2 = vec![bout_ids[3], bout_ids[4]];
    let mut ordering: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    ordering.insert(String::from("1"), mat1.clone());
    ordering.insert(String::from("2"), mat2.clone());
    save_mat_ordering(
        &mut ctx.persistence,
        meet_id,
        &SaveMatOrderingRequest { ordering },
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    )
    .expect("ordering saved");

    (mat1, mat2)
}

#[test]
fn test_save_reload_round_trip() {
    let mut ctx = admin_context();
    let (meet_id, ids) = seed_league(&mut ctx);
    hold_lock(&mut ctx, meet_id);
    let (mat1, mat2) = seeded_board(&mut ctx, meet_id, &ids);

    let board = get_mat_board(&mut ctx.persistence, meet_id).expect("board loads");
    let loaded_mat1: Vec<i64> = board.mats[0].bouts.iter().map(|b| b.bout_id).collect();
    let loaded_mat2: Vec<i64> = board.mats[1].bouts.iter().map(|b| b.bout_id).collect();
    assert_eq!(loaded_mat1, mat1);
    assert_eq!(loaded_mat2, mat2);
    assert!(board.unassigned.is_empty());

    // Orders are 1-based and contiguous per mat.
    for mat in &board.mats {
        for (slot, bout) in mat.bouts.iter().enumerate() {
            assert_eq!(bout.order, Some(u32::try_from(slot + 1).expect("small")));
        }
    }
}

#[test]
fn test_move_bout_between_mats() {
    let mut ctx = admin_context();
    let (meet_id, ids) = seed_league(&mut ctx);
    hold_lock(&mut ctx, meet_id);
    let (mat1, mat2) = seeded_board(&mut ctx, meet_id, &ids);

    // Move the head of mat 2 into mat 1 at index 1.
    let token = ctx.token.clone();
    let result = move_bout(
        &mut ctx.persistence,
        meet_id,
        mat2[0],
        &MoveBoutRequest { mat: 1, index: 1 },
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    )
    .expect("move succeeds");

    let board = result.response.board;
    let new_mat1: Vec<i64> = board.mats[0].bouts.iter().map(|b| b.bout_id).collect();
    assert_eq!(new_mat1, vec![mat1[0], mat2[0], mat1[1], mat1[2]]);
    assert_eq!(board.mats[1].bouts.len(), 1);

    let moved = &board.mats[0].bouts[1];
    assert_eq!(moved.order, Some(2));
    assert_eq!(moved.original_mat, Some(2));
    assert!(moved.moved);
}

#[test]
fn test_delete_bout_closes_gap() {
    let mut ctx = admin_context();
    let (meet_id, ids) = seed_league(&mut ctx);
    hold_lock(&mut ctx, meet_id);
    let (mat1, _) = seeded_board(&mut ctx, meet_id, &ids);

    let token = ctx.token.clone();
    delete_bout(
        &mut ctx.persistence,
        meet_id,
        mat1[1],
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    )
    .expect("delete succeeds");

    let board = get_mat_board(&mut ctx.persistence, meet_id).expect("board loads");
    let orders: Vec<Option<u32>> = board.mats[0].bouts.iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![Some(1), Some(2)]);
}

#[test]
fn test_auto_reorder_never_increases_conflicts() {
    let mut ctx = admin_context();
    let (meet_id, ids) = seed_league(&mut ctx);
    hold_lock(&mut ctx, meet_id);

    // Stack mat 1 so wrestler ids[0] appears back to back.
    let token = ctx.token.clone();
    let mut bout_ids: Vec<i64> = Vec::new();
    for (red_id, green_id) in [
        (ids[0], ids[3]),
        (ids[0], ids[4]),
        (ids[1], ids[5]),
        (ids[2], ids[4]),
    ] {
        let result = create_bout(
            &mut ctx.persistence,
            meet_id,
            &CreateBoutRequest { red_id, green_id },
            &ctx.actor,
            &ctx.operator,
            &token,
            test_cause(),
        )
        .expect("bout created");
        bout_ids.push(result.response.bout.bout_id);
    }
    let mut ordering: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    ordering.insert(String::from("1"), bout_ids);
    ordering.insert(String::from("2"), Vec::new());
    save_mat_ordering(
        &mut ctx.persistence,
        meet_id,
        &SaveMatOrderingRequest { ordering },
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    )
    .expect("ordering saved");

    let result = auto_reorder_mat(
        &mut ctx.persistence,
        meet_id,
        1,
        &AutoReorderRequest { seed: Some(11) },
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    )
    .expect("reorder succeeds");

    assert!(result.response.conflicts_after <= result.response.conflicts_before);

    // Membership and contiguity survive the shuffle.
    let board = result.response.board;
    assert_eq!(board.mats[0].bouts.len(), 4);
    for (slot, bout) in board.mats[0].bouts.iter().enumerate() {
        assert_eq!(bout.order, Some(u32::try_from(slot + 1).expect("small")));
    }
}

#[test]
fn test_board_reports_conflict_severity() {
    let mut ctx = admin_context();
    let (meet_id, ids) = seed_league(&mut ctx);
    hold_lock(&mut ctx, meet_id);

    let token = ctx.token.clone();
    let mut bout_ids: Vec<i64> = Vec::new();
    for (red_id, green_id) in [(ids[0], ids[3]), (ids[0], ids[4])] {
        let result = create_bout(
            &mut ctx.persistence,
            meet_id,
            &CreateBoutRequest { red_id, green_id },
            &ctx.actor,
            &ctx.operator,
            &token,
            test_cause(),
        )
        .expect("bout created");
        bout_ids.push(result.response.bout.bout_id);
    }
    let mut ordering: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    ordering.insert(String::from("1"), bout_ids);
    save_mat_ordering(
        &mut ctx.persistence,
        meet_id,
        &SaveMatOrderingRequest { ordering },
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    )
    .expect("ordering saved");

    let board = get_mat_board(&mut ctx.persistence, meet_id).expect("board loads");
    // ids[0] wrestles in slots 1 and 2 of mat 1: distance 1 conflicts.
    assert_eq!(board.mats[0].bouts[0].red_conflict, Some(1));
    assert_eq!(board.mats[0].bouts[1].red_conflict, Some(1));
    assert_eq!(board.conflict_histogram[1], 1);
}

#[test]
fn test_save_rejects_unknown_mat_key() {
    let mut ctx = admin_context();
    let (meet_id, ids) = seed_league(&mut ctx);
    hold_lock(&mut ctx, meet_id);
    seeded_board(&mut ctx, meet_id, &ids);

    let token = ctx.token.clone();
    let mut ordering: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    ordering.insert(String::from("nope"), Vec::new());
    let result = save_mat_ordering(
        &mut ctx.persistence,
        meet_id,
        &SaveMatOrderingRequest { ordering },
        &ctx.actor,
        &ctx.operator,
        &token,
        test_cause(),
    );
    assert!(matches!(result, Err(crate::ApiError::InvalidInput { .. })));
}
