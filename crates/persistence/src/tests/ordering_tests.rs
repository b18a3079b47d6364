// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mat-ordering persistence: the save → reload round trip.

use crate::tests::{seed_meet, test_persistence};
use mat_board::{Command, apply};
use mat_board_audit::{Actor, Cause};
use mat_board_domain::{Bout, MatNumber};

fn actor() -> Actor {
    Actor::new(String::from("coach-1"), String::from("coach"))
}

fn cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("test"))
}

#[test]
fn test_save_and_reload_preserves_every_position() {
    let mut persistence = test_persistence();
    let (meet_id, ids) = seed_meet(&mut persistence);

    let a = persistence
        .insert_bout(meet_id, &Bout::new(ids[0], ids[1], 1.0))
        .expect("inserted");
    let b = persistence
        .insert_bout(meet_id, &Bout::new(ids[2], ids[3], 1.0))
        .expect("inserted");
    let c = persistence
        .insert_bout(meet_id, &Bout::new(ids[0], ids[2], 1.0))
        .expect("inserted");

    let state = persistence.load_meet_state(meet_id).expect("state loads");
    let mat1 = MatNumber::new(1).expect("valid mat");
    let mat2 = MatNumber::new(2).expect("valid mat");
    let result = apply(
        &state,
        Command::SaveMatOrdering {
            ordering: vec![(mat1, vec![b, a]), (mat2, vec![c])],
        },
        actor(),
        cause(),
    )
    .expect("ordering applies");

    persistence
        .replace_bout_set(meet_id, &result.new_state.bouts)
        .expect("persisted");

    // Reload and compare every mat/order assignment.
    let reloaded = persistence.load_meet_state(meet_id).expect("state reloads");
    assert_eq!(reloaded.bouts, result.new_state.bouts);

    let bout_b = reloaded.bout(b).expect("bout b");
    assert_eq!(bout_b.mat, Some(mat1));
    assert_eq!(bout_b.order, Some(1));
    let bout_a = reloaded.bout(a).expect("bout a");
    assert_eq!(bout_a.order, Some(2));
    let bout_c = reloaded.bout(c).expect("bout c");
    assert_eq!(bout_c.mat, Some(mat2));
    assert_eq!(bout_c.order, Some(1));
}

#[test]
fn test_resaving_same_ordering_changes_nothing() {
    let mut persistence = test_persistence();
    let (meet_id, ids) = seed_meet(&mut persistence);

    let a = persistence
        .insert_bout(meet_id, &Bout::new(ids[0], ids[1], 1.0))
        .expect("inserted");
    let b = persistence
        .insert_bout(meet_id, &Bout::new(ids[2], ids[3], 1.0))
        .expect("inserted");

    let mat1 = MatNumber::new(1).expect("valid mat");
    let ordering = vec![(mat1, vec![a, b])];

    let state = persistence.load_meet_state(meet_id).expect("state loads");
    let result = apply(
        &state,
        Command::SaveMatOrdering {
            ordering: ordering.clone(),
        },
        actor(),
        cause(),
    )
    .expect("ordering applies");
    persistence
        .replace_bout_set(meet_id, &result.new_state.bouts)
        .expect("persisted");
    let first = persistence.load_meet_state(meet_id).expect("reload");

    // Save the identical ordering again (a retry, per the error contract).
    let again = apply(
        &first,
        Command::SaveMatOrdering { ordering },
        actor(),
        cause(),
    )
    .expect("ordering applies again");
    persistence
        .replace_bout_set(meet_id, &again.new_state.bouts)
        .expect("persisted again");
    let second = persistence.load_meet_state(meet_id).expect("reload again");

    assert_eq!(first.bouts, second.bouts);
}

#[test]
fn test_moved_bout_round_trips_original_mat_marker() {
    let mut persistence = test_persistence();
    let (meet_id, ids) = seed_meet(&mut persistence);

    let mat1 = MatNumber::new(1).expect("valid mat");
    let mat2 = MatNumber::new(2).expect("valid mat");
    let bout = Bout {
        mat: Some(mat2),
        order: Some(1),
        ..Bout::new(ids[0], ids[1], 1.0)
    };
    let bout_id = persistence.insert_bout(meet_id, &bout).expect("inserted");

    let state = persistence.load_meet_state(meet_id).expect("state loads");
    let result = apply(
        &state,
        Command::MoveBout {
            bout_id,
            mat: mat1,
            index: 0,
        },
        actor(),
        cause(),
    )
    .expect("move applies");
    persistence
        .replace_bout_set(meet_id, &result.new_state.bouts)
        .expect("persisted");

    let reloaded = persistence.get_bout(bout_id).expect("loaded");
    assert_eq!(reloaded.mat, Some(mat1));
    assert_eq!(reloaded.original_mat, Some(mat2));
}
