// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{seed_meet, test_persistence};
use mat_board_domain::{AttendanceStatus, Bout, MeetStatus};

#[test]
fn test_attendance_defaults_to_coming() {
    let mut persistence = test_persistence();
    let (meet_id, _) = seed_meet(&mut persistence);

    let state = persistence.load_meet_state(meet_id).expect("state loads");
    assert!(state
        .roster
        .iter()
        .all(|e| e.status == AttendanceStatus::Coming));
}

#[test]
fn test_attendance_update_round_trips() {
    let mut persistence = test_persistence();
    let (meet_id, ids) = seed_meet(&mut persistence);

    persistence
        .set_attendance(meet_id, ids[1], AttendanceStatus::NotComing)
        .expect("attendance updated");

    let state = persistence.load_meet_state(meet_id).expect("state loads");
    assert_eq!(
        state.entry(ids[1]).expect("on roster").status,
        AttendanceStatus::NotComing
    );
}

#[test]
fn test_attendance_change_never_deletes_bouts() {
    let mut persistence = test_persistence();
    let (meet_id, ids) = seed_meet(&mut persistence);
    let bout_id = persistence
        .insert_bout(meet_id, &Bout::new(ids[0], ids[1], 1.0))
        .expect("inserted");

    persistence
        .set_attendance(meet_id, ids[1], AttendanceStatus::Absent)
        .expect("attendance updated");

    // The bout row is still retrievable even though it is now hidden.
    let bout = persistence.get_bout(bout_id).expect("bout retained");
    assert!(bout.pairs(ids[0], ids[1]));

    let state = persistence.load_meet_state(meet_id).expect("state loads");
    assert_eq!(state.bouts.len(), 1);
    assert!(state.visible_bouts().is_empty());
}

#[test]
fn test_attendance_update_for_unrostered_wrestler_errors() {
    let mut persistence = test_persistence();
    let (meet_id, _) = seed_meet(&mut persistence);
    assert!(persistence
        .set_attendance(meet_id, 999, AttendanceStatus::Late)
        .is_err());
}

#[test]
fn test_meet_status_round_trips() {
    let mut persistence = test_persistence();
    let (meet_id, _) = seed_meet(&mut persistence);

    assert_eq!(
        persistence.get_meet(meet_id).expect("meet loads").status,
        MeetStatus::Draft
    );

    persistence
        .set_meet_status(meet_id, MeetStatus::Published)
        .expect("status updated");
    assert_eq!(
        persistence.get_meet(meet_id).expect("meet reloads").status,
        MeetStatus::Published
    );
}

#[test]
fn test_duplicate_roster_row_rejected() {
    let mut persistence = test_persistence();
    let (meet_id, ids) = seed_meet(&mut persistence);
    assert!(persistence
        .add_to_roster(meet_id, ids[0], AttendanceStatus::Coming)
        .is_err());
}
