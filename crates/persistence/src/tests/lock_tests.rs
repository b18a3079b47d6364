// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{seed_meet, test_persistence};

#[test]
fn test_lock_lifecycle() {
    let mut persistence = test_persistence();
    let (meet_id, _) = seed_meet(&mut persistence);

    assert!(persistence.get_meet_lock(meet_id).expect("query ok").is_none());

    persistence
        .upsert_meet_lock(meet_id, "session-token-1", "2099-01-01T00:00:00Z")
        .expect("lock recorded");
    let lock = persistence
        .get_meet_lock(meet_id)
        .expect("query ok")
        .expect("lock present");
    assert_eq!(lock.meet_id, meet_id);
    assert_eq!(lock.session_token, "session-token-1");

    persistence.delete_meet_lock(meet_id).expect("released");
    assert!(persistence.get_meet_lock(meet_id).expect("query ok").is_none());
}

#[test]
fn test_upsert_replaces_previous_holder() {
    let mut persistence = test_persistence();
    let (meet_id, _) = seed_meet(&mut persistence);

    persistence
        .upsert_meet_lock(meet_id, "session-token-1", "2099-01-01T00:00:00Z")
        .expect("first lock");
    persistence
        .upsert_meet_lock(meet_id, "session-token-2", "2099-01-01T00:00:00Z")
        .expect("second lock");

    let lock = persistence
        .get_meet_lock(meet_id)
        .expect("query ok")
        .expect("lock present");
    assert_eq!(lock.session_token, "session-token-2");
}

#[test]
fn test_operator_and_session_round_trip() {
    let mut persistence = test_persistence();

    let operator_id = persistence
        .create_operator("coach.kim", "Coach Kim", "hunter2hunter2", "Coach")
        .expect("operator created");

    // Wrong password and unknown login both come back as None.
    assert!(persistence
        .authenticate_operator("coach.kim", "wrong")
        .expect("query ok")
        .is_none());
    assert!(persistence
        .authenticate_operator("nobody", "hunter2hunter2")
        .expect("query ok")
        .is_none());

    let operator = persistence
        .authenticate_operator("coach.kim", "hunter2hunter2")
        .expect("query ok")
        .expect("credentials accepted");
    assert_eq!(operator.operator_id, operator_id);
    assert_eq!(operator.role, "Coach");

    persistence
        .create_session("tok-abc", operator_id, "2099-01-01T00:00:00Z")
        .expect("session created");
    let session = persistence
        .get_session_by_token("tok-abc")
        .expect("query ok")
        .expect("session present");
    assert_eq!(session.operator_id, operator_id);

    persistence.delete_session("tok-abc").expect("logged out");
    assert!(persistence
        .get_session_by_token("tok-abc")
        .expect("query ok")
        .is_none());
}
