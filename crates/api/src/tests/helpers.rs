// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use mat_board_audit::Cause;
use mat_board_persistence::{OperatorData, SqlitePersistence};
use time::macros::date;

use crate::auth::AuthenticatedActor;
use crate::handlers::{acquire_meet_lock, create_meet, create_team, login, register_wrestler};
use crate::request_response::{
    CreateMeetRequest, CreateTeamRequest, LoginRequest, RegisterWrestlerRequest,
};
use crate::{AuthenticationService, Role};

/// An authenticated operator with an open session, ready to drive handlers.
pub struct TestContext {
    pub persistence: SqlitePersistence,
    pub actor: AuthenticatedActor,
    pub operator: OperatorData,
    pub token: String,
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

/// Builds a context with a logged-in Admin operator.
pub fn admin_context() -> TestContext {
    let mut persistence = SqlitePersistence::new_in_memory().expect("in-memory database");
    persistence
        .create_operator("admin.pat", "Pat Admin", "correct-horse", "Admin")
        .expect("operator created");

    let response = login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("admin.pat"),
            password: String::from("correct-horse"),
        },
    )
    .expect("login succeeds");

    let (actor, operator) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .expect("session validates");

    TestContext {
        persistence,
        actor,
        operator,
        token: response.session_token,
    }
}

/// Opens a second session as a separate Coach operator against the same
/// database.
pub fn second_session(ctx: &mut TestContext) -> (AuthenticatedActor, OperatorData, String) {
    ctx.persistence
        .create_operator("coach.lee", "Lee Coach", "another-horse", "Coach")
        .expect("operator created");

    let response = login(
        &mut ctx.persistence,
        &LoginRequest {
            login_name: String::from("coach.lee"),
            password: String::from("another-horse"),
        },
    )
    .expect("login succeeds");

    let (actor, operator) =
        AuthenticationService::validate_session(&mut ctx.persistence, &response.session_token)
            .expect("session validates");
    assert_eq!(actor.role, Role::Coach);

    (actor, operator, response.session_token)
}

/// Seeds two teams with three wrestlers each and a draft meet rostering
/// all six. Returns the meet id and wrestler ids.
pub fn seed_league(ctx: &mut TestContext) -> (i64, Vec<i64>) {
    let home = create_team(
        &mut ctx.persistence,
        &CreateTeamRequest {
            name: String::from("Eagles"),
        },
        &ctx.actor,
        &ctx.operator,
        test_cause(),
    )
    .expect("team created")
    .response
    .team_id;
    let away = create_team(
        &mut ctx.persistence,
        &CreateTeamRequest {
            name: String::from("Bears"),
        },
        &ctx.actor,
        &ctx.operator,
        test_cause(),
    )
    .expect("team created")
    .response
    .team_id;

    let mut wrestler_ids: Vec<i64> = Vec::new();
    for (team_id, name, weight) in [
        (home, "Alex", 100.0),
        (home, "Blake", 102.0),
        (home, "Casey", 104.0),
        (away, "Drew", 101.0),
        (away, "Emery", 103.0),
        (away, "Finley", 99.0),
    ] {
        let response = register_wrestler(
            &mut ctx.persistence,
            &RegisterWrestlerRequest {
                team_id,
                name: String::from(name),
                weight,
                birthdate: date!(2017 - 06 - 01),
                experience_years: 1,
                skill: 2,
            },
            &ctx.actor,
            &ctx.operator,
            test_cause(),
        )
        .expect("wrestler registered");
        wrestler_ids.push(response.response.wrestler_id);
    }

    let meet_id = create_meet(
        &mut ctx.persistence,
        &CreateMeetRequest {
            meet_date: date!(2026 - 02 - 07),
            home_team_id: home,
            roster_wrestler_ids: wrestler_ids.clone(),
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
        },
        &ctx.actor,
        &ctx.operator,
        test_cause(),
    )
    .expect("meet created")
    .response
    .meet_id;

    (meet_id, wrestler_ids)
}

/// Acquires the meet edit lock for the context's session.
pub fn hold_lock(ctx: &mut TestContext, meet_id: i64) {
    let token = ctx.token.clone();
    acquire_meet_lock(&mut ctx.persistence, meet_id, &token).expect("lock acquired");
}
