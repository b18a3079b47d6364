// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence tests, all against throwaway in-memory databases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::SqlitePersistence;
use mat_board_domain::{AttendanceStatus, Meet, PairingRules, Wrestler};
use time::macros::date;

mod lock_tests;
mod ordering_tests;
mod roster_tests;

pub fn test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database")
}

pub fn test_rules() -> PairingRules {
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

/// Seeds a team, four wrestlers on the meet roster, and a draft meet.
/// Returns the meet id and the wrestler ids.
pub fn seed_meet(persistence: &mut SqlitePersistence) -> (i64, Vec<i64>) {
    let team_id = persistence.create_team("Eagles").expect("team created");

    let mut wrestler_ids: Vec<i64> = Vec::new();
    for (name, weight) in [
        ("Alex", 100.0),
        ("Blake", 102.0),
        ("Casey", 101.0),
        ("Drew", 103.0),
    ] {
        let wrestler = Wrestler::new(
            team_id,
            String::from(name),
            weight,
            date!(2017 - 06 - 01),
            1,
            2,
        );
        wrestler_ids.push(
            persistence
                .register_wrestler(&wrestler)
                .expect("wrestler registered"),
        );
    }

    let meet = Meet::new(date!(2026 - 02 - 07), team_id, test_rules());
    let meet_id = persistence.create_meet(&meet).expect("meet created");

    for wrestler_id in &wrestler_ids {
        persistence
            .add_to_roster(meet_id, *wrestler_id, AttendanceStatus::Coming)
            .expect("added to roster");
    }

    (meet_id, wrestler_ids)
}
