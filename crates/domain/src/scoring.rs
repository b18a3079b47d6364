// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pairing desirability scoring.
//!
//! The score combines the weight, age, experience, and skill gaps between
//! two wrestlers into one scalar. Lower is better; a perfect twin scores
//! zero. Each term is non-negative and strictly increasing in its gap, so
//! the score is monotonic per factor: widening any single gap never makes
//! a pairing look better.
//!
//! The weights themselves are a tuning choice, not a contract. A month of
//! age difference counts like one percentage point of weight difference;
//! skill distance is weighted heaviest because a lopsided bout is the worst
//! outcome at this level. Only the relative ordering of candidates is
//! load-bearing.

use crate::eligibility::{age_gap_days, weight_diff_pct};
use crate::types::Wrestler;
use time::Date;

/// Weight applied to the weight-difference percentage.
const WEIGHT_GAP_FACTOR: f64 = 1.0;

/// Days of age gap that weigh like one point of weight-difference percentage.
const AGE_GAP_DAYS_PER_POINT: f64 = 30.0;

/// Weight applied to the experience gap in years.
const EXPERIENCE_GAP_FACTOR: f64 = 2.0;

/// Weight applied to the skill-rating gap.
const SKILL_GAP_FACTOR: f64 = 3.0;

/// Computes the pairing score for two wrestlers at the given reference date.
///
/// Lower is better. The result is meaningful only relative to other scores
/// computed with the same reference date.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pairing_score(a: &Wrestler, b: &Wrestler, on: Date) -> f64 {
    let weight_term: f64 = WEIGHT_GAP_FACTOR * weight_diff_pct(a, b);
    let age_term: f64 = age_gap_days(a, b, on) as f64 / AGE_GAP_DAYS_PER_POINT;
    let experience_gap: f64 =
        f64::from(a.experience_years.abs_diff(b.experience_years));
    let skill_gap: f64 = f64::from(a.skill.abs_diff(b.skill));

    weight_term + age_term + EXPERIENCE_GAP_FACTOR * experience_gap + SKILL_GAP_FACTOR * skill_gap
}
