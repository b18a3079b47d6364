// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pairing eligibility rules.
//!
//! This module decides whether two wrestlers may legally be paired under a
//! meet's rule configuration. It is a pure predicate over the provided
//! state: no bout-set knowledge, no side effects.
//!
//! ## Rules (authoritative)
//!
//! A pairing is eligible when ALL of the following hold:
//! 1. The two wrestlers are distinct.
//! 2. Same-team: unless `allow_same_team_matches`, the wrestlers are from
//!    different teams.
//! 3. Age gap: when `enforce_age_gap_check`, the age difference in days at
//!    the meet date is within `max_age_gap_days`.
//! 4. Weight: when `enforce_weight_check`, the weight difference as a
//!    percentage of the lighter wrestler is within `max_weight_diff_pct`.
//!    A disabled check behaves as an effectively unbounded threshold.
//! 5. First-year: when `first_year_only_with_first_year`, first-year
//!    wrestlers face only first-year wrestlers, and vice versa.
//!
//! "Not already paired in this meet" is deliberately NOT part of this
//! predicate; it depends on the current bout set and is enforced by the
//! candidate generator and the bout-creation paths.

use crate::types::{PairingRules, Wrestler};
use time::Date;

/// The specific rule a candidate pairing fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EligibilityViolation {
    /// The two sides are the same wrestler.
    SamePerson,
    /// Both wrestlers are on the same team and same-team matches are off.
    SameTeam,
    /// The age difference exceeds the configured maximum.
    AgeGap {
        /// The actual gap in days.
        gap_days: i64,
        /// The configured maximum in days.
        max_days: i64,
    },
    /// The weight difference exceeds the configured maximum.
    WeightDiff {
        /// The actual difference as a percentage of the lighter wrestler.
        pct: f64,
        /// The configured maximum percentage.
        max_pct: f64,
    },
    /// Exactly one of the two wrestlers is first-year.
    FirstYearMismatch,
}

impl EligibilityViolation {
    /// Returns a short machine-readable name for the violated rule.
    #[must_use]
    pub const fn rule_name(&self) -> &'static str {
        match self {
            Self::SamePerson => "self_pairing",
            Self::SameTeam => "same_team",
            Self::AgeGap { .. } => "age_gap",
            Self::WeightDiff { .. } => "weight_difference",
            Self::FirstYearMismatch => "first_year_rule",
        }
    }
}

impl std::fmt::Display for EligibilityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SamePerson => write!(f, "a wrestler cannot face themselves"),
            Self::SameTeam => write!(f, "same-team matches are not allowed"),
            Self::AgeGap { gap_days, max_days } => {
                write!(f, "age gap of {gap_days} days exceeds the maximum of {max_days}")
            }
            Self::WeightDiff { pct, max_pct } => {
                write!(
                    f,
                    "weight difference of {pct:.1}% exceeds the maximum of {max_pct:.1}%"
                )
            }
            Self::FirstYearMismatch => {
                write!(f, "first-year wrestlers may only face other first-year wrestlers")
            }
        }
    }
}

/// Returns the absolute age difference between two wrestlers in days,
/// evaluated at the given reference date.
#[must_use]
pub fn age_gap_days(a: &Wrestler, b: &Wrestler, on: Date) -> i64 {
    (a.age_days(on) - b.age_days(on)).abs()
}

/// Returns the weight difference between two wrestlers as a percentage of
/// the lighter wrestler's weight.
#[must_use]
pub fn weight_diff_pct(a: &Wrestler, b: &Wrestler) -> f64 {
    let lighter: f64 = a.weight.min(b.weight);
    (a.weight - b.weight).abs() / lighter * 100.0
}

/// Checks whether two wrestlers form a legal pairing under the given rules,
/// reporting the first violated rule.
///
/// Checks run in the order listed in the module documentation; the reported
/// violation is the first failure, not an exhaustive list.
///
/// # Arguments
///
/// * `a` - One wrestler
/// * `b` - The other wrestler
/// * `rules` - The meet's pairing rule configuration
/// * `on` - The reference date for age computation (the meet date)
///
/// # Errors
///
/// Returns the violated rule if the pairing is not eligible.
pub fn check_eligibility(
    a: &Wrestler,
    b: &Wrestler,
    rules: &PairingRules,
    on: Date,
) -> Result<(), EligibilityViolation> {
    if a.wrestler_id.is_some() && a.wrestler_id == b.wrestler_id {
        return Err(EligibilityViolation::SamePerson);
    }

    if !rules.allow_same_team_matches && a.team_id == b.team_id {
        return Err(EligibilityViolation::SameTeam);
    }

    if rules.enforce_age_gap_check {
        let gap_days: i64 = age_gap_days(a, b, on);
        if gap_days > rules.max_age_gap_days {
            return Err(EligibilityViolation::AgeGap {
                gap_days,
                max_days: rules.max_age_gap_days,
            });
        }
    }

    // A disabled weight check still compares, against the unbounded threshold.
    let pct: f64 = weight_diff_pct(a, b);
    let max_pct: f64 = rules.effective_max_weight_diff_pct();
    if pct > max_pct {
        return Err(EligibilityViolation::WeightDiff { pct, max_pct });
    }

    if rules.first_year_only_with_first_year && a.is_first_year() != b.is_first_year() {
        return Err(EligibilityViolation::FirstYearMismatch);
    }

    Ok(())
}

/// Returns whether two wrestlers form a legal pairing under the given rules.
#[must_use]
pub fn is_eligible(a: &Wrestler, b: &Wrestler, rules: &PairingRules, on: Date) -> bool {
    check_eligibility(a, b, rules, on).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Wrestler;
    use time::macros::date;

    fn rules() -> PairingRules {
        PairingRules {
            num_mats: 2,
            rest_gap: 2,
            matches_per_wrestler: 2,
            max_matches_per_wrestler: 3,
            allow_same_team_matches: false,
            first_year_only_with_first_year: true,
            enforce_age_gap_check: true,
            max_age_gap_days: 730,
            enforce_weight_check: true,
            max_weight_diff_pct: 12.0,
        }
    }

    fn wrestler(id: i64, team: i64, weight: f64, birth: Date, exp: u8) -> Wrestler {
        Wrestler::with_id(id, team, format!("Wrestler {id}"), weight, birth, exp, 2)
    }

    const MEET_DATE: Date = date!(2026 - 02 - 07);

    #[test]
    fn test_distinct_wrestlers_required() {
        let a = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 0);
        let result = check_eligibility(&a, &a.clone(), &rules(), MEET_DATE);
        assert_eq!(result, Err(EligibilityViolation::SamePerson));
    }

    #[test]
    fn test_same_team_blocked_when_disallowed() {
        let a = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 0);
        let b = wrestler(2, 1, 101.0, date!(2017 - 05 - 01), 0);
        let result = check_eligibility(&a, &b, &rules(), MEET_DATE);
        assert_eq!(result, Err(EligibilityViolation::SameTeam));
    }

    #[test]
    fn test_same_team_allowed_when_enabled() {
        let a = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 0);
        let b = wrestler(2, 1, 101.0, date!(2017 - 05 - 01), 0);
        let mut config = rules();
        config.allow_same_team_matches = true;
        assert!(is_eligible(&a, &b, &config, MEET_DATE));
    }

    #[test]
    fn test_age_gap_enforced() {
        let a = wrestler(1, 1, 100.0, date!(2013 - 03 - 01), 0);
        let b = wrestler(2, 2, 101.0, date!(2017 - 03 - 01), 0);
        let result = check_eligibility(&a, &b, &rules(), MEET_DATE);
        assert!(matches!(result, Err(EligibilityViolation::AgeGap { .. })));
    }

    #[test]
    fn test_age_gap_ignored_when_disabled() {
        let a = wrestler(1, 1, 100.0, date!(2013 - 03 - 01), 0);
        let b = wrestler(2, 2, 101.0, date!(2017 - 03 - 01), 0);
        let mut config = rules();
        config.enforce_age_gap_check = false;
        assert!(is_eligible(&a, &b, &config, MEET_DATE));
    }

    #[test]
    fn test_weight_difference_relative_to_lighter() {
        // 100 vs 113 is 13% of the lighter wrestler: over a 12% cap.
        let a = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 0);
        let b = wrestler(2, 2, 113.0, date!(2017 - 05 - 01), 0);
        let result = check_eligibility(&a, &b, &rules(), MEET_DATE);
        assert!(matches!(result, Err(EligibilityViolation::WeightDiff { .. })));

        // 100 vs 112 is exactly 12%: allowed.
        let c = wrestler(3, 2, 112.0, date!(2017 - 05 - 01), 0);
        assert!(is_eligible(&a, &c, &rules(), MEET_DATE));
    }

    #[test]
    fn test_weight_check_unbounded_when_disabled() {
        let a = wrestler(1, 1, 55.0, date!(2017 - 03 - 01), 0);
        let b = wrestler(2, 2, 160.0, date!(2017 - 05 - 01), 0);
        let mut config = rules();
        config.enforce_weight_check = false;
        assert!(is_eligible(&a, &b, &config, MEET_DATE));
    }

    #[test]
    fn test_first_year_rule_blocks_mixed_experience() {
        let rookie = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 0);
        let veteran = wrestler(2, 2, 101.0, date!(2017 - 05 - 01), 3);
        let result = check_eligibility(&rookie, &veteran, &rules(), MEET_DATE);
        assert_eq!(result, Err(EligibilityViolation::FirstYearMismatch));
    }

    #[test]
    fn test_first_year_rule_allows_veteran_pairs() {
        let a = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 2);
        let b = wrestler(2, 2, 101.0, date!(2017 - 05 - 01), 3);
        assert!(is_eligible(&a, &b, &rules(), MEET_DATE));
    }

    #[test]
    fn test_first_year_rule_off_allows_mixed() {
        let rookie = wrestler(1, 1, 100.0, date!(2017 - 03 - 01), 0);
        let veteran = wrestler(2, 2, 101.0, date!(2017 - 05 - 01), 3);
        let mut config = rules();
        config.first_year_only_with_first_year = false;
        assert!(is_eligible(&rookie, &veteran, &config, MEET_DATE));
    }
}
