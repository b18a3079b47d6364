// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{MAX_MATCHES_PER_WRESTLER, MAX_MATS, MAX_SKILL, PairingRules, Wrestler};

/// Validates a meet's pairing rule configuration.
///
/// # Arguments
///
/// * `rules` - The rule configuration to validate
///
/// # Returns
///
/// * `Ok(())` if the configuration is valid
/// * `Err(DomainError)` if any bound is violated
///
/// # Errors
///
/// Returns an error if:
/// - The mat count is outside 1..=`MAX_MATS`
/// - The matches-per-wrestler target is zero
/// - The match cap is below the target or above `MAX_MATCHES_PER_WRESTLER`
/// - The maximum age gap or weight-difference percentage is negative
pub fn validate_pairing_rules(rules: &PairingRules) -> Result<(), DomainError> {
    if rules.num_mats < 1 || rules.num_mats > MAX_MATS {
        return Err(DomainError::InvalidMatCount {
            count: rules.num_mats,
            max: MAX_MATS,
        });
    }

    if rules.matches_per_wrestler < 1 {
        return Err(DomainError::InvalidMatchTarget {
            target: rules.matches_per_wrestler,
        });
    }

    if rules.max_matches_per_wrestler < rules.matches_per_wrestler {
        return Err(DomainError::MatchCapBelowTarget {
            target: rules.matches_per_wrestler,
            cap: rules.max_matches_per_wrestler,
        });
    }

    if rules.max_matches_per_wrestler > MAX_MATCHES_PER_WRESTLER {
        return Err(DomainError::MatchCapTooHigh {
            cap: rules.max_matches_per_wrestler,
            max: MAX_MATCHES_PER_WRESTLER,
        });
    }

    if rules.max_age_gap_days < 0 {
        return Err(DomainError::InvalidAgeGap {
            days: rules.max_age_gap_days,
        });
    }

    if rules.max_weight_diff_pct < 0.0 {
        return Err(DomainError::InvalidWeightDiffPct {
            pct: rules.max_weight_diff_pct,
        });
    }

    Ok(())
}

/// Validates a wrestler's basic field constraints.
///
/// This checks field-level bounds only; roster membership and attendance
/// require meet context and are validated by the core.
///
/// # Arguments
///
/// * `wrestler` - The wrestler to validate
///
/// # Returns
///
/// * `Ok(())` if the wrestler's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The weight is not strictly positive
/// - The skill rating exceeds `MAX_SKILL`
pub fn validate_wrestler_fields(wrestler: &Wrestler) -> Result<(), DomainError> {
    if wrestler.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if wrestler.weight <= 0.0 {
        return Err(DomainError::InvalidWeight {
            weight: wrestler.weight,
        });
    }

    if wrestler.skill > MAX_SKILL {
        return Err(DomainError::InvalidSkill {
            skill: wrestler.skill,
            max: MAX_SKILL,
        });
    }

    Ok(())
}
