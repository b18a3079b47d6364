// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The maximum number of mats a meet may run.
pub const MAX_MATS: u8 = 6;

/// The maximum skill rating a wrestler may carry.
pub const MAX_SKILL: u8 = 5;

/// The hard ceiling on the per-wrestler match cap.
pub const MAX_MATCHES_PER_WRESTLER: u32 = 5;

/// Days per year used when converting an age in days to an age in years.
///
/// The Gregorian mean year, not the Julian 365.25.
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Effective weight-difference threshold when the weight check is disabled.
pub const UNBOUNDED_WEIGHT_DIFF_PCT: f64 = 999.0;

/// Represents the lifecycle state of a meet.
///
/// Only `Draft` meets may have their bouts or mat assignments mutated;
/// a `Published` meet is read-only to the pairing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeetStatus {
    /// Initial state after creation. Full editing allowed.
    #[default]
    Draft,
    /// The meet is announced. Bouts and mat assignments are frozen.
    Published,
}

impl FromStr for MeetStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Published" => Ok(Self::Published),
            _ => Err(DomainError::InvalidMeetStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MeetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MeetStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The only valid transition is Draft → Published.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Draft, Self::Published))
    }

    /// Returns whether bout and mat-assignment mutations are blocked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Per-meet attendance state for a wrestler.
///
/// A wrestler with no recorded status is treated as `Coming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttendanceStatus {
    /// Expected at the meet (the default).
    #[default]
    Coming,
    /// Will not attend. Excluded from pairing and the mat board.
    NotComing,
    /// Attending, arriving late.
    Late,
    /// Attending, leaving early.
    Early,
    /// Marked absent at the meet. Excluded like `NotComing`.
    Absent,
}

impl AttendanceStatus {
    /// Parses an attendance status from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "COMING" => Ok(Self::Coming),
            "NOT_COMING" => Ok(Self::NotComing),
            "LATE" => Ok(Self::Late),
            "EARLY" => Ok(Self::Early),
            "ABSENT" => Ok(Self::Absent),
            _ => Err(DomainError::InvalidAttendanceStatus(s.to_string())),
        }
    }

    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coming => "COMING",
            Self::NotComing => "NOT_COMING",
            Self::Late => "LATE",
            Self::Early => "EARLY",
            Self::Absent => "ABSENT",
        }
    }

    /// Returns whether this status counts as present for pairing,
    /// mat-board display, and conflict computation.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Coming | Self::Late | Self::Early)
    }
}

/// Represents a mat number.
///
/// Mats are numbered 1 through [`MAX_MATS`]. "No mat assigned" and
/// "no original-mat marker" are expressed as `Option<MatNumber>`, never as a
/// sentinel number, so that mat 1 is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatNumber {
    /// The mat number (1 through `MAX_MATS`).
    number: u8,
}

impl MatNumber {
    /// Creates a new `MatNumber`.
    ///
    /// # Arguments
    ///
    /// * `number` - The mat number (must be between 1 and `MAX_MATS` inclusive)
    ///
    /// # Errors
    ///
    /// Returns an error if the mat number is not in the range 1..=`MAX_MATS`.
    pub const fn new(number: u8) -> Result<Self, DomainError> {
        if number >= 1 && number <= MAX_MATS {
            Ok(Self { number })
        } else {
            Err(DomainError::InvalidMat {
                mat: number,
                max: MAX_MATS,
            })
        }
    }

    /// Returns the mat number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }
}

impl std::fmt::Display for MatNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number)
    }
}

/// Represents a wrestler on a team roster.
///
/// `wrestler_id` is the canonical internal identifier, assigned by the
/// persistence layer on first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wrestler {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// `None` indicates the wrestler has not been persisted yet.
    pub wrestler_id: Option<i64>,
    /// The team this wrestler belongs to.
    pub team_id: i64,
    /// The wrestler's name (informational, not unique).
    pub name: String,
    /// Weight in pounds. Strictly positive.
    pub weight: f64,
    /// Date of birth, used for age-gap checks.
    pub birthdate: Date,
    /// Completed seasons of experience. Zero means first-year.
    pub experience_years: u8,
    /// Coach-assigned skill rating, 0 through [`MAX_SKILL`].
    pub skill: u8,
}

impl Wrestler {
    /// Creates a new `Wrestler` without a persisted `wrestler_id`.
    #[must_use]
    pub const fn new(
        team_id: i64,
        name: String,
        weight: f64,
        birthdate: Date,
        experience_years: u8,
        skill: u8,
    ) -> Self {
        Self {
            wrestler_id: None,
            team_id,
            name,
            weight,
            birthdate,
            experience_years,
            skill,
        }
    }

    /// Creates a `Wrestler` with an existing `wrestler_id` (from persistence).
    #[must_use]
    pub const fn with_id(
        wrestler_id: i64,
        team_id: i64,
        name: String,
        weight: f64,
        birthdate: Date,
        experience_years: u8,
        skill: u8,
    ) -> Self {
        Self {
            wrestler_id: Some(wrestler_id),
            team_id,
            name,
            weight,
            birthdate,
            experience_years,
            skill,
        }
    }

    /// Returns whether this wrestler is in their first year.
    ///
    /// First-year wrestlers may be restricted to facing only other
    /// first-year wrestlers (see [`PairingRules::first_year_only_with_first_year`]).
    #[must_use]
    pub const fn is_first_year(&self) -> bool {
        self.experience_years == 0
    }

    /// Returns the wrestler's age in whole days on the given date.
    ///
    /// Negative if the reference date precedes the birthdate; callers
    /// validate birthdates at the boundary, so this does not error.
    #[must_use]
    pub fn age_days(&self, on: Date) -> i64 {
        (on - self.birthdate).whole_days()
    }

    /// Returns the wrestler's age in fractional years on the given date,
    /// using [`DAYS_PER_YEAR`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn age_years(&self, on: Date) -> f64 {
        self.age_days(on) as f64 / DAYS_PER_YEAR
    }
}

/// A wrestler's participation row for a single meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The wrestler.
    pub wrestler: Wrestler,
    /// The wrestler's attendance status for this meet.
    pub status: AttendanceStatus,
}

impl RosterEntry {
    /// Creates a roster entry with the default `Coming` status.
    #[must_use]
    pub const fn new(wrestler: Wrestler) -> Self {
        Self {
            wrestler,
            status: AttendanceStatus::Coming,
        }
    }

    /// Creates a roster entry with an explicit attendance status.
    #[must_use]
    pub const fn with_status(wrestler: Wrestler, status: AttendanceStatus) -> Self {
        Self { wrestler, status }
    }

    /// Returns whether this wrestler counts as present for the meet.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.status.is_present()
    }
}

/// The pairing rule configuration for a meet.
///
/// Every field is independently meaningful; see `validate_pairing_rules`
/// for the bounds enforced at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingRules {
    /// Number of mats in use (1 through [`MAX_MATS`]).
    pub num_mats: u8,
    /// Minimum number of intervening bout slots between two appearances
    /// of the same wrestler before it stops counting as a conflict.
    pub rest_gap: u32,
    /// Desired number of bouts per wrestler for bulk generation.
    pub matches_per_wrestler: u32,
    /// Hard ceiling on bouts per wrestler. Never exceeded.
    pub max_matches_per_wrestler: u32,
    /// Whether wrestlers from the same team may be paired.
    pub allow_same_team_matches: bool,
    /// Whether first-year wrestlers may only face other first-year wrestlers.
    pub first_year_only_with_first_year: bool,
    /// Whether the age-gap check is enforced.
    pub enforce_age_gap_check: bool,
    /// Maximum allowed age gap in days when the age-gap check is enforced.
    pub max_age_gap_days: i64,
    /// Whether the weight-difference check is enforced.
    pub enforce_weight_check: bool,
    /// Maximum allowed weight difference as a percentage of the lighter
    /// wrestler's weight, when the weight check is enforced.
    pub max_weight_diff_pct: f64,
}

impl PairingRules {
    /// Returns the weight-difference threshold actually applied, accounting
    /// for the enforcement toggle.
    #[must_use]
    pub fn effective_max_weight_diff_pct(&self) -> f64 {
        if self.enforce_weight_check {
            self.max_weight_diff_pct
        } else {
            UNBOUNDED_WEIGHT_DIFF_PCT
        }
    }
}

/// Represents a meet: a dual or multi-team event on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meet {
    /// Canonical internal identifier assigned by the database.
    /// `None` indicates the meet has not been persisted yet.
    pub meet_id: Option<i64>,
    /// The date the meet takes place. Age gaps are evaluated at this date.
    pub meet_date: Date,
    /// The lifecycle status.
    pub status: MeetStatus,
    /// The hosting team.
    pub home_team_id: i64,
    /// The pairing rule configuration.
    pub rules: PairingRules,
}

impl Meet {
    /// Creates a new `Draft` meet without a persisted `meet_id`.
    #[must_use]
    pub const fn new(meet_date: Date, home_team_id: i64, rules: PairingRules) -> Self {
        Self {
            meet_id: None,
            meet_date,
            status: MeetStatus::Draft,
            home_team_id,
            rules,
        }
    }

    /// Creates a `Meet` with an existing `meet_id` (from persistence).
    #[must_use]
    pub const fn with_id(
        meet_id: i64,
        meet_date: Date,
        status: MeetStatus,
        home_team_id: i64,
        rules: PairingRules,
    ) -> Self {
        Self {
            meet_id: Some(meet_id),
            meet_date,
            status,
            home_team_id,
            rules,
        }
    }
}

/// Represents a single scheduled bout between two wrestlers.
///
/// The red/green distinction is presentational; the pair is unordered for
/// duplicate detection. `order` is the 1-based position within the bout's
/// mat and is kept contiguous by every reorder operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bout {
    /// Canonical internal identifier assigned by the database.
    /// `None` indicates the bout has not been persisted yet.
    pub bout_id: Option<i64>,
    /// The wrestler in red.
    pub red_id: i64,
    /// The wrestler in green.
    pub green_id: i64,
    /// Desirability score from the matching algorithm. Lower is better.
    pub pairing_score: f64,
    /// The mat this bout is assigned to, if any.
    pub mat: Option<MatNumber>,
    /// 1-based position within the mat's running order, if assigned.
    pub order: Option<u32>,
    /// The mat this bout was first assigned to, recorded when it is
    /// manually moved away and cleared when it returns. Display-only.
    pub original_mat: Option<MatNumber>,
}

impl Bout {
    /// Creates a new unassigned bout.
    #[must_use]
    pub const fn new(red_id: i64, green_id: i64, pairing_score: f64) -> Self {
        Self {
            bout_id: None,
            red_id,
            green_id,
            pairing_score,
            mat: None,
            order: None,
            original_mat: None,
        }
    }

    /// Creates a `Bout` with an existing `bout_id` (from persistence).
    #[must_use]
    pub const fn with_id(
        bout_id: i64,
        red_id: i64,
        green_id: i64,
        pairing_score: f64,
        mat: Option<MatNumber>,
        order: Option<u32>,
        original_mat: Option<MatNumber>,
    ) -> Self {
        Self {
            bout_id: Some(bout_id),
            red_id,
            green_id,
            pairing_score,
            mat,
            order,
            original_mat,
        }
    }

    /// Returns whether the given wrestler takes part in this bout.
    #[must_use]
    pub fn involves(&self, wrestler_id: i64) -> bool {
        self.red_id == wrestler_id || self.green_id == wrestler_id
    }

    /// Returns whether this bout connects the given unordered pair.
    #[must_use]
    pub fn pairs(&self, a: i64, b: i64) -> bool {
        (self.red_id == a && self.green_id == b) || (self.red_id == b && self.green_id == a)
    }

    /// Returns the opponent of the given wrestler, if they are in this bout.
    #[must_use]
    pub fn opponent_of(&self, wrestler_id: i64) -> Option<i64> {
        if self.red_id == wrestler_id {
            Some(self.green_id)
        } else if self.green_id == wrestler_id {
            Some(self.red_id)
        } else {
            None
        }
    }

    /// Returns whether this bout has both a mat and an order position.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.mat.is_some() && self.order.is_some()
    }
}
