// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs for Diesel queries and inserts, plus conversions to and
//! from domain types.
//!
//! Dates are stored as ISO 8601 text. Mat numbers are stored as plain
//! integers and validated back through [`MatNumber::new`] on load, so a
//! corrupted row surfaces as [`PersistenceError::InvalidRow`] instead of a
//! silently wrong mat.

use diesel::prelude::*;
use mat_board_domain::{
    AttendanceStatus, Bout, MatNumber, Meet, MeetStatus, PairingRules, Wrestler,
};
use num_traits::ToPrimitive;
use std::str::FromStr;
use time::Date;
use time::format_description::well_known::Iso8601;

use crate::error::PersistenceError;

/// Parses an ISO 8601 date column.
///
/// # Errors
///
/// Returns an error if the stored text is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::InvalidRow(format!("bad date '{value}': {e}")))
}

/// Formats a date for storage as ISO 8601 text.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_date(value: Date) -> Result<String, PersistenceError> {
    value
        .format(&time::macros::format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::SerializationError(format!("bad date: {e}")))
}

fn column_to_mat(value: Option<i32>, column: &str) -> Result<Option<MatNumber>, PersistenceError> {
    value
        .map(|raw| {
            let number = raw
                .to_u8()
                .ok_or_else(|| PersistenceError::InvalidRow(format!("{column} = {raw}")))?;
            MatNumber::new(number)
                .map_err(|e| PersistenceError::InvalidRow(format!("{column}: {e}")))
        })
        .transpose()
}

fn column_to_order(value: Option<i32>, column: &str) -> Result<Option<u32>, PersistenceError> {
    value
        .map(|raw| {
            raw.to_u32()
                .ok_or_else(|| PersistenceError::InvalidRow(format!("{column} = {raw}")))
        })
        .transpose()
}

/// A stored team.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct TeamRow {
    /// The canonical team id.
    pub team_id: i64,
    /// The team name.
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::teams)]
pub(crate) struct NewTeam<'a> {
    pub name: &'a str,
}

/// A stored wrestler row.
#[derive(Debug, Clone, Queryable)]
pub struct WrestlerRow {
    pub wrestler_id: i64,
    pub team_id: i64,
    pub name: String,
    pub weight: f64,
    pub birthdate: String,
    pub experience_years: i32,
    pub skill: i32,
}

impl WrestlerRow {
    /// Converts the row into a domain wrestler.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column is outside its domain range.
    pub fn into_domain(self) -> Result<Wrestler, PersistenceError> {
        let birthdate = parse_date(&self.birthdate)?;
        let experience_years = self
            .experience_years
            .to_u8()
            .ok_or_else(|| {
                PersistenceError::InvalidRow(format!("experience_years = {}", self.experience_years))
            })?;
        let skill = self
            .skill
            .to_u8()
            .ok_or_else(|| PersistenceError::InvalidRow(format!("skill = {}", self.skill)))?;

        Ok(Wrestler::with_id(
            self.wrestler_id,
            self.team_id,
            self.name,
            self.weight,
            birthdate,
            experience_years,
            skill,
        ))
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::wrestlers)]
pub(crate) struct NewWrestler<'a> {
    pub team_id: i64,
    pub name: &'a str,
    pub weight: f64,
    pub birthdate: String,
    pub experience_years: i32,
    pub skill: i32,
}

/// A stored meet row, configuration columns inline.
#[derive(Debug, Clone, Queryable)]
pub struct MeetRow {
    pub meet_id: i64,
    pub meet_date: String,
    pub status: String,
    pub home_team_id: i64,
    pub num_mats: i32,
    pub rest_gap: i32,
    pub matches_per_wrestler: i32,
    pub max_matches_per_wrestler: i32,
    pub allow_same_team_matches: bool,
    pub first_year_only_with_first_year: bool,
    pub enforce_age_gap_check: bool,
    pub max_age_gap_days: i64,
    pub enforce_weight_check: bool,
    pub max_weight_diff_pct: f64,
}

impl MeetRow {
    /// Converts the row into a domain meet.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column is outside its domain range.
    pub fn into_domain(self) -> Result<Meet, PersistenceError> {
        let meet_date = parse_date(&self.meet_date)?;
        let status = MeetStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::InvalidRow(e.to_string()))?;
        let num_mats = self
            .num_mats
            .to_u8()
            .ok_or_else(|| PersistenceError::InvalidRow(format!("num_mats = {}", self.num_mats)))?;
        let rest_gap = self
            .rest_gap
            .to_u32()
            .ok_or_else(|| PersistenceError::InvalidRow(format!("rest_gap = {}", self.rest_gap)))?;
        let matches_per_wrestler = self.matches_per_wrestler.to_u32().ok_or_else(|| {
            PersistenceError::InvalidRow(format!(
                "matches_per_wrestler = {}",
                self.matches_per_wrestler
            ))
        })?;
        let max_matches_per_wrestler = self.max_matches_per_wrestler.to_u32().ok_or_else(|| {
            PersistenceError::InvalidRow(format!(
                "max_matches_per_wrestler = {}",
                self.max_matches_per_wrestler
            ))
        })?;

        let rules = PairingRules {
            num_mats,
            rest_gap,
            matches_per_wrestler,
            max_matches_per_wrestler,
            allow_same_team_matches: self.allow_same_team_matches,
            first_year_only_with_first_year: self.first_year_only_with_first_year,
            enforce_age_gap_check: self.enforce_age_gap_check,
            max_age_gap_days: self.max_age_gap_days,
            enforce_weight_check: self.enforce_weight_check,
            max_weight_diff_pct: self.max_weight_diff_pct,
        };

        Ok(Meet::with_id(
            self.meet_id,
            meet_date,
            status,
            self.home_team_id,
            rules,
        ))
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::meets)]
pub(crate) struct NewMeet {
    pub meet_date: String,
    pub status: String,
    pub home_team_id: i64,
    pub num_mats: i32,
    pub rest_gap: i32,
    pub matches_per_wrestler: i32,
    pub max_matches_per_wrestler: i32,
    pub allow_same_team_matches: bool,
    pub first_year_only_with_first_year: bool,
    pub enforce_age_gap_check: bool,
    pub max_age_gap_days: i64,
    pub enforce_weight_check: bool,
    pub max_weight_diff_pct: f64,
}

/// A stored attendance row.
#[derive(Debug, Clone, Queryable)]
pub struct AttendanceRow {
    pub attendance_id: i64,
    pub meet_id: i64,
    pub wrestler_id: i64,
    pub status: String,
}

impl AttendanceRow {
    /// Parses the stored status string.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status is not a valid value.
    pub fn parsed_status(&self) -> Result<AttendanceStatus, PersistenceError> {
        AttendanceStatus::parse(&self.status)
            .map_err(|e| PersistenceError::InvalidRow(e.to_string()))
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::meet_attendance)]
pub(crate) struct NewAttendance<'a> {
    pub meet_id: i64,
    pub wrestler_id: i64,
    pub status: &'a str,
}

/// A stored bout row.
#[derive(Debug, Clone, Queryable)]
pub struct BoutRow {
    pub bout_id: i64,
    pub meet_id: i64,
    pub red_id: i64,
    pub green_id: i64,
    pub pairing_score: f64,
    pub mat: Option<i32>,
    pub bout_order: Option<i32>,
    pub original_mat: Option<i32>,
}

impl BoutRow {
    /// Converts the row into a domain bout.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column is outside its domain range.
    pub fn into_domain(self) -> Result<Bout, PersistenceError> {
        let mat = column_to_mat(self.mat, "mat")?;
        let order = column_to_order(self.bout_order, "bout_order")?;
        let original_mat = column_to_mat(self.original_mat, "original_mat")?;

        Ok(Bout::with_id(
            self.bout_id,
            self.red_id,
            self.green_id,
            self.pairing_score,
            mat,
            order,
            original_mat,
        ))
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::bouts)]
pub(crate) struct NewBout {
    pub meet_id: i64,
    pub red_id: i64,
    pub green_id: i64,
    pub pairing_score: f64,
    pub mat: Option<i32>,
    pub bout_order: Option<i32>,
    pub original_mat: Option<i32>,
}

impl NewBout {
    pub(crate) fn from_domain(meet_id: i64, bout: &Bout) -> Self {
        Self {
            meet_id,
            red_id: bout.red_id,
            green_id: bout.green_id,
            pairing_score: bout.pairing_score,
            mat: bout.mat.map(|m| i32::from(m.number())),
            bout_order: bout.order.and_then(|o| o.to_i32()),
            original_mat: bout.original_mat.map(|m| i32::from(m.number())),
        }
    }
}

/// Operator account data, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorData {
    /// The canonical operator id.
    pub operator_id: i64,
    /// The unique login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The role string ("Admin" or "Coach").
    pub role: String,
    /// Whether the account is disabled.
    pub is_disabled: bool,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last successful login timestamp (ISO 8601), if any.
    pub last_login_at: Option<String>,
}

/// A full operator row, including the password hash. Internal only.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct OperatorRow {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl OperatorRow {
    pub(crate) fn into_data(self) -> OperatorData {
        OperatorData {
            operator_id: self.operator_id,
            login_name: self.login_name,
            display_name: self.display_name,
            role: self.role,
            is_disabled: self.is_disabled,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::operators)]
pub(crate) struct NewOperator<'a> {
    pub login_name: &'a str,
    pub display_name: &'a str,
    pub password_hash: String,
    pub role: &'a str,
    pub is_disabled: bool,
    pub created_at: String,
}

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct SessionData {
    /// The canonical session id.
    pub session_id: i64,
    /// The operator this session belongs to.
    pub operator_id: i64,
    /// The opaque bearer token.
    pub token: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
    /// Last activity timestamp (ISO 8601).
    pub last_activity_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::sessions)]
pub(crate) struct NewSession<'a> {
    pub operator_id: i64,
    pub token: &'a str,
    pub created_at: String,
    pub expires_at: &'a str,
    pub last_activity_at: String,
}

/// A stored meet edit lock.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct MeetLockData {
    /// The canonical lock id.
    pub lock_id: i64,
    /// The locked meet.
    pub meet_id: i64,
    /// The session token holding the lock.
    pub session_token: String,
    /// Acquisition timestamp (ISO 8601).
    pub acquired_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::meet_locks)]
pub(crate) struct NewMeetLock<'a> {
    pub meet_id: i64,
    pub session_token: &'a str,
    pub acquired_at: String,
    pub expires_at: String,
}

/// A stored audit event row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct AuditEventRow {
    /// The canonical event id.
    pub event_id: i64,
    /// The meet scope, when applicable.
    pub meet_id: Option<i64>,
    /// JSON-encoded actor.
    pub actor_json: String,
    /// JSON-encoded cause.
    pub cause_json: String,
    /// JSON-encoded action.
    pub action_json: String,
    /// JSON-encoded before snapshot.
    pub before_snapshot_json: String,
    /// JSON-encoded after snapshot.
    pub after_snapshot_json: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::diesel_schema::audit_events)]
pub(crate) struct NewAuditEvent {
    pub meet_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}
