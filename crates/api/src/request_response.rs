// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use std::collections::BTreeMap;
use time::Date;

/// API request to log in an operator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The operator login name.
    pub login_name: String,
    /// The operator password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The bearer token for subsequent requests.
    pub session_token: String,
    /// The operator's display name.
    pub display_name: String,
    /// The operator's role ("Admin" or "Coach").
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API response describing the authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// The operator's role.
    pub role: String,
}

/// API request to create a team.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTeamRequest {
    /// The team name.
    pub name: String,
}

/// API response for a successful team creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTeamResponse {
    /// The canonical team id.
    pub team_id: i64,
    /// The team name.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API request to register a wrestler.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisterWrestlerRequest {
    /// The team the wrestler belongs to.
    pub team_id: i64,
    /// The wrestler's name.
    pub name: String,
    /// Weight in pounds.
    pub weight: f64,
    /// Date of birth (ISO 8601 date).
    pub birthdate: Date,
    /// Completed seasons of experience. Zero means first-year.
    pub experience_years: u8,
    /// Skill rating, 0 through 5.
    pub skill: u8,
}

/// API response for a successful wrestler registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterWrestlerResponse {
    /// The canonical wrestler id.
    pub wrestler_id: i64,
    /// The wrestler's name.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API request to create a meet with its pairing rule configuration and
/// initial roster.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateMeetRequest {
    /// The date of the meet.
    pub meet_date: Date,
    /// The hosting team.
    pub home_team_id: i64,
    /// Wrestlers on the meet roster (attendance defaults to COMING).
    pub roster_wrestler_ids: Vec<i64>,
    /// Number of mats (1..=6).
    pub num_mats: u8,
    /// Rest-gap threshold in bout slots.
    pub rest_gap: u32,
    /// Desired bouts per wrestler.
    pub matches_per_wrestler: u32,
    /// Hard per-wrestler bout ceiling.
    pub max_matches_per_wrestler: u32,
    /// Whether same-team pairings are allowed.
    pub allow_same_team_matches: bool,
    /// Whether first-years may only face first-years.
    pub first_year_only_with_first_year: bool,
    /// Whether the age-gap check is enforced.
    pub enforce_age_gap_check: bool,
    /// Maximum age gap in days.
    pub max_age_gap_days: i64,
    /// Whether the weight check is enforced.
    pub enforce_weight_check: bool,
    /// Maximum weight difference percentage.
    pub max_weight_diff_pct: f64,
}

/// API response for a successful meet creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateMeetResponse {
    /// The canonical meet id.
    pub meet_id: i64,
    /// The meet status ("Draft").
    pub status: String,
    /// Number of wrestlers on the roster.
    pub roster_size: usize,
    /// A success message.
    pub message: String,
}

/// API request to set a wrestler's attendance status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetAttendanceRequest {
    /// The new status (`COMING`, `NOT_COMING`, `LATE`, `EARLY`, `ABSENT`).
    pub status: String,
}

/// API response for a successful attendance update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetAttendanceResponse {
    /// The meet.
    pub meet_id: i64,
    /// The wrestler.
    pub wrestler_id: i64,
    /// The recorded status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful lock acquisition or refresh.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcquireLockResponse {
    /// The locked meet.
    pub meet_id: i64,
    /// When the lock expires without a refresh (ISO 8601).
    pub expires_at: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful lock release.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReleaseLockResponse {
    /// The unlocked meet.
    pub meet_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to bulk-generate pairings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct GeneratePairingsRequest {
    /// Discard the current bout set before generating.
    #[serde(default)]
    pub clear_existing: bool,
}

/// A wrestler who ended generation below the match target.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnderTargetInfo {
    /// The wrestler.
    pub wrestler_id: i64,
    /// The wrestler's name.
    pub name: String,
    /// Bouts they currently have.
    pub bout_count: u32,
    /// The configured target.
    pub target: u32,
}

/// API response for a generation run.
///
/// `under_target` is informational, never an error: the caller may relax
/// the rules and re-run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GeneratePairingsResponse {
    /// The meet.
    pub meet_id: i64,
    /// Bouts created by this run.
    pub bouts_created: usize,
    /// Total bouts after the run.
    pub total_bouts: usize,
    /// Present wrestlers still below the match target.
    pub under_target: Vec<UnderTargetInfo>,
    /// A success message.
    pub message: String,
}

/// A suggested opponent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateInfo {
    /// The suggested opponent.
    pub wrestler_id: i64,
    /// The opponent's name.
    pub name: String,
    /// The opponent's weight.
    pub weight: f64,
    /// The opponent's experience years.
    pub experience_years: u8,
    /// The opponent's skill rating.
    pub skill: u8,
    /// The pairing score (lower is better).
    pub score: f64,
}

/// API response listing ranked opponent suggestions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SuggestCandidatesResponse {
    /// The meet.
    pub meet_id: i64,
    /// The wrestler the suggestions are for.
    pub wrestler_id: i64,
    /// Ranked suggestions, best first. Empty when the wrestler is absent,
    /// unknown, or already at the match cap.
    pub candidates: Vec<CandidateInfo>,
}

/// A bout as displayed on the mat board.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoutInfo {
    /// The canonical bout id.
    pub bout_id: i64,
    /// The wrestler in red.
    pub red_id: i64,
    /// The red wrestler's name.
    pub red_name: String,
    /// The wrestler in green.
    pub green_id: i64,
    /// The green wrestler's name.
    pub green_name: String,
    /// The pairing score (lower is better).
    pub pairing_score: f64,
    /// The assigned mat, if any.
    pub mat: Option<u8>,
    /// The 1-based position within the mat, if assigned.
    pub order: Option<u32>,
    /// The mat the bout was moved away from, for highlighting.
    pub original_mat: Option<u8>,
    /// Whether the bout has been manually moved off its original mat.
    pub moved: bool,
    /// Rest-gap conflict severity for the red wrestler, if any.
    pub red_conflict: Option<u32>,
    /// Rest-gap conflict severity for the green wrestler, if any.
    pub green_conflict: Option<u32>,
}

/// One mat's ordered bout list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatView {
    /// The mat number.
    pub mat: u8,
    /// Bouts in running order.
    pub bouts: Vec<BoutInfo>,
}

/// The full mat board for a meet.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatBoardView {
    /// The meet.
    pub meet_id: i64,
    /// The meet status.
    pub status: String,
    /// Per-mat running orders.
    pub mats: Vec<MatView>,
    /// Visible bouts without a mat assignment.
    pub unassigned: Vec<BoutInfo>,
    /// Conflict histogram: count of same-wrestler bout pairs per distance
    /// (index = distance in slots, up to the rest gap).
    pub conflict_histogram: Vec<u32>,
}

/// API request to create a single bout from a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateBoutRequest {
    /// The wrestler in red.
    pub red_id: i64,
    /// The wrestler in green.
    pub green_id: i64,
}

/// API response for a successful bout creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateBoutResponse {
    /// The created bout.
    pub bout: BoutInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful bout deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteBoutResponse {
    /// The deleted bout.
    pub bout_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to move a bout to a position on a mat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoveBoutRequest {
    /// The destination mat.
    pub mat: u8,
    /// The 0-based insertion index, clamped to the destination list.
    pub index: u32,
}

/// API response for a successful move.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MoveBoutResponse {
    /// The refreshed board.
    pub board: MatBoardView,
    /// A success message.
    pub message: String,
}

/// API request to replace the full mat ordering.
///
/// The canonical save format: mat number as a string key ("1".."N") to the
/// ordered bout-id list. The save fully replaces each mat's order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveMatOrderingRequest {
    /// Per-mat ordered bout ids, keyed by mat number string.
    pub ordering: BTreeMap<String, Vec<i64>>,
}

/// API response for a successful ordering save.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SaveMatOrderingResponse {
    /// The refreshed board.
    pub board: MatBoardView,
    /// A success message.
    pub message: String,
}

/// API request to run the conflict optimizer over one mat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct AutoReorderRequest {
    /// Seed for the randomized swap selection. Omitted means a random
    /// seed; supplying one makes the run reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// API response for an optimizer run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutoReorderResponse {
    /// The refreshed board.
    pub board: MatBoardView,
    /// Total conflicting pairs before the run.
    pub conflicts_before: u32,
    /// Total conflicting pairs after the run. Never more than before.
    pub conflicts_after: u32,
    /// A success message.
    pub message: String,
}

/// API response for a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishMeetResponse {
    /// The meet.
    pub meet_id: i64,
    /// The new status ("Published").
    pub status: String,
    /// A success message.
    pub message: String,
}
