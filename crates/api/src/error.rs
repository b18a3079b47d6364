// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::lock::LockError;
use mat_board::CoreError;
use mat_board_domain::DomainError;
use mat_board_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Domain and core errors are translated explicitly and never
/// leaked directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The meet edit lock gate rejected the request.
    LockViolation {
        /// The meet whose lock was required.
        meet_id: i64,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::LockViolation { meet_id, message } => {
                write!(f, "Edit lock violation for meet {meet_id}: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<LockError> for ApiError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::HeldByAnotherEditor { meet_id } | LockError::NotHeld { meet_id } => {
                Self::LockViolation {
                    meet_id,
                    message: err.to_string(),
                }
            }
            LockError::Storage(message) => Self::Internal { message },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::SelfPairing { wrestler_id } => ApiError::DomainRuleViolation {
            rule: String::from("no_self_pairing"),
            message: format!("Wrestler {wrestler_id} cannot be paired with themselves"),
        },
        DomainError::DuplicatePairing { red_id, green_id } => ApiError::DomainRuleViolation {
            rule: String::from("no_duplicate_pairing"),
            message: format!(
                "Wrestlers {red_id} and {green_id} are already paired in this meet"
            ),
        },
        DomainError::MatchLimitReached { wrestler_id, limit } => ApiError::DomainRuleViolation {
            rule: String::from("max_matches_per_wrestler"),
            message: format!(
                "Wrestler {wrestler_id} already has the maximum number of bouts ({limit})"
            ),
        },
        DomainError::IneligiblePairing {
            red_id,
            green_id,
            rule,
        } => ApiError::DomainRuleViolation {
            rule: String::from("eligibility"),
            message: format!("Wrestlers {red_id} and {green_id} cannot be paired: {rule}"),
        },
        DomainError::InvalidMat { mat, max } => ApiError::InvalidInput {
            field: String::from("mat"),
            message: format!("Invalid mat number: {mat}. Must be between 1 and {max}"),
        },
        DomainError::InvalidMatCount { count, max } => ApiError::InvalidInput {
            field: String::from("num_mats"),
            message: format!("Invalid mat count: {count}. Must be between 1 and {max}"),
        },
        DomainError::InvalidMatchTarget { target } => ApiError::InvalidInput {
            field: String::from("matches_per_wrestler"),
            message: format!("Invalid match target: {target}. Must be at least 1"),
        },
        DomainError::MatchCapBelowTarget { target, cap } => ApiError::InvalidInput {
            field: String::from("max_matches_per_wrestler"),
            message: format!("Match cap ({cap}) must not be below the target ({target})"),
        },
        DomainError::MatchCapTooHigh { cap, max } => ApiError::InvalidInput {
            field: String::from("max_matches_per_wrestler"),
            message: format!("Match cap ({cap}) exceeds the system ceiling ({max})"),
        },
        DomainError::InvalidAgeGap { days } => ApiError::InvalidInput {
            field: String::from("max_age_gap_days"),
            message: format!("Invalid maximum age gap: {days} days"),
        },
        DomainError::InvalidWeightDiffPct { pct } => ApiError::InvalidInput {
            field: String::from("max_weight_diff_pct"),
            message: format!("Invalid maximum weight difference: {pct}%"),
        },
        DomainError::InvalidWeight { weight } => ApiError::InvalidInput {
            field: String::from("weight"),
            message: format!("Invalid weight: {weight}. Must be strictly positive"),
        },
        DomainError::InvalidSkill { skill, max } => ApiError::InvalidInput {
            field: String::from("skill"),
            message: format!("Invalid skill rating: {skill}. Must be between 0 and {max}"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidMeetStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid meet status: {msg}"),
        },
        DomainError::InvalidAttendanceStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid attendance status: {msg}"),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("meet_lifecycle"),
            message: format!("Cannot transition meet from {from} to {to}"),
        },
        DomainError::MeetReadOnly { status } => ApiError::DomainRuleViolation {
            rule: String::from("draft_only_mutation"),
            message: format!(
                "Meet is {status} and read-only; bouts and mat assignments cannot change"
            ),
        },
        DomainError::WrestlerNotFound { wrestler_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Wrestler"),
            message: format!("Wrestler {wrestler_id} not found on the meet roster"),
        },
        DomainError::WrestlerNotAttending { wrestler_id } => ApiError::DomainRuleViolation {
            rule: String::from("attendance"),
            message: format!("Wrestler {wrestler_id} is not attending this meet"),
        },
        DomainError::BoutNotFound { bout_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Bout"),
            message: format!("Bout {bout_id} not found"),
        },
        DomainError::DuplicateBoutInOrdering { bout_id } => ApiError::InvalidInput {
            field: String::from("ordering"),
            message: format!("Bout {bout_id} appears more than once in the mat ordering"),
        },
        DomainError::DuplicateMatInOrdering { mat } => ApiError::InvalidInput {
            field: String::from("ordering"),
            message: format!("Mat {mat} appears more than once in the mat ordering"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Transient storage failures surface as `Internal` for the caller to
/// retry; the API layer performs no retries itself.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::MeetNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Meet"),
            message: format!("Meet {id} does not exist"),
        },
        PersistenceError::WrestlerNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Wrestler"),
            message: format!("Wrestler {id} does not exist"),
        },
        PersistenceError::BoutNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Bout"),
            message: format!("Bout {id} does not exist"),
        },
        PersistenceError::TeamNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Team"),
            message: format!("Team {id} does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: msg,
        },
        _ => ApiError::Internal {
            message: format!("Storage failure: {err}"),
        },
    }
}
