// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::{Duration, OffsetDateTime};
use mat_board_audit::Actor;
use mat_board_persistence::{OperatorData, PersistenceError, SessionData, SqlitePersistence};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated operator may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: league operators with structural authority.
    ///
    /// Admins may perform:
    /// - team, wrestler, and meet creation
    /// - meet publication
    /// - everything a Coach may do
    Admin,
    /// Coach role: operators running a meet's pairing board.
    ///
    /// Coaches may:
    /// - generate and edit pairings
    /// - move and reorder bouts
    /// - record attendance changes
    Coach,
}

impl Role {
    /// Parses a role from its stored string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Coach" => Ok(Self::Coach),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }

    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Coach => "Coach",
        }
    }
}

/// An authenticated operator with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor (the login name).
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this actor into an audit `Actor` attributed to the
    /// operator account.
    #[must_use]
    pub fn to_audit_actor(&self, operator: &OperatorData) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Coach => String::from("coach"),
        };
        Actor::with_operator(self.id.clone(), actor_type, operator.operator_id)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may create teams, wrestlers, or meets.
    ///
    /// Only Admin actors have structural authority.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_league(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Coach => Err(AuthError::Unauthorized {
                action: String::from("manage_league"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may edit a meet's pairing board.
    ///
    /// Both Admin and Coach actors may edit the board (the meet edit lock
    /// is a separate, per-meet gate).
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have permission.
    pub const fn authorize_edit_board(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        // Both roles may edit; the meet lock is the real arbiter.
        Ok(())
    }

    /// Checks if an actor may publish a meet.
    ///
    /// Only Admin actors may publish.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_publish_meet(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Coach => Err(AuthError::Unauthorized {
                action: String::from("publish_meet"),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an operator by password and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The operator login name
    /// * `password` - The operator password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, the operator is
    /// disabled, or session creation fails.
    pub fn login(
        persistence: &mut SqlitePersistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, OperatorData), AuthError> {
        let operator: OperatorData = persistence
            .authenticate_operator(login_name, password)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown operator or wrong password"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role = Role::parse(&operator.role)?;
        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.login_name.clone(), role);

        Ok((session_token, actor, operator))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the
    /// operator is disabled.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, OperatorData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role = Role::parse(&operator.role)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.login_name.clone(), role);

        Ok((actor, operator))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        Ok(())
    }

    /// Generates an opaque session token.
    ///
    /// Timestamp plus random suffix; uniqueness is enforced by the
    /// sessions table constraint.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
