// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// For the meet board this is a logged-in operator (admin or coach).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "coach", "system").
    pub actor_type: String,
    /// The canonical operator id, when the actor is a persisted operator.
    pub operator_id: Option<i64>,
}

impl Actor {
    /// Creates a new `Actor` without operator attribution.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self {
            id,
            actor_type,
            operator_id: None,
        }
    }

    /// Creates an `Actor` attributed to a persisted operator.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    /// * `operator_id` - The canonical operator id
    #[must_use]
    pub const fn with_operator(id: String, actor_type: String, operator_id: i64) -> Self {
        Self {
            id,
            actor_type,
            operator_id: Some(operator_id),
        }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new `Cause`.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`GeneratePairings`", "`MoveBout`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new `Action`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of meet state at a point in time.
///
/// The snapshot is a compact string summary (meet, status, roster size,
/// bout count), sufficient to detect whether a transition changed anything
/// without reproducing the full bout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - The meet the transition was scoped to (`meet_id`), when applicable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The meet this event is scoped to. `None` for global operations
    /// (team or wrestler registration).
    pub meet_id: Option<i64>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `meet_id` - The meet scope, when applicable
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        meet_id: Option<i64>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            meet_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("coach-7"), String::from("coach"));

        assert_eq!(actor.id, "coach-7");
        assert_eq!(actor.actor_type, "coach");
        assert_eq!(actor.operator_id, None);
    }

    #[test]
    fn test_actor_with_operator_attribution() {
        let actor: Actor =
            Actor::with_operator(String::from("coach-7"), String::from("coach"), 42);

        assert_eq!(actor.operator_id, Some(42));
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Board edit"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Board edit");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("MoveBout"),
            Some(String::from("Moved bout 12 to mat 2")),
        );

        assert_eq!(action.name, "MoveBout");
        assert_eq!(action.details, Some(String::from("Moved bout 12 to mat 2")));
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("coach-7"), String::from("coach"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Board edit"));
        let action: Action = Action::new(String::from("MoveBout"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("before-state"));
        let after: StateSnapshot = StateSnapshot::new(String::from("after-state"));

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            Some(3),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
        assert_eq!(event.meet_id, Some(3));
    }

    #[test]
    fn test_audit_event_equality() {
        let make = || {
            AuditEvent::new(
                Actor::new(String::from("admin-1"), String::from("admin")),
                Cause::new(String::from("req-1"), String::from("Setup")),
                Action::new(String::from("GeneratePairings"), None),
                StateSnapshot::new(String::from("bouts=0")),
                StateSnapshot::new(String::from("bouts=14")),
                Some(1),
            )
        };

        assert_eq!(make(), make());
    }
}
