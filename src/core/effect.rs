//! What applying an event did.

use super::state::TicketState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an event was turned away.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Work has not started; nobody is assigned.
    NotAssigned,
    /// The ticket must be resolved first.
    NotResolved,
    AlreadyResolved,
    AlreadyClosed,
    /// The ticket is closed and accepts nothing.
    Closed,
}

impl Rejection {
    pub fn reason(self) -> &'static str {
        match self {
            Self::NotAssigned => "not yet assigned",
            Self::NotResolved => "not yet resolved",
            Self::AlreadyResolved => "already resolved",
            Self::AlreadyClosed => "already closed",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Whether the rule for an event accepted or rejected it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum Outcome {
    Accepted,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// Description of the effect an applied event had.
///
/// The outcome and the state movement are independent: an accepted event may
/// leave the state where it was (a reply to a ticket in progress), and a
/// rejected event never moves it. `Display` renders the outcome only, as
/// `"accepted"` or `"rejected: <reason>"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub outcome: Outcome,
    pub from: TicketState,
    pub to: TicketState,
    /// Human-readable line produced by the active narrator.
    pub narration: String,
}

impl Effect {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    /// True when the state actually changed.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }

    /// `"accepted"` or `"rejected: <reason>"`.
    pub fn description(&self) -> String {
        self.outcome.to_string()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.outcome, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(outcome: Outcome, from: TicketState, to: TicketState) -> Effect {
        Effect {
            outcome,
            from,
            to,
            narration: String::new(),
        }
    }

    #[test]
    fn accepted_description() {
        let e = effect(Outcome::Accepted, TicketState::New, TicketState::InProgress);
        assert_eq!(e.description(), "accepted");
        assert!(e.is_accepted());
        assert!(e.moved());
    }

    #[test]
    fn rejected_description_includes_reason() {
        let e = effect(
            Outcome::Rejected(Rejection::AlreadyResolved),
            TicketState::Resolved,
            TicketState::Resolved,
        );
        assert_eq!(e.to_string(), "rejected: already resolved");
        assert!(!e.moved());
        assert_eq!(e.outcome.rejection(), Some(Rejection::AlreadyResolved));
    }

    #[test]
    fn accepted_stay_does_not_move() {
        let e = effect(
            Outcome::Accepted,
            TicketState::InProgress,
            TicketState::InProgress,
        );
        assert!(e.is_accepted());
        assert!(!e.moved());
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_string(&Outcome::Rejected(Rejection::Closed)).unwrap();
        assert_eq!(json, r#"{"outcome":"rejected","reason":"closed"}"#);
        let json = serde_json::to_string(&Outcome::Accepted).unwrap();
        assert_eq!(json, r#"{"outcome":"accepted"}"#);
    }

    #[test]
    fn rejection_deserializes_snake_case() {
        let reason: Rejection = serde_json::from_str("\"already_closed\"").unwrap();
        assert_eq!(reason, Rejection::AlreadyClosed);
    }
}
