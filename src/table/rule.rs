//! A single cell of a transition table.

use crate::core::{Outcome, Rejection, TicketState};
use serde::{Deserialize, Serialize};

/// What happens when an event of some kind reaches an instance in some state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionRule {
    /// Accept the event and move to `next`, which may be the current state.
    Accept { next: TicketState },
    /// Turn the event away and stay put.
    Reject { reason: Rejection },
}

impl TransitionRule {
    pub fn accept(next: TicketState) -> Self {
        Self::Accept { next }
    }

    pub fn reject(reason: Rejection) -> Self {
        Self::Reject { reason }
    }

    /// State after applying this rule from `current`.
    pub fn next_state(&self, current: TicketState) -> TicketState {
        match self {
            Self::Accept { next } => *next,
            Self::Reject { .. } => current,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Accept { .. } => Outcome::Accepted,
            Self::Reject { reason } => Outcome::Rejected(*reason),
        }
    }
}
