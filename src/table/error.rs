//! Errors found while building a transition table.

use crate::core::{EventKind, TicketState};
use thiserror::Error;

/// A single problem with a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("No rule for event {event} in state {state}")]
    MissingRule { state: TicketState, event: EventKind },

    #[error("Rule for event {event} moves final state {state} to {next}")]
    LeavesFinalState {
        state: TicketState,
        event: EventKind,
        next: TicketState,
    },
}

/// Every problem found in a table, reported together.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid transition table ({} problem(s)): {}", .errors.len(), join(.errors))]
pub struct InvalidTable {
    pub errors: Vec<TableError>,
}

fn join(errors: &[TableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
