//! Transition tables.
//!
//! A [`TransitionTable`] maps every (state, event kind) pair to a
//! [`TransitionRule`]. Tables are total by construction: the default ticket
//! table comes from an exhaustive `match`, and custom tables only come out of
//! [`TableBuilder`], which refuses to build while any cell is missing.

mod builder;
mod error;
mod rule;

pub use builder::TableBuilder;
pub use error::{InvalidTable, TableError};
pub use rule::TransitionRule;

use crate::core::{EventKind, Rejection, TicketState};

type Cells = [[TransitionRule; EventKind::COUNT]; TicketState::COUNT];

/// Total mapping from (state, event kind) to a rule.
///
/// # Example
///
/// ```rust
/// use ticketflow::core::{EventKind, Rejection, TicketState};
/// use ticketflow::table::{TransitionRule, TransitionTable};
///
/// let table = TransitionTable::ticket();
///
/// assert_eq!(
///     table.lookup(TicketState::New, EventKind::AssignAgent),
///     TransitionRule::accept(TicketState::InProgress)
/// );
/// assert_eq!(
///     table.lookup(TicketState::Closed, EventKind::Close),
///     TransitionRule::reject(Rejection::AlreadyClosed)
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    cells: Cells,
}

impl TransitionTable {
    /// The support ticket lifecycle.
    pub fn ticket() -> Self {
        Self::from_fn(ticket_rule)
    }

    pub(crate) fn from_fn(rule: impl Fn(TicketState, EventKind) -> TransitionRule) -> Self {
        let cells = std::array::from_fn(|s| {
            std::array::from_fn(|e| rule(TicketState::ALL[s], EventKind::ALL[e]))
        });
        Self { cells }
    }

    /// Rule for an event of `kind` arriving in `state`.
    pub fn lookup(&self, state: TicketState, kind: EventKind) -> TransitionRule {
        self.cells[state.index()][kind.index()]
    }

    /// Every cell, row by row in state order.
    pub fn rules(&self) -> impl Iterator<Item = (TicketState, EventKind, TransitionRule)> + '_ {
        TicketState::ALL.iter().flat_map(move |state| {
            EventKind::ALL
                .iter()
                .map(move |kind| (*state, *kind, self.lookup(*state, *kind)))
        })
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::ticket()
    }
}

fn ticket_rule(state: TicketState, kind: EventKind) -> TransitionRule {
    use EventKind::*;
    use TicketState::*;

    match (state, kind) {
        (New, AssignAgent | Reply) => TransitionRule::accept(InProgress),
        (New, Resolve) => TransitionRule::reject(Rejection::NotAssigned),
        (New | InProgress, Close) => TransitionRule::reject(Rejection::NotResolved),

        (InProgress, AssignAgent | Reply) => TransitionRule::accept(InProgress),
        (InProgress, Resolve) => TransitionRule::accept(Resolved),

        (Resolved, AssignAgent | Resolve) => TransitionRule::reject(Rejection::AlreadyResolved),
        (Resolved, Reply) => TransitionRule::accept(Resolved),
        (Resolved, Close) => TransitionRule::accept(Closed),

        (Closed, Close) => TransitionRule::reject(Rejection::AlreadyClosed),
        (Closed, AssignAgent | Reply | Resolve) => TransitionRule::reject(Rejection::Closed),
    }
}
