//! Builder for custom transition tables.

use super::error::{InvalidTable, TableError};
use super::rule::TransitionRule;
use super::TransitionTable;
use crate::core::{EventKind, State, TicketState};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Cell = Validation<TransitionRule, NonEmptyVec<TableError>>;

/// Builder for transition tables with a fluent API.
///
/// Building checks every cell and reports ALL problems at once instead of
/// stopping at the first one.
///
/// # Example
///
/// ```rust
/// use ticketflow::core::{EventKind, TicketState};
/// use ticketflow::table::{TableBuilder, TransitionRule, TransitionTable};
///
/// // Allow a resolved ticket to be reopened by assigning an agent.
/// let table = TableBuilder::from_table(&TransitionTable::ticket())
///     .rule(
///         TicketState::Resolved,
///         EventKind::AssignAgent,
///         TransitionRule::accept(TicketState::InProgress),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     table.lookup(TicketState::Resolved, EventKind::AssignAgent),
///     TransitionRule::accept(TicketState::InProgress)
/// );
/// ```
#[derive(Clone, Debug)]
pub struct TableBuilder {
    cells: [[Option<TransitionRule>; EventKind::COUNT]; TicketState::COUNT],
}

impl TableBuilder {
    /// Start from an empty table; every cell must be filled before `build`.
    pub fn new() -> Self {
        Self {
            cells: [[None; EventKind::COUNT]; TicketState::COUNT],
        }
    }

    /// Start from a copy of an existing table.
    pub fn from_table(table: &TransitionTable) -> Self {
        let mut builder = Self::new();
        for (state, kind, rule) in table.rules() {
            builder.cells[state.index()][kind.index()] = Some(rule);
        }
        builder
    }

    /// Set (or replace) the rule for one cell.
    pub fn rule(mut self, state: TicketState, kind: EventKind, rule: TransitionRule) -> Self {
        self.cells[state.index()][kind.index()] = Some(rule);
        self
    }

    /// Validate every cell and build the table.
    pub fn build(self) -> Result<TransitionTable, InvalidTable> {
        let checks: Vec<Cell> = TicketState::ALL
            .iter()
            .flat_map(|state| EventKind::ALL.iter().map(move |kind| (*state, *kind)))
            .map(|(state, kind)| check_cell(state, kind, self.cells[state.index()][kind.index()]))
            .collect();

        match Validation::all_vec(checks) {
            Validation::Success(rules) => Ok(TransitionTable::from_fn(|state, kind| {
                rules[state.index() * EventKind::COUNT + kind.index()]
            })),
            Validation::Failure(errors) => Err(InvalidTable {
                errors: errors.iter().cloned().collect(),
            }),
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_cell(state: TicketState, kind: EventKind, rule: Option<TransitionRule>) -> Cell {
    match rule {
        None => Validation::fail(TableError::MissingRule { state, event: kind }),
        Some(TransitionRule::Accept { next }) if state.is_final() && next != state => {
            Validation::fail(TableError::LeavesFinalState {
                state,
                event: kind,
                next,
            })
        }
        Some(rule) => Validation::success(rule),
    }
}
