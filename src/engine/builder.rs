//! Builder for constructing engines.

use super::error::EngineError;
use super::WorkflowEngine;
use crate::core::{EventKind, TicketState};
use crate::narrate::{NarrationStyle, Narrator};
use crate::table::{TableBuilder, TransitionRule, TransitionTable};

/// Builder for [`WorkflowEngine`] with a fluent API.
///
/// Starts from the ticket table and full-sentence narration. Rule overrides
/// are validated together when the engine is built.
pub struct EngineBuilder {
    table: TableBuilder,
    narrator: Option<Narrator>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            table: TableBuilder::from_table(&TransitionTable::ticket()),
            narrator: None,
        }
    }

    /// Replace the whole table.
    pub fn table(mut self, table: &TransitionTable) -> Self {
        self.table = TableBuilder::from_table(table);
        self
    }

    /// Override one cell of the table.
    pub fn rule(mut self, state: TicketState, kind: EventKind, rule: TransitionRule) -> Self {
        self.table = self.table.rule(state, kind, rule);
        self
    }

    pub fn narrator(mut self, narrator: Narrator) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn narration(self, style: NarrationStyle) -> Self {
        self.narrator(style.narrator())
    }

    /// Build the engine.
    /// Returns an error listing every problem if the table is invalid.
    pub fn build(self) -> Result<WorkflowEngine, EngineError> {
        let mut engine = WorkflowEngine::with_table(self.table.build()?);
        if let Some(narrator) = self.narrator {
            engine.set_narrator(narrator);
        }
        Ok(engine)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
