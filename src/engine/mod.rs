//! The workflow engine.
//!
//! [`WorkflowEngine`] owns a transition table, a narrator, and the subscriber
//! registry. It creates instances and applies events to them. Applying an
//! event always runs the same steps:
//!
//! 1. look up the rule for (current state, event kind)
//! 2. commit the new state and append the record to the log
//! 3. log the effect through `tracing`
//! 4. notify subscribers in registration order
//!
//! Only the narration step varies, through the [`Narrator`] strategy.

mod builder;
mod error;
mod instance;

pub use builder::EngineBuilder;
pub use error::EngineError;
pub use instance::WorkflowInstance;

use crate::core::{Effect, Event, EventKind};
use crate::narrate::{NarrationContext, NarrationStyle, Narrator};
use crate::notify::{Notification, Subscribers};
use crate::table::TransitionTable;
use std::fmt;

/// Closed finite-state workflow engine for support tickets.
///
/// # Example
///
/// ```rust
/// use ticketflow::{TicketState, WorkflowEngine};
/// use ticketflow::core::Event;
///
/// let engine = WorkflowEngine::new();
/// let mut ticket = engine.create("T1");
///
/// let effect = engine.apply_event(&mut ticket, Event::assign_agent("Alice"));
/// assert_eq!(effect.to_string(), "accepted");
/// assert_eq!(ticket.state(), TicketState::InProgress);
///
/// let effect = engine.apply_event(&mut ticket, Event::close());
/// assert_eq!(effect.to_string(), "rejected: not yet resolved");
/// assert_eq!(ticket.state(), TicketState::InProgress);
/// ```
pub struct WorkflowEngine {
    table: TransitionTable,
    narrator: Narrator,
    subscribers: Subscribers,
}

impl WorkflowEngine {
    /// Engine with the ticket table and full-sentence narration.
    pub fn new() -> Self {
        Self::with_table(TransitionTable::ticket())
    }

    pub fn with_table(table: TransitionTable) -> Self {
        Self {
            table,
            narrator: NarrationStyle::default().narrator(),
            subscribers: Subscribers::new(),
        }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create an instance in state `New` with an empty log. Never fails.
    pub fn create(&self, id: impl Into<String>) -> WorkflowInstance {
        let instance = WorkflowInstance::new(id.into());
        tracing::debug!(instance = %instance.id(), "workflow instance created");
        instance
    }

    /// Apply one event using the engine's narrator.
    ///
    /// Never fails: an event the table rejects leaves the state as it was
    /// and comes back as a rejected effect. Either way it is logged.
    pub fn apply_event(&self, instance: &mut WorkflowInstance, event: Event) -> Effect {
        self.apply_event_with(instance, event, &self.narrator)
    }

    /// Apply one event, narrating it with `narrator` instead of the
    /// engine's own.
    pub fn apply_event_with(
        &self,
        instance: &mut WorkflowInstance,
        event: Event,
        narrator: &Narrator,
    ) -> Effect {
        let from = instance.state();
        let rule = self.table.lookup(from, event.kind);
        let to = rule.next_state(from);
        let outcome = rule.outcome();

        let narration = narrator(&NarrationContext {
            instance_id: instance.id(),
            event: &event,
            from,
            to,
            outcome,
        });

        let effect = Effect {
            outcome,
            from,
            to,
            narration,
        };

        if effect.is_accepted() {
            tracing::info!(
                instance = %instance.id(),
                event = %event.kind,
                %from,
                %to,
                "{}",
                effect.narration
            );
        } else {
            tracing::debug!(
                instance = %instance.id(),
                event = %event.kind,
                state = %from,
                %outcome,
                "{}",
                effect.narration
            );
        }

        let id = instance.id().to_string();
        let record = instance.commit(event, effect);
        self.subscribers.notify(&Notification {
            instance_id: &id,
            record,
        });

        record.effect.clone()
    }

    /// Apply an event given as text, e.g. from a command line or a request.
    ///
    /// Fails with [`EngineError::UnknownEventKind`] before anything is
    /// applied or logged when `kind` is not a known event kind.
    pub fn apply_raw(
        &self,
        instance: &mut WorkflowInstance,
        kind: &str,
        payload: Option<String>,
    ) -> Result<Effect, EngineError> {
        let kind: EventKind = kind.parse()?;
        let event = Event { kind, payload };
        Ok(self.apply_event(instance, event))
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub fn set_narrator(&mut self, narrator: Narrator) {
        self.narrator = narrator;
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WorkflowEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowEngine")
            .field("table", &self.table)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
