//! A single workflow instance.

use crate::core::{Effect, Event, EventLog, EventRecord, State, TicketState};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One tracked ticket: identifier, current state, and its event log.
///
/// Instances are created by [`WorkflowEngine::create`](crate::WorkflowEngine::create)
/// and only change through the engine. Callers get read access.
#[derive(Clone, Debug, Serialize)]
pub struct WorkflowInstance {
    id: String,
    state: TicketState,
    created_at: DateTime<Utc>,
    log: EventLog,
}

impl WorkflowInstance {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            state: TicketState::New,
            created_at: Utc::now(),
            log: EventLog::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> TicketState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// True once the instance reached a final state.
    pub fn is_closed(&self) -> bool {
        self.state.is_final()
    }

    /// Move to `effect.to` and record the event, as one step.
    pub(crate) fn commit(&mut self, event: Event, effect: Effect) -> &EventRecord {
        self.state = effect.to;
        self.log.append(event, effect)
    }
}
