//! Append-only event log.
//!
//! Every event applied to an instance is recorded, accepted or not, in the
//! order it was applied.

use super::effect::Effect;
use super::event::Event;
use super::state::TicketState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at zero
    pub sequence: usize,
    /// The event as submitted
    pub event: Event,
    /// What the event did
    pub effect: Effect,
    /// When the event was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only log of applied events.
///
/// Records can only be added by the engine; callers get read access.
///
/// # Example
///
/// ```rust
/// use ticketflow::{TicketState, WorkflowEngine};
/// use ticketflow::core::Event;
///
/// let engine = WorkflowEngine::new();
/// let mut ticket = engine.create("T1");
/// engine.apply_event(&mut ticket, Event::assign_agent("Alice"));
/// engine.apply_event(&mut ticket, Event::close());
///
/// let log = ticket.log();
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.accepted().count(), 1);
/// assert_eq!(log.get_path(), vec![&TicketState::New, &TicketState::InProgress]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record for `event`, assigning the next sequence number.
    pub(crate) fn append(&mut self, event: Event, effect: Effect) -> &EventRecord {
        let sequence = self.records.len();
        self.records.push(EventRecord {
            sequence,
            event,
            effect,
            timestamp: Utc::now(),
        });
        &self.records[sequence]
    }

    /// Get the path of states traversed.
    ///
    /// Starts with the state before the first record, then lists each state
    /// the instance actually moved into. Stays and rejections add nothing.
    pub fn get_path(&self) -> Vec<&TicketState> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.effect.from);
        }
        for record in self.records.iter().filter(|r| r.effect.moved()) {
            path.push(&record.effect.to);
        }
        path
    }

    /// Time between the first and last record, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All records, in application order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(|r| r.effect.is_accepted())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(|r| !r.effect.is_accepted())
    }
}
