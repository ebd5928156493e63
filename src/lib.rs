//! Ticketflow: a closed finite-state workflow engine
//!
//! Ticketflow tracks support tickets through a fixed lifecycle. Every
//! (state, event) pair has a rule, so applying an event always succeeds:
//! events the lifecycle does not allow come back as rejected effects and
//! leave the ticket where it was.
//!
//! # Core Concepts
//!
//! - **State**: the closed `TicketState` set; `Closed` is absorbing
//! - **Event**: the closed `EventKind` set plus an optional payload
//! - **Transition table**: total mapping from (state, kind) to a rule
//! - **Event log**: append-only record of every applied event
//! - **Narrator**: strategy that renders an applied event as a sentence
//! - **Subscribers**: handlers notified after every applied event
//!
//! # Example
//!
//! ```rust
//! use ticketflow::{TicketState, WorkflowEngine};
//! use ticketflow::core::Event;
//!
//! let engine = WorkflowEngine::new();
//! let mut ticket = engine.create("T1");
//!
//! engine.apply_event(&mut ticket, Event::assign_agent("Alice"));
//! engine.apply_event(&mut ticket, Event::resolve());
//!
//! let effect = engine.apply_event(&mut ticket, Event::assign_agent("Bob"));
//! assert_eq!(effect.to_string(), "rejected: already resolved");
//!
//! engine.apply_event(&mut ticket, Event::close());
//! assert_eq!(ticket.state(), TicketState::Closed);
//! assert_eq!(ticket.log().len(), 4);
//! ```

mod macros;

pub mod config;
pub mod core;
pub mod engine;
pub mod narrate;
pub mod notify;
pub mod shared;
pub mod table;

// Re-export commonly used types
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::core::{Effect, Event, EventKind, Outcome, Rejection, State, TicketState};
pub use crate::engine::{EngineError, WorkflowEngine, WorkflowInstance};
pub use crate::shared::{SharedInstance, Workflows};
