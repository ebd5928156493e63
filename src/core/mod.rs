//! Core workflow types.
//!
//! This module contains the pure data of the engine:
//! - States via the `State` trait and the closed `TicketState` set
//! - Events and their closed `EventKind` set
//! - Effects describing what an event did
//! - The append-only event log

mod effect;
mod event;
mod log;
mod state;

pub use effect::{Effect, Outcome, Rejection};
pub use event::{Event, EventKind, UnknownEventKind};
pub use log::{EventLog, EventRecord};
pub use state::{State, TicketState};
