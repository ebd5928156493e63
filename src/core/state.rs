//! State trait and the ticket lifecycle states.
//!
//! All workflow states implement [`State`], which provides pure methods
//! for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for workflow states.
///
/// All methods are pure. States are immutable values describing the current
/// position of a workflow instance.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the event log
/// - `PartialEq`: states are compared to detect movement
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states appear in audit output and configuration
///
/// Most implementations come from [`state_enum!`](crate::state_enum).
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (absorbing) state.
    ///
    /// No transition table may move an instance out of a final state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// Lifecycle of a support ticket.
    ///
    /// The set is closed: no states can be added at runtime.
    pub enum TicketState {
        /// Freshly opened, nobody working on it yet.
        New,
        /// An agent is assigned or the customer has been answered.
        InProgress,
        /// The problem is fixed; waiting to be closed.
        Resolved,
        /// Done. Absorbing.
        Closed,
    }
    final: [Closed]
}

impl Default for TicketState {
    fn default() -> Self {
        Self::New
    }
}
