//! Engine error types.

use crate::core::UnknownEventKind;
use crate::table::InvalidTable;
use thiserror::Error;

/// Errors the engine reports to callers.
///
/// Rejected transitions are not errors; they come back as an
/// [`Effect`](crate::core::Effect) with a rejected outcome.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    UnknownEventKind(#[from] UnknownEventKind),

    #[error("No workflow instance with id '{0}'")]
    UnknownInstance(String),

    #[error(transparent)]
    InvalidTable(#[from] InvalidTable),
}
