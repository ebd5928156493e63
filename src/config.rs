//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file yields the
//! stock ticket engine.
//!
//! ```toml
//! narration = "terse"
//!
//! [[rules]]
//! state = "resolved"
//! event = "assign_agent"
//! next = "in_progress"
//! ```

use crate::core::{EventKind, Rejection, TicketState};
use crate::engine::WorkflowEngine;
use crate::narrate::NarrationStyle;
use crate::table::{InvalidTable, TableBuilder, TransitionRule, TransitionTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Rule for event {event} in state {state} must set exactly one of `next` or `reject`")]
    AmbiguousRule { state: TicketState, event: EventKind },

    #[error(transparent)]
    Table(#[from] InvalidTable),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Narration strategy
    pub narration: NarrationStyle,
    /// Overrides applied on top of the ticket table
    pub rules: Vec<RuleOverride>,
}

/// One overridden table cell.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverride {
    pub state: TicketState,
    pub event: EventKind,
    /// Accept and move here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<TicketState>,
    /// Reject for this reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject: Option<Rejection>,
}

impl RuleOverride {
    pub fn to_rule(&self) -> Result<TransitionRule, ConfigError> {
        match (self.next, self.reject) {
            (Some(next), None) => Ok(TransitionRule::accept(next)),
            (None, Some(reason)) => Ok(TransitionRule::reject(reason)),
            _ => Err(ConfigError::AmbiguousRule {
                state: self.state,
                event: self.event,
            }),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            overrides = config.rules.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    /// The ticket table with every override applied and validated.
    pub fn table(&self) -> Result<TransitionTable, ConfigError> {
        let mut builder = TableBuilder::from_table(&TransitionTable::ticket());
        for rule in &self.rules {
            builder = builder.rule(rule.state, rule.event, rule.to_rule()?);
        }
        Ok(builder.build()?)
    }
}

impl WorkflowEngine {
    /// Build an engine as described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let mut engine = Self::with_table(config.table()?);
        engine.set_narrator(config.narration.narrator());
        Ok(engine)
    }
}
