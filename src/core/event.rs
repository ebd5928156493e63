//! Events that drive a workflow instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text that does not name any member of [`EventKind`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event kind '{0}' (expected one of: assign_agent, reply, resolve, close)")]
pub struct UnknownEventKind(pub String);

/// The closed set of things that can happen to a ticket.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AssignAgent,
    Reply,
    Resolve,
    Close,
}

impl EventKind {
    /// Every kind, in table column order.
    pub const ALL: &'static [Self] = &[Self::AssignAgent, Self::Reply, Self::Resolve, Self::Close];

    pub const COUNT: usize = Self::ALL.len();

    /// Column of this kind in a transition table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AssignAgent => "AssignAgent",
            Self::Reply => "Reply",
            Self::Resolve => "Resolve",
            Self::Close => "Close",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    /// Accepts `snake_case`, `kebab-case`, `PascalCase`, and the alias `assign`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "assignagent" | "assign" => Ok(Self::AssignAgent),
            "reply" => Ok(Self::Reply),
            "resolve" => Ok(Self::Resolve),
            "close" => Ok(Self::Close),
            _ => Err(UnknownEventKind(s.to_string())),
        }
    }
}

/// An event applied to a workflow instance.
///
/// The payload (agent name, message text) is carried through to narration
/// and the event log. It never decides which transition happens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn assign_agent(agent: impl Into<String>) -> Self {
        Self::new(EventKind::AssignAgent).with_payload(agent)
    }

    pub fn reply(message: impl Into<String>) -> Self {
        Self::new(EventKind::Reply).with_payload(message)
    }

    pub fn resolve() -> Self {
        Self::new(EventKind::Resolve)
    }

    pub fn close() -> Self {
        Self::new(EventKind::Close)
    }

    /// Parse the `kind[:payload]` form used on the command line.
    ///
    /// Only the first `:` separates the kind, so payloads may contain colons.
    /// An empty payload after the separator counts as no payload.
    ///
    /// ```rust
    /// use ticketflow::core::{Event, EventKind};
    ///
    /// let event = Event::parse("reply:See you at 10:30").unwrap();
    /// assert_eq!(event.kind, EventKind::Reply);
    /// assert_eq!(event.payload.as_deref(), Some("See you at 10:30"));
    ///
    /// assert!(Event::parse("reopen").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, UnknownEventKind> {
        let (kind, payload) = match text.split_once(':') {
            Some((kind, payload)) => (kind, Some(payload)),
            None => (text, None),
        };

        let event = Self::new(kind.parse()?);
        Ok(match payload.filter(|p| !p.is_empty()) {
            Some(payload) => event.with_payload(payload),
            None => event,
        })
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_every_spelling() {
        for text in ["assign_agent", "AssignAgent", "assign-agent", "assign", " ASSIGN "] {
            assert_eq!(text.parse::<EventKind>(), Ok(EventKind::AssignAgent), "{text}");
        }
        assert_eq!("Reply".parse::<EventKind>(), Ok(EventKind::Reply));
        assert_eq!("resolve".parse::<EventKind>(), Ok(EventKind::Resolve));
        assert_eq!("CLOSE".parse::<EventKind>(), Ok(EventKind::Close));
    }

    #[test]
    fn unknown_kind_keeps_input_text() {
        let err = "Reopen".parse::<EventKind>().unwrap_err();
        assert_eq!(err, UnknownEventKind("Reopen".to_string()));
        assert!(err.to_string().contains("'Reopen'"));
    }

    #[test]
    fn index_matches_all_order() {
        for (position, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
        assert_eq!(EventKind::COUNT, 4);
    }

    #[test]
    fn constructors_attach_payload() {
        assert_eq!(Event::assign_agent("Alice").payload.as_deref(), Some("Alice"));
        assert_eq!(Event::reply("hi").kind, EventKind::Reply);
        assert!(Event::resolve().payload.is_none());
        assert_eq!(Event::from(EventKind::Close), Event::close());
    }

    #[test]
    fn parse_splits_on_first_colon() {
        let event = Event::parse("assign:Alice").unwrap();
        assert_eq!(event, Event::assign_agent("Alice"));

        let event = Event::parse("reply:a:b").unwrap();
        assert_eq!(event.payload.as_deref(), Some("a:b"));

        let event = Event::parse("close:").unwrap();
        assert_eq!(event, Event::close());
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        assert_eq!(
            Event::parse("escalate:now"),
            Err(UnknownEventKind("escalate".to_string()))
        );
    }

    #[test]
    fn event_serializes_without_empty_payload() {
        let json = serde_json::to_string(&Event::resolve()).unwrap();
        assert_eq!(json, r#"{"kind":"resolve"}"#);
    }
}
