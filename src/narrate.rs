//! Narration strategies.
//!
//! A [`Narrator`] turns an applied event into one human-readable line. The
//! engine holds one as configuration, and callers can swap in another for a
//! single call with
//! [`WorkflowEngine::apply_event_with`](crate::WorkflowEngine::apply_event_with).

use crate::core::{Event, EventKind, Outcome, Rejection, TicketState};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything a narrator may look at.
#[derive(Clone, Copy, Debug)]
pub struct NarrationContext<'a> {
    pub instance_id: &'a str,
    pub event: &'a Event,
    pub from: TicketState,
    pub to: TicketState,
    pub outcome: Outcome,
}

/// Function that renders a narration line.
pub type Narrator = Arc<dyn Fn(&NarrationContext<'_>) -> String + Send + Sync>;

/// Named narration strategies, selectable from configuration or the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum NarrationStyle {
    /// Full sentences, one per situation.
    #[default]
    Ticket,
    /// Event, outcome and state movement only.
    Terse,
}

impl NarrationStyle {
    pub fn narrator(self) -> Narrator {
        match self {
            Self::Ticket => Arc::new(ticket),
            Self::Terse => Arc::new(terse),
        }
    }
}

/// Full-sentence narration, e.g. `[#5678] Assigned to agent: Alice`.
///
/// The sentence is chosen from the outcome and the event kind together, so it
/// stays truthful when a custom table changes what a cell does.
pub fn ticket(ctx: &NarrationContext<'_>) -> String {
    let payload = ctx.event.payload.as_deref().unwrap_or("");
    let line = match ctx.outcome {
        Outcome::Accepted => accepted_sentence(ctx, payload),
        Outcome::Rejected(reason) => rejected_sentence(ctx, reason),
    };
    format!("[{}] {}", ctx.instance_id, line)
}

fn accepted_sentence(ctx: &NarrationContext<'_>, payload: &str) -> String {
    match ctx.event.kind {
        EventKind::AssignAgent if ctx.from == ctx.to => {
            "Already assigned. Agent can continue working.".to_string()
        }
        EventKind::AssignAgent => match ctx.event.payload.as_deref() {
            Some(agent) => format!("Assigned to agent: {agent}"),
            None => "Assigned to an agent.".to_string(),
        },
        EventKind::Reply => match ctx.from {
            TicketState::New => format!("Replying to customer and starting work: {payload}"),
            TicketState::Resolved | TicketState::Closed => {
                format!("Informing customer that ticket is already resolved: {payload}")
            }
            TicketState::InProgress => format!("Updating customer: {payload}"),
        },
        EventKind::Resolve => "Marking ticket as resolved.".to_string(),
        EventKind::Close => "Closing ticket.".to_string(),
    }
}

fn rejected_sentence(ctx: &NarrationContext<'_>, reason: Rejection) -> String {
    let kind = ctx.event.kind;
    match (reason, kind) {
        (Rejection::Closed, _) => format!("Ticket is closed. Cannot {}.", action(kind)),
        (Rejection::AlreadyClosed, _) => "Already closed.".to_string(),
        (Rejection::AlreadyResolved, EventKind::AssignAgent) => {
            "Already resolved. Reassign only if reopened.".to_string()
        }
        (Rejection::AlreadyResolved, _) => "Ticket already resolved.".to_string(),
        (Rejection::NotAssigned, EventKind::Resolve) => {
            "Can't resolve immediately. Assign and work on it first.".to_string()
        }
        (Rejection::NotAssigned, _) => {
            format!("Can't {} yet. Assign an agent first.", action(kind))
        }
        (Rejection::NotResolved, EventKind::Close) if ctx.from == TicketState::New => {
            "Can't close a new ticket directly. Resolve it first.".to_string()
        }
        (Rejection::NotResolved, EventKind::Close) => {
            "Cannot close directly. Resolve it first.".to_string()
        }
        (Rejection::NotResolved, _) => {
            format!("Can't {} yet. Resolve it first.", action(kind))
        }
    }
}

fn action(kind: EventKind) -> &'static str {
    match kind {
        EventKind::AssignAgent => "assign a new agent",
        EventKind::Reply => "reply",
        EventKind::Resolve => "resolve",
        EventKind::Close => "close",
    }
}

/// One-line machine-friendly narration, e.g.
/// `[T1] AssignAgent: accepted (New -> InProgress)`.
pub fn terse(ctx: &NarrationContext<'_>) -> String {
    format!(
        "[{}] {}: {} ({} -> {})",
        ctx.instance_id, ctx.event.kind, ctx.outcome, ctx.from, ctx.to
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        event: &'a Event,
        from: TicketState,
        to: TicketState,
        outcome: Outcome,
    ) -> NarrationContext<'a> {
        NarrationContext {
            instance_id: "#5678",
            event,
            from,
            to,
            outcome,
        }
    }

    #[test]
    fn ticket_narrates_assignment_with_agent() {
        let event = Event::assign_agent("Alice");
        let line = ticket(&ctx(
            &event,
            TicketState::New,
            TicketState::InProgress,
            Outcome::Accepted,
        ));
        assert_eq!(line, "[#5678] Assigned to agent: Alice");
    }

    #[test]
    fn ticket_narrates_reply_by_starting_state() {
        let event = Event::reply("We are investigating your login issue.");
        let started = ticket(&ctx(
            &event,
            TicketState::New,
            TicketState::InProgress,
            Outcome::Accepted,
        ));
        let updated = ticket(&ctx(
            &event,
            TicketState::InProgress,
            TicketState::InProgress,
            Outcome::Accepted,
        ));
        let informed = ticket(&ctx(
            &event,
            TicketState::Resolved,
            TicketState::Resolved,
            Outcome::Accepted,
        ));

        assert_eq!(
            started,
            "[#5678] Replying to customer and starting work: We are investigating your login issue."
        );
        assert_eq!(
            updated,
            "[#5678] Updating customer: We are investigating your login issue."
        );
        assert!(informed.contains("already resolved"));
    }

    #[test]
    fn ticket_narrates_rejections() {
        let close = Event::close();
        let reply = Event::reply("hello?");
        let assign = Event::assign_agent("Bob");

        assert_eq!(
            ticket(&ctx(
                &close,
                TicketState::Closed,
                TicketState::Closed,
                Outcome::Rejected(Rejection::AlreadyClosed)
            )),
            "[#5678] Already closed."
        );
        assert_eq!(
            ticket(&ctx(
                &reply,
                TicketState::Closed,
                TicketState::Closed,
                Outcome::Rejected(Rejection::Closed)
            )),
            "[#5678] Ticket is closed. Cannot reply."
        );
        assert_eq!(
            ticket(&ctx(
                &assign,
                TicketState::Resolved,
                TicketState::Resolved,
                Outcome::Rejected(Rejection::AlreadyResolved)
            )),
            "[#5678] Already resolved. Reassign only if reopened."
        );
        assert_eq!(
            ticket(&ctx(
                &close,
                TicketState::New,
                TicketState::New,
                Outcome::Rejected(Rejection::NotResolved)
            )),
            "[#5678] Can't close a new ticket directly. Resolve it first."
        );
    }

    #[test]
    fn ticket_rejections_name_the_attempted_action() {
        let reply = Event::reply("anyone there?");
        let assign = Event::assign_agent("Bob");

        assert_eq!(
            ticket(&ctx(
                &reply,
                TicketState::InProgress,
                TicketState::InProgress,
                Outcome::Rejected(Rejection::NotAssigned)
            )),
            "[#5678] Can't reply yet. Assign an agent first."
        );
        assert_eq!(
            ticket(&ctx(
                &assign,
                TicketState::InProgress,
                TicketState::InProgress,
                Outcome::Rejected(Rejection::NotResolved)
            )),
            "[#5678] Can't assign a new agent yet. Resolve it first."
        );
    }

    #[test]
    fn style_names_match_config_and_command_line() {
        for style in NarrationStyle::value_variants() {
            let name = style.to_possible_value().unwrap();
            let toml_name = serde_json::to_string(style).unwrap();
            assert_eq!(toml_name, format!("\"{}\"", name.get_name()));
        }
        assert_eq!(NarrationStyle::from_str("terse", false), Ok(NarrationStyle::Terse));
    }

    #[test]
    fn terse_shows_outcome_and_movement() {
        let event = Event::resolve();
        let line = terse(&ctx(
            &event,
            TicketState::New,
            TicketState::New,
            Outcome::Rejected(Rejection::NotAssigned),
        ));
        assert_eq!(line, "[#5678] Resolve: rejected: not yet assigned (New -> New)");
    }

    #[test]
    fn style_selects_strategy() {
        let event = Event::close();
        let context = ctx(&event, TicketState::Resolved, TicketState::Closed, Outcome::Accepted);

        assert_eq!((NarrationStyle::Ticket.narrator())(&context), "[#5678] Closing ticket.");
        assert_eq!(
            (NarrationStyle::Terse.narrator())(&context),
            "[#5678] Close: accepted (Resolved -> Closed)"
        );
        assert_eq!(NarrationStyle::default(), NarrationStyle::Ticket);
    }
}
