//! Session bridge: the client side of the backend conversation.
//!
//! Tracks which backend session new questions continue, enforces the single
//! in-flight request, and turns finished requests into transcript messages.
//!
//! Every request is tagged at send time with the [`QueryTarget`] it belongs
//! to. Completion reports that target back, so the caller applies the answer
//! to the conversation the question was asked in, even if the user has
//! switched chats in the meantime.

use crate::model::{dedup_sources, BridgeError, ChatMessage, EntryId, SessionId};
use tracing::{debug, warn};

pub mod client;
pub mod worker;

pub use client::{ChatApi, HttpChatApi, QueryRequest, QueryResponse};
pub use worker::{BridgeEvent, Worker};

/// Identifies one in-flight query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw ticket number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Conversation a query was sent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTarget {
    /// The unsaved conversation shown before any chat is created.
    Transient,
    /// A stored chat, addressed by its stable id.
    Entry(EntryId),
}

/// Bookkeeping for the outstanding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    /// Ticket handed to the worker.
    pub ticket: Ticket,
    /// Conversation the question was asked in.
    pub target: QueryTarget,
    /// Session the request continued (`None` asks the backend for a new one).
    pub sent_session: Option<SessionId>,
}

/// A finished query, ready to be applied to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Conversation the answer belongs to.
    pub target: QueryTarget,
    /// Answer (with deduplicated citations) or inline error.
    pub message: ChatMessage,
    /// Session the target should adopt. Only set when the request was sent
    /// without a session and succeeded.
    pub adopted_session: Option<SessionId>,
}

/// Client-side view of the backend conversation.
#[derive(Debug, Clone, Default)]
pub struct SessionBridge {
    current_session: Option<SessionId>,
    pending: Option<PendingQuery>,
    next_ticket: u64,
}

impl SessionBridge {
    /// Bridge with no session and nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session the next question continues.
    pub fn current_session(&self) -> Option<&SessionId> {
        self.current_session.as_ref()
    }

    /// Replace the session (chat switch, new chat).
    pub fn set_current_session(&mut self, session: Option<SessionId>) {
        self.current_session = session;
    }

    /// Whether a request is outstanding. Input stays disabled while true.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding request, if any.
    pub fn pending(&self) -> Option<&PendingQuery> {
        self.pending.as_ref()
    }

    /// Start a query for `target`.
    ///
    /// Returns `None` for blank input or while another request is in flight;
    /// the shell never offers a send affordance in either case, so this is a
    /// guard, not an error path.
    pub fn begin_query(&mut self, text: &str, target: QueryTarget) -> Option<(Ticket, QueryRequest)> {
        let query = text.trim();
        if query.is_empty() || self.is_busy() {
            return None;
        }

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let sent_session = self.current_session.clone();
        debug!(ticket = ticket.0, ?target, has_session = sent_session.is_some(), "Query started");

        self.pending = Some(PendingQuery {
            ticket,
            target,
            sent_session: sent_session.clone(),
        });

        Some((
            ticket,
            QueryRequest {
                query: query.to_string(),
                session_id: sent_session,
            },
        ))
    }

    /// Resolve the outstanding request.
    ///
    /// Returns `None` if `ticket` does not match the pending request (the
    /// result is stale and ignored). Failures become `Error: ...` messages.
    pub fn finish_query(
        &mut self,
        ticket: Ticket,
        result: Result<QueryResponse, BridgeError>,
    ) -> Option<Completion> {
        if self.pending.as_ref().map(|p| p.ticket) != Some(ticket) {
            warn!(ticket = ticket.0, "Ignoring result for unknown query");
            return None;
        }
        let pending = self.pending.take()?;

        let completion = match result {
            Ok(response) => Completion {
                target: pending.target,
                message: ChatMessage::assistant(response.answer, dedup_sources(&response.sources)),
                adopted_session: match pending.sent_session {
                    None => Some(response.session_id),
                    Some(_) => None,
                },
            },
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "Query failed");
                Completion {
                    target: pending.target,
                    message: ChatMessage::error(&err),
                    adopted_session: None,
                }
            }
        };
        Some(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Citation, Role, Source};

    fn response(session: &str, answer: &str, sources: Vec<Source>) -> QueryResponse {
        QueryResponse {
            session_id: SessionId::new(session).unwrap(),
            answer: answer.to_string(),
            sources,
        }
    }

    #[test]
    fn blank_input_does_not_start_a_query() {
        let mut bridge = SessionBridge::new();
        assert!(bridge.begin_query("   \n", QueryTarget::Transient).is_none());
        assert!(!bridge.is_busy());
    }

    #[test]
    fn begin_query_trims_and_marks_busy() {
        let mut bridge = SessionBridge::new();

        let (_, request) = bridge.begin_query("  hello  ", QueryTarget::Transient).unwrap();

        assert_eq!(request.query, "hello");
        assert_eq!(request.session_id, None);
        assert!(bridge.is_busy());
    }

    #[test]
    fn second_query_while_busy_is_refused() {
        let mut bridge = SessionBridge::new();
        bridge.begin_query("first", QueryTarget::Transient).unwrap();

        assert!(bridge.begin_query("second", QueryTarget::Transient).is_none());
    }

    #[test]
    fn success_without_session_adopts_returned_id() {
        let mut bridge = SessionBridge::new();
        let (ticket, _) = bridge.begin_query("q", QueryTarget::Transient).unwrap();

        let done = bridge
            .finish_query(ticket, Ok(response("s1", "answer", vec![])))
            .unwrap();

        assert_eq!(done.adopted_session, Some(SessionId::new("s1").unwrap()));
        assert_eq!(done.message.role, Role::Assistant);
        assert!(!bridge.is_busy());
    }

    #[test]
    fn success_with_existing_session_adopts_nothing() {
        let mut bridge = SessionBridge::new();
        bridge.set_current_session(Some(SessionId::new("s1").unwrap()));
        let (ticket, request) = bridge.begin_query("q", QueryTarget::Transient).unwrap();
        assert_eq!(request.session_id.as_ref().map(SessionId::as_str), Some("s1"));

        let done = bridge
            .finish_query(ticket, Ok(response("other", "answer", vec![])))
            .unwrap();

        assert_eq!(done.adopted_session, None);
        assert_eq!(bridge.current_session().map(SessionId::as_str), Some("s1"));
    }

    #[test]
    fn answer_sources_are_deduplicated() {
        let mut bridge = SessionBridge::new();
        let (ticket, _) = bridge.begin_query("q", QueryTarget::Transient).unwrap();
        let sources: Vec<Source> =
            serde_json::from_str(r#"[{"text":"A","link":"x"},"A",{"text":"A","link":"y"}]"#)
                .unwrap();

        let done = bridge
            .finish_query(ticket, Ok(response("s1", "answer", sources)))
            .unwrap();

        assert_eq!(
            done.message.sources,
            vec![Citation {
                text: "A".to_string(),
                link: Some("x".to_string())
            }]
        );
    }

    #[test]
    fn failure_becomes_error_message_and_releases_input() {
        let mut bridge = SessionBridge::new();
        let target = QueryTarget::Entry(EntryId::new(7));
        let (ticket, _) = bridge.begin_query("q", target).unwrap();

        let done = bridge
            .finish_query(ticket, Err(BridgeError::Server { status: 502 }))
            .unwrap();

        assert_eq!(done.target, target);
        assert_eq!(done.message.content, "Error: Query failed (HTTP 502)");
        assert_eq!(done.adopted_session, None);
        assert!(!bridge.is_busy());
    }

    #[test]
    fn mismatched_ticket_is_ignored() {
        let mut bridge = SessionBridge::new();
        let (ticket, _) = bridge.begin_query("q", QueryTarget::Transient).unwrap();
        let stale = Ticket(ticket.get() + 100);

        assert!(bridge
            .finish_query(stale, Ok(response("s1", "a", vec![])))
            .is_none());
        assert!(bridge.is_busy(), "real request still pending");
    }

    #[test]
    fn tickets_increase() {
        let mut bridge = SessionBridge::new();
        let (first, _) = bridge.begin_query("a", QueryTarget::Transient).unwrap();
        bridge.finish_query(first, Err(BridgeError::Transport("x".into())));
        let (second, _) = bridge.begin_query("b", QueryTarget::Transient).unwrap();
        assert!(second.get() > first.get());
    }
}
