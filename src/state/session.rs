//! Chat session: the single owner of conversation state.
//!
//! Event handlers receive a `&mut ChatSession`; nothing here is global.
//! Every mutation that changes what is stored (new chat, switch, applied
//! response) re-persists the ledger. Persistence failures are logged and
//! the session keeps running on in-memory state.

use crate::bridge::{Completion, QueryRequest, QueryResponse, QueryTarget, SessionBridge, Ticket};
use crate::model::{BridgeError, ChatMessage, EntryId, Ledger, LedgerError};
use crate::store::{self, KeyValueStore};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Conversation state for one run of the client.
#[derive(Debug)]
pub struct ChatSession {
    ledger: Ledger,
    bridge: SessionBridge,
    transcript: Vec<ChatMessage>,
    store: Box<dyn KeyValueStore>,
}

impl ChatSession {
    /// Restore the ledger from `store` and show the transient welcome
    /// conversation. No stored chat is selected.
    pub fn restore(store: Box<dyn KeyValueStore>, capacity: usize) -> Self {
        let ledger = store::restore(store.as_ref(), capacity);
        info!(
            chats = ledger.len(),
            capacity = ledger.capacity(),
            next_display_id = ledger.next_display_id(),
            "Chat session ready"
        );
        Self {
            ledger,
            bridge: SessionBridge::new(),
            transcript: vec![ChatMessage::welcome()],
            store,
        }
    }

    /// Stored chats and selection pointers.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Live transcript of the viewed conversation.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Session and in-flight state.
    pub fn bridge(&self) -> &SessionBridge {
        &self.bridge
    }

    /// Whether a query is outstanding.
    pub fn is_busy(&self) -> bool {
        self.bridge.is_busy()
    }

    /// Whether the transient initial conversation is on screen.
    pub fn is_transient(&self) -> bool {
        self.ledger.edited().is_none()
    }

    /// Save the viewed chat, open a fresh one and persist.
    ///
    /// Returns the new chat's id. A full ledger evicts its oldest chat.
    pub fn start_new_chat(&mut self) -> EntryId {
        let session = self.bridge.current_session().cloned();
        self.ledger.snapshot_edited(&self.transcript, session.as_ref());

        let id = self.ledger.create_entry(Utc::now()).id;
        self.ledger.highlight_edited();
        self.bridge.set_current_session(None);
        self.transcript = vec![ChatMessage::welcome()];
        self.persist();
        id
    }

    /// Save the viewed chat and show the chat at `index`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::IndexOutOfRange`] when `index` is not a stored chat.
    /// Nothing changes in that case.
    pub fn switch_to(&mut self, index: usize) -> Result<(), LedgerError> {
        let session = self.bridge.current_session().cloned();
        let entry = self
            .ledger
            .switch_to(index, &self.transcript, session.as_ref())?;

        self.transcript = if entry.messages.is_empty() {
            vec![ChatMessage::welcome()]
        } else {
            entry.messages.clone()
        };
        let session = entry.session_id.clone();
        debug!(index, title = %entry.title, "Switched chat");

        self.bridge.set_current_session(session);
        self.persist();
        Ok(())
    }

    /// Append the user's question and start a query for the viewed chat.
    ///
    /// Returns `None` for blank input or while a query is already in flight.
    pub fn submit(&mut self, text: &str) -> Option<(Ticket, QueryRequest)> {
        let target = match self.ledger.edited_entry() {
            Some(entry) => QueryTarget::Entry(entry.id),
            None => QueryTarget::Transient,
        };
        let (ticket, request) = self.bridge.begin_query(text, target)?;
        self.transcript.push(ChatMessage::user(request.query.clone()));
        Some((ticket, request))
    }

    /// Apply a finished query to the conversation it was sent from.
    ///
    /// Returns `true` when the viewed transcript changed.
    pub fn complete(&mut self, ticket: Ticket, result: Result<QueryResponse, BridgeError>) -> bool {
        let Some(completion) = self.bridge.finish_query(ticket, result) else {
            return false;
        };
        let Completion {
            target,
            message,
            adopted_session,
        } = completion;

        match target {
            QueryTarget::Transient => {
                if !self.is_transient() {
                    warn!("Dropping answer for abandoned initial conversation");
                    return false;
                }
                if adopted_session.is_some() {
                    self.bridge.set_current_session(adopted_session);
                }
                self.transcript.push(message);
                true
            }
            QueryTarget::Entry(id) => {
                let Some(position) = self.ledger.position_of(id) else {
                    warn!(id = %id, "Dropping answer for evicted chat");
                    return false;
                };

                let viewed = self.ledger.edited() == Some(position);
                if viewed {
                    if adopted_session.is_some() {
                        self.bridge.set_current_session(adopted_session);
                    }
                    self.transcript.push(message);
                    let session = self.bridge.current_session().cloned();
                    self.ledger.snapshot_edited(&self.transcript, session.as_ref());
                } else if let Some(entry) = self.ledger.entry_mut(id) {
                    debug!(id = %id, title = %entry.title, "Applying answer to background chat");
                    entry.messages.push(message);
                    if entry.session_id.is_none() {
                        entry.session_id = adopted_session;
                    }
                }
                self.persist();
                viewed
            }
        }
    }

    /// Write the ledger to the store. Failures are logged, not returned.
    pub fn persist(&mut self) {
        if let Err(err) = store::persist(&self.ledger, self.store.as_mut()) {
            warn!(error = %err, "Failed to persist chat history");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
