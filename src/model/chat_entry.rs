//! A single stored chat.

use super::identifiers::{EntryId, SessionId};
use super::message::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat's transcript, title and backend session binding.
///
/// Field names match the stored `chatHistory` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    /// Creation-time identifier, unique within the ledger.
    pub id: EntryId,
    /// `"Chat {n}"`, fixed at creation.
    pub title: String,
    /// Transcript snapshot.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Backend conversation, `None` until the first successful response.
    #[serde(default)]
    pub session_id: Option<SessionId>,
    /// Creation timestamp, informational only.
    pub created_at: DateTime<Utc>,
}

impl ChatEntry {
    /// Create an empty entry with the given display number.
    pub fn new(id: EntryId, display_id: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: format!("Chat {display_id}"),
            messages: Vec::new(),
            session_id: None,
            created_at,
        }
    }

    /// Display number parsed back out of the title, if it has the standard form.
    pub fn display_id(&self) -> Option<u64> {
        self.title.strip_prefix("Chat ")?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_titled_from_display_id() {
        let entry = ChatEntry::new(EntryId::new(1), 7, Utc::now());
        assert_eq!(entry.title, "Chat 7");
        assert_eq!(entry.display_id(), Some(7));
        assert!(entry.messages.is_empty());
        assert!(entry.session_id.is_none());
    }

    #[test]
    fn display_id_is_none_for_foreign_titles() {
        let mut entry = ChatEntry::new(EntryId::new(1), 1, Utc::now());
        entry.title = "Renamed".to_string();
        assert_eq!(entry.display_id(), None);
    }

    #[test]
    fn parses_stored_layout() {
        let json = r#"{
            "id": 1735120800000,
            "title": "Chat 2",
            "messages": [{"role":"user","content":"hi","isWelcome":false}],
            "sessionId": "s1",
            "createdAt": "2025-12-25T10:00:00Z"
        }"#;

        let entry: ChatEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id, EntryId::new(1_735_120_800_000));
        assert_eq!(entry.session_id.as_ref().map(SessionId::as_str), Some("s1"));
        assert_eq!(entry.messages.len(), 1);
    }

    #[test]
    fn null_session_id_loads_as_none() {
        let json = r#"{"id":1,"title":"Chat 1","messages":[],"sessionId":null,"createdAt":"2025-12-25T10:00:00Z"}"#;
        let entry: ChatEntry = serde_json::from_str(json).unwrap();
        assert!(entry.session_id.is_none());
    }
}
