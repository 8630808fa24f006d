//! Transcript messages.
//!
//! Messages are stored as structured data (role, raw text, citations) and
//! rendered on display. Nothing stored here is presentation markup.

use super::citation::Citation;
use serde::{Deserialize, Serialize};

/// Greeting shown in an empty conversation.
pub const WELCOME_TEXT: &str = "Welcome to the Course Materials Assistant! I can help you with questions about courses, lessons and specific content. What would you like to know?";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the user; displayed as literal text.
    User,
    /// Produced by the backend (or an inline error); displayed as markdown.
    Assistant,
}

/// One message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Author of the message.
    pub role: Role,
    /// Raw message text (markdown for assistant messages).
    pub content: String,
    /// Deduplicated citations, empty for user messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
    /// Marks the greeting inserted into empty conversations.
    #[serde(default)]
    pub is_welcome: bool,
    /// Marks an inline error report; shown literally in error style.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            is_welcome: false,
            is_error: false,
        }
    }

    /// An assistant answer with its citations.
    pub fn assistant(content: impl Into<String>, sources: Vec<Citation>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources,
            is_welcome: false,
            is_error: false,
        }
    }

    /// An inline error reported in assistant style.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(format!("Error: {message}"), Vec::new())
        }
    }

    /// The greeting for an empty conversation.
    pub fn welcome() -> Self {
        Self {
            is_welcome: true,
            ..Self::assistant(WELCOME_TEXT, Vec::new())
        }
    }
}
