//! Source citations attached to assistant answers.
//!
//! The backend reports sources either as bare labels or as `{text, link}`
//! objects. [`dedup_sources`] collapses them into the [`Citation`] list that is
//! rendered as badges and persisted with the message.

use serde::{Deserialize, Serialize};

/// A source as it arrives on the wire.
///
/// Untagged so both the old (plain string) and new (object) formats parse.
/// Anything else is kept verbatim and labelled by its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Plain label with no link.
    Label(String),
    /// Label with an optional link.
    Linked {
        /// Display label. Missing or empty falls back to the JSON text.
        #[serde(default)]
        text: Option<String>,
        /// Target URL.
        #[serde(default)]
        link: Option<String>,
    },
    /// Any other JSON value.
    Other(serde_json::Value),
}

impl Source {
    /// Display label used both for rendering and as the dedup key.
    pub fn label(&self) -> String {
        match self {
            Source::Label(label) => label.clone(),
            Source::Linked {
                text: Some(text), ..
            } if !text.is_empty() => text.clone(),
            Source::Linked { .. } | Source::Other(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// Link attached to this source, if it carries a usable label and URL.
    pub fn link(&self) -> Option<&str> {
        match self {
            Source::Linked {
                text: Some(text),
                link: Some(link),
            } if !text.is_empty() && !link.is_empty() => Some(link),
            _ => None,
        }
    }
}

/// A deduplicated citation ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Badge label.
    pub text: String,
    /// Clickable target; `None` renders a plain badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Citation {
    /// Whether this citation renders as a link badge.
    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }
}

/// Deduplicate sources by display label, first occurrence wins.
///
/// The link of the first occurrence is kept even when a later duplicate
/// carries a different one (or the first had none). Output preserves the
/// order in which labels first appeared.
pub fn dedup_sources(sources: &[Source]) -> Vec<Citation> {
    let mut citations: Vec<Citation> = Vec::with_capacity(sources.len());

    for source in sources {
        let text = source.label();
        if citations.iter().any(|c| c.text == text) {
            continue;
        }
        citations.push(Citation {
            text,
            link: source.link().map(str::to_string),
        });
    }

    citations
}
