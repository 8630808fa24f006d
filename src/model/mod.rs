//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors. The
//! bounded ledger lives here too; it never touches storage or the network.

pub mod chat_entry;
pub mod citation;
pub mod course;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod ledger;
pub mod message;

// Re-export for convenience
pub use chat_entry::ChatEntry;
pub use citation::{dedup_sources, Citation, Source};
pub use course::{CourseStats, CourseStatsState};
pub use error::{AppError, BridgeError, LedgerError, StoreError};
pub use identifiers::{EntryId, InvalidSessionId, SessionId};
pub use key_action::KeyAction;
pub use ledger::{Ledger, DEFAULT_CAPACITY};
pub use message::{ChatMessage, Role, WELCOME_TEXT};
