//! Error types for coursechat.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level startup/runtime error returned from `main`
//!   - [`ConfigError`](crate::config::ConfigError) - Invalid or unreadable config file
//!   - [`LoggingError`](crate::logging::LoggingError) - Log file setup failures
//!   - [`BridgeError`] - HTTP client could not be built
//!   - `std::io::Error` - Terminal/TUI failures
//! - [`BridgeError`] - A query or course-stats request failed
//! - [`StoreError`] - Durable key-value storage failed
//! - [`LedgerError`] - Rejected ledger operation
//!
//! # Error Recovery Strategy
//!
//! Only [`AppError`] is fatal. Everything else degrades gracefully:
//!
//! - **BridgeError**: rendered as an inline `Error: ...` assistant message, input
//!   is re-enabled, the user resends manually. No retries.
//! - **StoreError** while restoring: treated as absent state (empty ledger).
//!   While persisting: logged, the UI keeps working on in-memory state.
//! - **LedgerError**: the operation is rejected with no state change.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Covers failures that stop the program: bad configuration, logging setup,
/// client construction and terminal I/O. Failed queries and storage errors
/// never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The HTTP client could not be built.
    #[error("Backend client error: {0}")]
    Backend(#[from] BridgeError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot function; the shell restores
    /// the terminal and exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures talking to the backend.
///
/// The `Display` text is what the user sees after the `Error: ` prefix.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Network unreachable, connection reset, or the client could not be built.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Query failed (HTTP {status})")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// The backend answered 2xx but the body had the wrong shape.
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a stored value failed.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        /// File backing the key.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value exists but does not parse.
    #[error("Malformed persisted state under '{key}': {reason}")]
    MalformedState {
        /// Storage key.
        key: &'static str,
        /// Parse failure details.
        reason: String,
    },

    /// Serializing a value for storage failed.
    #[error("Failed to serialize '{key}': {reason}")]
    Serialize {
        /// Storage key.
        key: &'static str,
        /// Serializer error details.
        reason: String,
    },
}

/// Rejected ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Switch target does not exist.
    #[error("Chat index {index} out of range (ledger holds {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current number of entries.
        len: usize,
    },
}
