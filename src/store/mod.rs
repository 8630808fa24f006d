//! Durable key-value storage for the chat ledger (impure shell).
//!
//! The ledger is stored as two independent values:
//! - [`HISTORY_KEY`]: JSON array of [`ChatEntry`](crate::model::ChatEntry)
//! - [`COUNTER_KEY`]: the display-id counter as a decimal string
//!
//! The two writes are not atomic with respect to each other. Restoring
//! never fails: absent or malformed values fall back to an empty ledger and
//! a counter of 1.

use crate::model::{ChatEntry, Ledger, StoreError};
use tracing::{debug, warn};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the serialized entry list.
pub const HISTORY_KEY: &str = "chatHistory";

/// Storage key holding the display-id counter.
pub const COUNTER_KEY: &str = "nextChatId";

/// Synchronous string key-value store.
///
/// Reads and writes block the caller. Implementations must treat a missing
/// key as `Ok(None)`, not as an error.
pub trait KeyValueStore: std::fmt::Debug + Send {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Write the ledger's entries and counter as two independent values.
///
/// # Errors
///
/// Returns the first serialization or storage failure. The entry list is
/// written before the counter, so a failure can leave them out of step.
pub fn persist(ledger: &Ledger, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    let history =
        serde_json::to_string(ledger.entries()).map_err(|e| StoreError::Serialize {
            key: HISTORY_KEY,
            reason: e.to_string(),
        })?;

    store.set(HISTORY_KEY, &history)?;
    store.set(COUNTER_KEY, &ledger.next_display_id().to_string())?;

    debug!(
        entries = ledger.len(),
        next_display_id = ledger.next_display_id(),
        "Persisted chat ledger"
    );
    Ok(())
}

/// Rebuild the ledger from storage.
///
/// Absent values mean a first run. Unreadable or malformed values are
/// logged and treated as absent. Nothing is selected in the result.
pub fn restore(store: &dyn KeyValueStore, capacity: usize) -> Ledger {
    let entries = load_entries(store).unwrap_or_else(|err| {
        warn!(error = %err, "Discarding stored chat history");
        Vec::new()
    });
    let counter = load_counter(store).unwrap_or_else(|err| {
        warn!(error = %err, "Discarding stored chat counter");
        None
    });

    let ledger = Ledger::from_parts(
        entries,
        counter.unwrap_or(crate::model::ledger::FIRST_DISPLAY_ID),
        capacity,
    );
    debug!(
        entries = ledger.len(),
        next_display_id = ledger.next_display_id(),
        "Restored chat ledger"
    );
    ledger
}

fn load_entries(store: &dyn KeyValueStore) -> Result<Vec<ChatEntry>, StoreError> {
    let Some(raw) = store.get(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|e| StoreError::MalformedState {
        key: HISTORY_KEY,
        reason: e.to_string(),
    })
}

fn load_counter(store: &dyn KeyValueStore) -> Result<Option<u64>, StoreError> {
    let Some(raw) = store.get(COUNTER_KEY)? else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| StoreError::MalformedState {
            key: COUNTER_KEY,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChatMessage, Citation, SessionId};
    use chrono::{TimeZone, Utc};

    fn ledger_with_two_entries_and_counter_four() -> Ledger {
        let mut ledger = Ledger::new(3);
        ledger.create_entry(Utc.timestamp_millis_opt(1_000).unwrap());
        ledger.create_entry(Utc.timestamp_millis_opt(2_000).unwrap());
        ledger.create_entry(Utc.timestamp_millis_opt(3_000).unwrap());
        // Shrink to two entries while keeping counter at 4.
        let kept = ledger.entries()[1..].to_vec();
        let mut ledger = Ledger::from_parts(kept, 4, 3);
        ledger.switch_to(0, &[], None).unwrap();
        ledger.snapshot_edited(
            &[
                ChatMessage::user("What is RAG?"),
                ChatMessage::assistant(
                    "Retrieval augmented generation.",
                    vec![Citation {
                        text: "Course 1 - Lesson 2".to_string(),
                        link: Some("https://example.com/l2".to_string()),
                    }],
                ),
            ],
            Some(&SessionId::new("s1").unwrap()),
        );
        ledger
    }

    #[test]
    fn persist_then_restore_reproduces_entries_and_counter() {
        let original = ledger_with_two_entries_and_counter_four();
        let mut store = MemoryStore::new();

        persist(&original, &mut store).unwrap();
        let restored = restore(&store, 3);

        assert_eq!(restored.entries(), original.entries());
        assert_eq!(restored.next_display_id(), 4);
    }

    #[test]
    fn restore_does_not_select_any_entry() {
        let mut store = MemoryStore::new();
        persist(&ledger_with_two_entries_and_counter_four(), &mut store).unwrap();

        let restored = restore(&store, 3);

        assert_eq!(restored.edited(), None);
        assert_eq!(restored.highlighted(), None);
    }

    #[test]
    fn counter_is_stored_as_decimal_string() {
        let mut store = MemoryStore::new();
        persist(&ledger_with_two_entries_and_counter_four(), &mut store).unwrap();
        insta::assert_snapshot!(store.get(COUNTER_KEY).unwrap().unwrap(), @"4");
    }

    #[test]
    fn restore_from_empty_store_is_fresh_ledger() {
        let restored = restore(&MemoryStore::new(), 3);
        assert!(restored.is_empty());
        assert_eq!(restored.next_display_id(), 1);
    }

    #[test]
    fn restore_from_corrupted_store_is_fresh_ledger() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        store.set(COUNTER_KEY, "seven").unwrap();

        let restored = restore(&store, 3);

        assert!(restored.is_empty());
        assert_eq!(restored.next_display_id(), 1);
    }

    #[test]
    fn restore_with_wrong_shape_history_is_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"{"title":"Chat 1"}"#).unwrap();

        assert!(restore(&store, 3).is_empty());
    }

    #[test]
    fn restore_keeps_valid_history_when_only_counter_is_corrupt() {
        let mut store = MemoryStore::new();
        persist(&ledger_with_two_entries_and_counter_four(), &mut store).unwrap();
        store.set(COUNTER_KEY, "").unwrap();

        let restored = restore(&store, 3);

        assert_eq!(restored.len(), 2);
        // Titles "Chat 2" and "Chat 3" survive, so the counter moves past them.
        assert_eq!(restored.next_display_id(), 4);
    }

    #[test]
    fn counter_tolerates_surrounding_whitespace() {
        let mut store = MemoryStore::new();
        store.set(COUNTER_KEY, " 9\n").unwrap();
        assert_eq!(restore(&store, 3).next_display_id(), 9);
    }
}
