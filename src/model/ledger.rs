//! Bounded chat ledger (pure).
//!
//! A fixed-capacity, recency-ordered list of [`ChatEntry`] values plus the
//! bookkeeping that survives evictions:
//!
//! - `next_display_id` feeds `"Chat {n}"` titles and never goes backwards,
//!   so titles stay unique even though indices are reused.
//! - `last_entry_id` is the newest id ever issued. Fresh ids are strictly
//!   greater, so an evicted entry's id is never handed out again.
//! - Two index pointers: `edited` (the entry transcript snapshots are saved
//!   into) and `highlighted` (the entry marked in the history list). Every
//!   mutation keeps both valid; eviction rebases them.
//!
//! Persistence lives in [`crate::store`]; this type never touches storage.

use super::chat_entry::ChatEntry;
use super::error::LedgerError;
use super::identifiers::{EntryId, SessionId};
use super::message::ChatMessage;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Number of chats kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 3;

/// First value of the display-id counter.
pub const FIRST_DISPLAY_ID: u64 = 1;

/// Largest entry id accepted from storage. Leaves room for every later id.
pub const MAX_ENTRY_ID: i64 = i64::MAX / 2;

/// Bounded, ordered collection of chat entries. Newest last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<ChatEntry>,
    capacity: usize,
    next_display_id: u64,
    last_entry_id: Option<i64>,
    edited: Option<usize>,
    highlighted: Option<usize>,
}

impl Ledger {
    /// Create an empty ledger. Capacity is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            next_display_id: FIRST_DISPLAY_ID,
            last_entry_id: None,
            edited: None,
            highlighted: None,
        }
    }

    /// Rebuild a ledger from restored parts.
    ///
    /// Drops entries whose id exceeds [`MAX_ENTRY_ID`], keeps only the
    /// newest `capacity` of the rest and raises the counter past any
    /// `Chat n` title still present. Nothing is selected afterwards.
    pub fn from_parts(mut entries: Vec<ChatEntry>, next_display_id: u64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let before = entries.len();
        entries.retain(|e| e.id.get() <= MAX_ENTRY_ID);
        if entries.len() < before {
            warn!(
                dropped = before - entries.len(),
                "Dropping restored entries with out-of-range ids"
            );
        }
        let last_entry_id = entries.iter().map(|e| e.id.get()).max();
        if entries.len() > capacity {
            let excess = entries.len() - capacity;
            debug!(excess, capacity, "Dropping restored entries beyond capacity");
            entries.drain(..excess);
        }

        let floor = entries
            .iter()
            .filter_map(ChatEntry::display_id)
            .max()
            .map_or(FIRST_DISPLAY_ID, |n| n.saturating_add(1));

        Self {
            entries,
            capacity,
            next_display_id: next_display_id.max(floor),
            last_entry_id,
            edited: None,
            highlighted: None,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&ChatEntry> {
        self.entries.get(index)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Display number the next created entry will receive.
    pub fn next_display_id(&self) -> u64 {
        self.next_display_id
    }

    /// Index of the entry transcript snapshots are saved into.
    pub fn edited(&self) -> Option<usize> {
        self.edited
    }

    /// Index of the entry marked in the history list.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The entry being edited, if any.
    pub fn edited_entry(&self) -> Option<&ChatEntry> {
        self.edited.and_then(|i| self.entries.get(i))
    }

    /// Current index of the entry with `id`.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Mutable access to the entry with `id`, wherever it currently sits.
    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut ChatEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Append a fresh entry and make it the edited one.
    ///
    /// When the ledger is full the oldest entry (index 0) is evicted first
    /// and both pointers are rebased. The title comes from the display-id
    /// counter, which is then incremented.
    pub fn create_entry(&mut self, now: DateTime<Utc>) -> &ChatEntry {
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let id = self.fresh_entry_id(now);
        self.last_entry_id = Some(id.get());
        let entry = ChatEntry::new(id, self.next_display_id, now);
        debug!(id = %entry.id, title = %entry.title, "Created chat entry");

        self.entries.push(entry);
        self.next_display_id = self.next_display_id.saturating_add(1);
        let index = self.entries.len() - 1;
        self.edited = Some(index);
        &self.entries[index]
    }

    /// Save the live transcript and session into the edited entry.
    ///
    /// Returns `false` (and changes nothing) when no entry is being edited.
    pub fn snapshot_edited(&mut self, messages: &[ChatMessage], session: Option<&SessionId>) -> bool {
        let Some(entry) = self.edited.and_then(|i| self.entries.get_mut(i)) else {
            return false;
        };
        entry.messages = messages.to_vec();
        entry.session_id = session.cloned();
        true
    }

    /// Snapshot the edited entry, then point both pointers at `index`.
    ///
    /// An out-of-range index is rejected before anything is modified.
    pub fn switch_to(
        &mut self,
        index: usize,
        live: &[ChatMessage],
        session: Option<&SessionId>,
    ) -> Result<&ChatEntry, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        self.snapshot_edited(live, session);
        self.edited = Some(index);
        self.highlighted = Some(index);
        Ok(&self.entries[index])
    }

    /// Mark the edited entry as the highlighted one.
    pub fn highlight_edited(&mut self) {
        self.highlighted = self.edited;
    }

    /// Remove index 0 and shift both pointers down by one.
    fn evict_oldest(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let evicted = self.entries.remove(0);
        debug!(id = %evicted.id, title = %evicted.title, "Evicted oldest chat entry");
        self.edited = rebase_after_eviction(self.edited);
        self.highlighted = rebase_after_eviction(self.highlighted);
    }

    /// Creation-time id strictly newer than every id issued so far,
    /// including those of evicted entries.
    fn fresh_entry_id(&self, now: DateTime<Utc>) -> EntryId {
        let candidate = now.timestamp_millis();
        match self.last_entry_id {
            Some(last) => EntryId::new(candidate.max(last.saturating_add(1))),
            None => EntryId::new(candidate),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Pointer adjustment for removal of index 0.
fn rebase_after_eviction(pointer: Option<usize>) -> Option<usize> {
    match pointer {
        Some(i) if i > 0 => Some(i - 1),
        _ => None,
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
