//! Ordered entry collection with last-write-wins mutations

use crate::entry::{EntryDraft, EntryId, GameEntry, new_entry_id};
use crate::stats::{CollectionStats, derive_stats};

/// The in-memory entry list for one session
///
/// Insertion order is display order: new entries go to the front.
/// Mutations never fail; unknown ids are silent no-ops.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<GameEntry>,
}

impl Collection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from an already-ordered entry list
    pub fn from_entries(entries: Vec<GameEntry>) -> Self {
        Self { entries }
    }

    /// Current entry sequence, newest first
    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&GameEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the whole sequence (bulk load from the store)
    pub fn reset(&mut self, entries: Vec<GameEntry>) {
        self.entries = entries;
    }

    /// Insert or update from a partial entry
    ///
    /// A draft carrying the id of an existing entry merges into it field by
    /// field; submitted fields win. A draft without an id becomes a new
    /// entry with a locally generated id, prepended to the sequence. A
    /// draft whose id matches nothing is dropped silently.
    ///
    /// Returns the id the draft resolved to.
    pub fn upsert(&mut self, draft: EntryDraft) -> EntryId {
        match &draft.id {
            Some(id) => {
                if let Some(entry) = self.entries.iter_mut().find(|e| &e.id == id) {
                    entry.apply(&draft);
                }
                id.clone()
            }
            None => {
                let id = new_entry_id();
                self.entries.insert(0, GameEntry::from_draft(id.clone(), &draft));
                id
            }
        }
    }

    /// Remove the entry with the given id; no-op when absent
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
    }

    /// Flip the completed flag of the matching entry
    ///
    /// Returns the new value, or `None` when the id matches nothing.
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.completed = !entry.completed;
        Some(entry.completed)
    }

    /// Derived statistics over the current sequence
    pub fn stats(&self) -> CollectionStats {
        derive_stats(&self.entries)
    }
}
