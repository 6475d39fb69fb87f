//! Game collection management for Gametracker
//!
//! Owns the in-memory list of tracked games for one session, applies
//! create/update/delete/toggle mutations with last-write-wins merge
//! semantics, and derives summary statistics from the full list.

mod collection;
mod entry;
mod stats;

pub use collection::Collection;
pub use entry::{EntryDraft, EntryId, GameEntry, MAX_RATING, new_entry_id};
pub use stats::{CollectionStats, derive_stats};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = new_entry_id();
        let b = new_entry_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
