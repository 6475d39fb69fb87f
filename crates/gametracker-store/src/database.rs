//! Entry store over SQLite

use crate::{StoreError, User};
use gametracker_collection::{EntryDraft, GameEntry, new_entry_id};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Document store for one collection of game entries (plus user records)
pub struct EntryStore {
    conn: Connection,
}

impl EntryStore {
    /// Open or create a store database
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                platform TEXT,
                genre TEXT,
                cover_url TEXT,
                rating INTEGER NOT NULL DEFAULT 0,
                hours_played REAL NOT NULL DEFAULT 0,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                nombre TEXT,
                email TEXT,
                edad INTEGER,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_entries_genre ON entries(genre);
        "#,
        )?;

        Ok(())
    }

    /// Persist a new entry, assigning an id when the draft carries none
    ///
    /// A caller-provided id is honored as-is (the collection layer mints
    /// ids for entries created before they reach the store).
    pub fn create_entry(&self, draft: &EntryDraft) -> Result<GameEntry, StoreError> {
        let id = draft.id.clone().unwrap_or_else(new_entry_id);
        let entry = GameEntry::from_draft(id, draft);

        self.conn.execute(
            r#"INSERT INTO entries
               (id, title, platform, genre, cover_url, rating, hours_played, completed)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
            params![
                entry.id,
                entry.title,
                entry.platform,
                entry.genre,
                entry.cover_url,
                entry.rating,
                entry.hours_played,
                entry.completed,
            ],
        )?;

        tracing::debug!(id = %entry.id, "entry created");
        Ok(entry)
    }

    /// Get an entry by id
    pub fn get_entry(&self, id: &str) -> Result<Option<GameEntry>, StoreError> {
        let entry = self
            .conn
            .query_row(
                "SELECT * FROM entries WHERE id = ?1",
                params![id],
                Self::row_to_entry,
            )
            .optional()?;

        Ok(entry)
    }

    /// Get all entries, newest first, unfiltered and unpaginated
    pub fn list_entries(&self) -> Result<Vec<GameEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM entries ORDER BY rowid DESC")?;

        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Merge a draft into the stored entry and write it back
    ///
    /// Returns the merged entry, or `None` when the id matches nothing.
    /// Submitted fields win; omitted fields keep their stored value.
    pub fn update_entry(
        &self,
        id: &str,
        draft: &EntryDraft,
    ) -> Result<Option<GameEntry>, StoreError> {
        let Some(mut entry) = self.get_entry(id)? else {
            return Ok(None);
        };

        entry.apply(draft);

        self.conn.execute(
            r#"UPDATE entries
               SET title = ?1, platform = ?2, genre = ?3, cover_url = ?4,
                   rating = ?5, hours_played = ?6, completed = ?7,
                   updated_at = CURRENT_TIMESTAMP
               WHERE id = ?8"#,
            params![
                entry.title,
                entry.platform,
                entry.genre,
                entry.cover_url,
                entry.rating,
                entry.hours_played,
                entry.completed,
                entry.id,
            ],
        )?;

        Ok(Some(entry))
    }

    /// Delete an entry; returns whether a row was removed
    pub fn delete_entry(&self, id: &str) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Get total entry count
    pub fn entry_count(&self) -> Result<i64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Persist a user record, assigning an id
    pub fn create_user(&self, user: &User) -> Result<User, StoreError> {
        let mut stored = user.clone();
        stored.id = Some(user.id.clone().unwrap_or_else(new_entry_id));

        self.conn.execute(
            "INSERT INTO users (id, nombre, email, edad) VALUES (?1, ?2, ?3, ?4)",
            params![stored.id, stored.name, stored.email, stored.age],
        )?;

        Ok(stored)
    }

    /// Get all user records
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, nombre, email, edad FROM users ORDER BY rowid")?;

        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    age: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Convert a row to a GameEntry
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<GameEntry> {
        Ok(GameEntry {
            id: row.get("id")?,
            title: row.get("title")?,
            platform: row.get("platform")?,
            genre: row.get("genre")?,
            cover_url: row.get("cover_url")?,
            rating: row.get("rating")?,
            hours_played: row.get("hours_played")?,
            completed: row.get("completed")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> EntryDraft {
        EntryDraft {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_creation() {
        let store = EntryStore::in_memory().unwrap();
        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_create_assigns_id_when_absent() {
        let store = EntryStore::in_memory().unwrap();

        let created = store.create_entry(&draft("Celeste")).unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get_entry(&created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Celeste");
    }

    #[test]
    fn test_create_honors_provided_id() {
        let store = EntryStore::in_memory().unwrap();

        let created = store
            .create_entry(&EntryDraft {
                id: Some("local42".to_string()),
                ..draft("Hollow Knight")
            })
            .unwrap();

        assert_eq!(created.id, "local42");
        assert!(store.get_entry("local42").unwrap().is_some());
    }

    #[test]
    fn test_create_clamps_rating_and_hours() {
        let store = EntryStore::in_memory().unwrap();

        let created = store
            .create_entry(&EntryDraft {
                rating: Some(11),
                hours_played: Some(-3.0),
                ..draft("Broken Input")
            })
            .unwrap();

        assert_eq!(created.rating, 5);
        assert_eq!(created.hours_played, 0.0);
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = EntryStore::in_memory().unwrap();
        store.create_entry(&draft("First")).unwrap();
        store.create_entry(&draft("Second")).unwrap();

        let entries = store.list_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Second");
        assert_eq!(entries[1].title, "First");
    }

    #[test]
    fn test_update_merges_submitted_fields_only() {
        let store = EntryStore::in_memory().unwrap();
        let created = store
            .create_entry(&EntryDraft {
                genre: Some("RPG".to_string()),
                hours_played: Some(20.0),
                ..draft("Persona")
            })
            .unwrap();

        let updated = store
            .update_entry(
                &created.id,
                &EntryDraft {
                    hours_played: Some(35.0),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.hours_played, 35.0);
        assert_eq!(updated.title, "Persona");
        assert_eq!(updated.genre.as_deref(), Some("RPG"));

        let fetched = store.get_entry(&created.id).unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let store = EntryStore::in_memory().unwrap();
        let result = store.update_entry("ghost", &draft("X")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = EntryStore::in_memory().unwrap();
        let created = store.create_entry(&draft("Gone")).unwrap();

        assert!(store.delete_entry(&created.id).unwrap());
        assert!(!store.delete_entry(&created.id).unwrap());
        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_users_roundtrip() {
        let store = EntryStore::in_memory().unwrap();

        let stored = store
            .create_user(&User {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                age: Some(36),
                ..Default::default()
            })
            .unwrap();
        assert!(stored.id.is_some());

        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name.as_deref(), Some("Ada"));
        assert_eq!(users[0].age, Some(36));
    }
}
