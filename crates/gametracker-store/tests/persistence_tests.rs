//! Integration tests for the on-disk entry store

use gametracker_collection::EntryDraft;
use gametracker_store::EntryStore;
use tempfile::TempDir;

#[test]
fn test_entries_survive_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("gametracker.db");

    let id = {
        let store = EntryStore::open(&db_path).unwrap();
        let created = store
            .create_entry(&EntryDraft {
                title: Some("Stardew Valley".to_string()),
                genre: Some("Simulation".to_string()),
                rating: Some(5),
                hours_played: Some(200.0),
                ..Default::default()
            })
            .unwrap();
        created.id
    };

    let store = EntryStore::open(&db_path).unwrap();
    let entries = store.list_entries().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].title, "Stardew Valley");
    assert_eq!(entries[0].genre.as_deref(), Some("Simulation"));
    assert_eq!(entries[0].hours_played, 200.0);
}

#[test]
fn test_mutations_survive_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("gametracker.db");

    let (kept, dropped) = {
        let store = EntryStore::open(&db_path).unwrap();
        let kept = store
            .create_entry(&EntryDraft {
                title: Some("Celeste".to_string()),
                ..Default::default()
            })
            .unwrap();
        let dropped = store
            .create_entry(&EntryDraft {
                title: Some("Abandoned".to_string()),
                ..Default::default()
            })
            .unwrap();

        store
            .update_entry(
                &kept.id,
                &EntryDraft {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        store.delete_entry(&dropped.id).unwrap();

        (kept.id, dropped.id)
    };

    let store = EntryStore::open(&db_path).unwrap();
    let entries = store.list_entries().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, kept);
    assert!(entries[0].completed);
    assert!(store.get_entry(&dropped).unwrap().is_none());
}
