use cafetally_core::db::{open_db, open_db_in_memory};
use cafetally_core::{Slot, SlotStore, SqliteSlotStore};

#[test]
fn load_of_unwritten_slot_is_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSlotStore::new(&conn);

    assert_eq!(store.load(Slot::Recipes).unwrap(), None);
    assert_eq!(store.load(Slot::Counts).unwrap(), None);
}

#[test]
fn save_replaces_previous_value_and_keeps_slots_separate() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSlotStore::new(&conn);

    store.save(Slot::Counts, r#"{"latte":1}"#).unwrap();
    store.save(Slot::Counts, r#"{"latte":2}"#).unwrap();
    store.save(Slot::Recipes, "[]").unwrap();

    assert_eq!(
        store.load(Slot::Counts).unwrap().as_deref(),
        Some(r#"{"latte":2}"#)
    );
    assert_eq!(store.load(Slot::Recipes).unwrap().as_deref(), Some("[]"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn values_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteSlotStore::new(&conn)
            .save(Slot::Counts, r#"{"espresso":4}"#)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteSlotStore::new(&conn);
    assert_eq!(
        store.load(Slot::Counts).unwrap().as_deref(),
        Some(r#"{"espresso":4}"#)
    );
}

#[test]
fn slot_keys_are_stable() {
    assert_eq!(Slot::Recipes.key(), "cafe_recipes_v1");
    assert_eq!(Slot::Counts.key(), "cafe_counts_v1");
}
