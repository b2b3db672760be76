use cafetally_core::db::open_db_in_memory;
use cafetally_core::{
    export_totals_csv, parse_totals_csv, ImportError, ImportSource, InventoryService,
    SqliteSlotStore,
};
use std::fs;

#[test]
fn one_bad_file_does_not_abort_the_batch() {
    let conn = open_db_in_memory().unwrap();
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));

    let report = service
        .import_sources([
            ImportSource::from_text("broken.json", "{ nope"),
            ImportSource::from_text("menu.csv", "Mocha,Coffee,Cocoa,g,15"),
            ImportSource::from_text("notes.txt", "Mocha,Coffee,Cocoa,g,15"),
            ImportSource::from_text(
                "extra.json",
                r#"{"recipes":[{"name":"Matcha","category":"Tea","ingredients":[{"name":"Matcha","unit":"g","qty":3}]}]}"#,
            ),
        ])
        .unwrap();

    assert_eq!(report.files_imported, 2);
    let failed = report
        .failures
        .iter()
        .map(|failure| failure.file_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(failed, vec!["broken.json", "notes.txt"]);
    assert!(matches!(report.failures[0].error, ImportError::Json(_)));
    assert!(matches!(
        report.failures[1].error,
        ImportError::UnsupportedFormat(_)
    ));
    assert_eq!(report.merge.inserted, vec!["mocha", "matcha"]);
    assert_eq!(service.recipe_count(), 8);
}

#[test]
fn unreadable_file_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let present = dir.path().join("menu.csv");
    fs::write(&present, "name,category,ingredient,unit,qty\nMocha,Coffee,Cocoa,g,15\n").unwrap();

    let conn = open_db_in_memory().unwrap();
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));
    let report = service
        .import_sources([
            ImportSource::from_path(&missing),
            ImportSource::from_path(&present),
        ])
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file_name, missing.display().to_string());
    assert!(matches!(report.failures[0].error, ImportError::Read(_)));
    assert!(service.catalog().get("mocha").is_some());
}

// Sources are read up front and merged in argument order, never in
// read-completion order.
#[test]
fn later_files_win_when_they_define_the_same_recipe() {
    let conn = open_db_in_memory().unwrap();
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));

    service
        .import_sources([
            ImportSource::from_text("a.csv", "Mocha,Coffee,Cocoa,g,15"),
            ImportSource::from_text("b.csv", "Mocha,Dessert,Cocoa,g,20"),
        ])
        .unwrap();

    let mocha = service.catalog().get("mocha").unwrap();
    assert_eq!(mocha.category, "Dessert");
    assert_eq!(mocha.ingredients[0].quantity, 20.0);
}

#[test]
fn batch_with_only_failures_leaves_catalog_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));
    let before = service.catalog().clone();

    let report = service
        .import_sources([ImportSource::from_text("bad.json", r#"{"items":[]}"#)])
        .unwrap();

    assert_eq!(report.files_imported, 0);
    assert!(!report.merge.changed());
    assert_eq!(service.catalog(), &before);
}

#[test]
fn exported_totals_parse_back_to_the_same_triples() {
    let conn = open_db_in_memory().unwrap();
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));
    service.increment("latte").unwrap();
    service.increment("latte").unwrap();
    service.increment("americano").unwrap();
    service.increment("americano").unwrap();
    service.increment("americano").unwrap();

    let totals = service.totals();
    let parsed = parse_totals_csv(&export_totals_csv(&totals));
    assert_eq!(parsed, totals);
    assert!(parsed
        .iter()
        .any(|total| total.ingredient_name == "Espresso" && total.unit == "shot" && total.total == 5.0));
}
