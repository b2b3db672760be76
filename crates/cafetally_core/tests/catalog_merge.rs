use cafetally_core::db::open_db_in_memory;
use cafetally_core::{
    aggregate_totals, parse_recipes_csv, parse_recipes_json, Catalog, InventoryService, Ledger,
    RecordRejection, SqliteSlotStore,
};

const MENU_CSV: &str = "name,category,ingredient,unit,qty
Latte,Coffee,Espresso,shot,1
Latte,Coffee,Milk,ml,220
Americano,Coffee,Espresso,shot,1
Americano,Coffee,Water,ml,120
,Coffee,Sugar,g,8
Mocha,Coffee,,g,8
Trà Đào,Tea,Peach syrup,ml,20";

fn field_snapshot(catalog: &Catalog) -> Vec<(String, String, String, usize)> {
    let mut rows = catalog
        .recipes()
        .iter()
        .map(|recipe| {
            (
                recipe.id.clone(),
                recipe.name.clone(),
                recipe.category.clone(),
                recipe.ingredients.len(),
            )
        })
        .collect::<Vec<_>>();
    rows.sort();
    rows
}

#[test]
fn csv_import_merges_into_empty_catalog() {
    let import = parse_recipes_csv(MENU_CSV);
    assert_eq!(import.rows_skipped, 2);

    let mut catalog = Catalog::new();
    let report = catalog.merge_records(import.records);

    assert_eq!(report.inserted, vec!["latte", "americano", "tra-dao"]);
    assert!(report.updated.is_empty());
    assert!(report.rejected.is_empty());
    assert_eq!(catalog.get("tra-dao").map(|r| r.name.as_str()), Some("Trà Đào"));
}

#[test]
fn merging_the_same_records_twice_is_idempotent() {
    let mut once = Catalog::new();
    once.merge_records(parse_recipes_csv(MENU_CSV).records);

    let mut twice = Catalog::new();
    twice.merge_records(parse_recipes_csv(MENU_CSV).records);
    let second = twice.merge_records(parse_recipes_csv(MENU_CSV).records);

    assert!(second.inserted.is_empty());
    assert_eq!(second.updated.len(), 3);
    assert_eq!(field_snapshot(&once), field_snapshot(&twice));
    assert_eq!(once, twice);
}

#[test]
fn existing_recipe_is_replaced_not_extended() {
    let mut catalog = Catalog::new();
    catalog.merge_records(parse_recipes_csv(MENU_CSV).records);

    let update = parse_recipes_json(
        r#"[{ "name": "LATTE", "category": "Milk", "ingredients": [
                { "name": "Oat milk", "unit": "ml", "qty": 200 }
           ] }]"#,
    )
    .unwrap();
    let report = catalog.merge_records(update);

    assert_eq!(report.updated, vec!["latte"]);
    let latte = catalog.get("latte").unwrap();
    assert_eq!(latte.name, "LATTE");
    assert_eq!(latte.category, "Milk");
    assert_eq!(latte.ingredients.len(), 1);
    assert_eq!(latte.ingredients[0].name, "Oat milk");
    assert_eq!(catalog.len(), 3);
}

#[test]
fn explicit_id_matches_even_when_name_changes() {
    let mut catalog = Catalog::new();
    catalog.merge_records(parse_recipes_csv(MENU_CSV).records);

    let renamed = parse_recipes_json(
        r#"{ "recipes": [{ "id": "Americano", "name": "Long black",
             "ingredients": [{ "name": "Espresso", "unit": "shot", "qty": 2 }] }] }"#,
    )
    .unwrap();
    catalog.merge_records(renamed);

    let americano = catalog.get("americano").unwrap();
    assert_eq!(americano.name, "Long black");
    assert_eq!(americano.category, "Other");
    assert!(catalog.get("long-black").is_none());
}

#[test]
fn invalid_records_are_rejected_without_touching_catalog() {
    let mut catalog = Catalog::new();
    let records = parse_recipes_json(
        r#"[
            { "name": "   ", "ingredients": [{ "name": "Milk", "qty": 1 }] },
            { "name": "Ghost", "ingredients": [{ "name": "Air", "qty": 0 }] },
            { "name": "Tonic", "ingredients": [{ "name": "Tonic water", "unit": "ml", "qty": "150" }] }
        ]"#,
    )
    .unwrap();
    let report = catalog.merge_records(records);

    assert_eq!(report.inserted, vec!["tonic"]);
    assert_eq!(
        report.rejected,
        vec![
            RecordRejection::MissingName,
            RecordRejection::NoIngredients {
                name: "Ghost".to_string()
            },
        ]
    );
    assert_eq!(catalog.len(), 1);
}

#[test]
fn names_without_alphanumerics_share_the_empty_id_bucket() {
    let mut catalog = Catalog::new();
    let records = parse_recipes_json(
        r#"[
            { "name": "☕", "ingredients": [{ "name": "Coffee", "qty": 1 }] },
            { "name": "!!!", "ingredients": [{ "name": "Tea", "qty": 1 }] }
        ]"#,
    )
    .unwrap();
    let report = catalog.merge_records(records);

    assert_eq!(report.inserted, vec![""]);
    assert_eq!(report.updated, vec![""]);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("").unwrap().name, "!!!");
}

#[test]
fn zero_count_recipes_contribute_nothing() {
    let mut catalog = Catalog::new();
    catalog.merge_records(parse_recipes_csv(MENU_CSV).records);

    let mut ledger = Ledger::new();
    ledger.increment("latte");
    ledger.decrement("latte");
    ledger.increment("tra-dao");

    let totals = aggregate_totals(&catalog, &ledger);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].ingredient_name, "Peach syrup");
    assert_eq!(totals[0].total, 20.0);
}

#[test]
fn same_ingredient_in_different_units_stays_separate() {
    let records = parse_recipes_csv(
        "Affogato,Dessert,Espresso,shot,1\n\
         Affogato,Dessert,Espresso,ml,30\n\
         Affogato,Dessert,Gelato,g,80",
    )
    .records;
    let mut catalog = Catalog::new();
    catalog.merge_records(records);
    let mut ledger = Ledger::new();
    ledger.increment("affogato");
    ledger.increment("affogato");

    let totals = aggregate_totals(&catalog, &ledger)
        .into_iter()
        .map(|total| (total.ingredient_name, total.unit, total.total))
        .collect::<Vec<_>>();
    assert_eq!(
        totals,
        vec![
            ("Gelato".to_string(), "g".to_string(), 160.0),
            ("Espresso".to_string(), "ml".to_string(), 60.0),
            ("Espresso".to_string(), "shot".to_string(), 2.0),
        ]
    );
}

#[test]
fn service_merge_persists_catalog_once_per_batch() {
    let conn = open_db_in_memory().unwrap();
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));

    let report = service
        .merge_records(parse_recipes_csv(MENU_CSV).records)
        .unwrap();
    assert!(report.inserted.is_empty());
    assert_eq!(report.updated, vec!["latte", "americano", "tra-dao"]);

    let reloaded = InventoryService::load(SqliteSlotStore::new(&conn));
    assert_eq!(reloaded.recipe_count(), 6);
    assert_eq!(
        reloaded.catalog().get("tra-dao").unwrap().ingredients[0].name,
        "Peach syrup"
    );
}
