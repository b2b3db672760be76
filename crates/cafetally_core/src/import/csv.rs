//! Tabular (comma-separated) recipe importer.
//!
//! # Responsibility
//! - Parse `name, category, ingredient, unit, qty` rows into recipe records.
//! - Group rows by item name into one record per distinct name.
//!
//! # Invariants
//! - Never fails: malformed rows are skipped, malformed numbers become 0.
//! - Records keep first-seen order of item names.
//! - No quoting support; a comma always separates fields.

use crate::import::record::{IngredientRecord, RawQuantity, RecipeRecord};
use crate::model::identity::normalize_id;
use crate::model::recipe::DEFAULT_CATEGORY;
use std::collections::HashMap;

const HEADER_NAME_TOKEN: &str = "name";
const HEADER_INGREDIENT_TOKEN: &str = "ingredient";

/// Parsed CSV payload plus row-level bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvImport {
    pub records: Vec<RecipeRecord>,
    /// Data rows seen, header excluded.
    pub rows_read: usize,
    /// Data rows dropped for missing item or ingredient name.
    pub rows_skipped: usize,
}

/// Parses CSV text into grouped recipe records (not merged).
pub fn parse_recipes_csv(text: &str) -> CsvImport {
    let rows = text
        .trim()
        .split('\n')
        .map(|line| {
            line.strip_suffix('\r')
                .unwrap_or(line)
                .split(',')
                .map(str::trim)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let start = if rows.first().is_some_and(|row| is_header(row)) {
        1
    } else {
        0
    };

    let mut import = CsvImport::default();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for row in &rows[start..] {
        import.rows_read += 1;
        let field = |position: usize| row.get(position).copied().unwrap_or_default();

        let item_name = field(0);
        let ingredient_name = field(2);
        if item_name.is_empty() || ingredient_name.is_empty() {
            import.rows_skipped += 1;
            continue;
        }

        let line = IngredientRecord {
            name: Some(ingredient_name.to_string()),
            unit: Some(field(3).to_string()),
            qty: Some(RawQuantity::Number(
                RawQuantity::Text(field(4).to_string()).to_number(),
            )),
        };

        let index = *index_by_name
            .entry(item_name.to_string())
            .or_insert_with(|| {
                let category = match field(1) {
                    "" => DEFAULT_CATEGORY,
                    category => category,
                };
                import.records.push(RecipeRecord {
                    id: Some(normalize_id(item_name)),
                    name: Some(item_name.to_string()),
                    category: Some(category.to_string()),
                    ingredients: Some(Vec::new()),
                });
                import.records.len() - 1
            });

        if let Some(lines) = import.records[index].ingredients.as_mut() {
            lines.push(line);
        }
    }

    import
}

fn is_header(row: &[&str]) -> bool {
    let lowered = row
        .iter()
        .map(|field| field.to_lowercase())
        .collect::<Vec<_>>();
    lowered.iter().any(|field| field == HEADER_NAME_TOKEN)
        && lowered.iter().any(|field| field == HEADER_INGREDIENT_TOKEN)
}
