//! Ingredient aggregation engine.
//!
//! # Responsibility
//! - Derive total raw-material consumption from catalog × ledger.
//! - Format quantities for presentation.
//!
//! # Invariants
//! - Totals are keyed by `(ingredient name, unit)`; different units of the
//!   same ingredient are never combined.
//! - Recipes with a zero or absent count contribute nothing.
//! - Only pairs with `total > 0` are returned, sorted by total descending.
//!   Ties keep discovery order.
//! - Stored totals keep full precision; rounding is presentation-only.

use crate::model::catalog::Catalog;
use crate::model::ledger::Ledger;
use serde::Serialize;
use std::collections::HashMap;

pub mod export;

/// Total consumption of one ingredient in one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTotal {
    pub ingredient_name: String,
    pub unit: String,
    pub total: f64,
}

/// Computes per-ingredient totals for the current ledger.
pub fn aggregate_totals(catalog: &Catalog, ledger: &Ledger) -> Vec<AggregateTotal> {
    let mut totals: Vec<AggregateTotal> = Vec::new();
    let mut index_by_key: HashMap<(&str, &str), usize> = HashMap::new();

    for recipe in catalog.recipes() {
        let count = ledger.count(&recipe.id);
        if count == 0 {
            continue;
        }
        for line in &recipe.ingredients {
            let added = line.quantity * count as f64;
            let key = (line.name.as_str(), line.unit.as_str());
            match index_by_key.get(&key).copied() {
                Some(index) => totals[index].total += added,
                None => {
                    index_by_key.insert(key, totals.len());
                    totals.push(AggregateTotal {
                        ingredient_name: line.name.clone(),
                        unit: line.unit.clone(),
                        total: added,
                    });
                }
            }
        }
    }

    totals.retain(|total| total.total > 0.0);
    // Stable sort keeps discovery order for equal totals.
    totals.sort_by(|left, right| right.total.total_cmp(&left.total));
    totals
}

/// Renders a quantity for display.
///
/// Integral values print without decimals; everything else is rounded to at
/// most two decimals with trailing zeros dropped.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        return format!("{value:.0}");
    }
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded}");
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Renders `quantity unit`, omitting the unit when empty.
pub fn format_amount(value: f64, unit: &str) -> String {
    let quantity = format_quantity(value);
    if unit.is_empty() {
        quantity
    } else {
        format!("{quantity} {unit}")
    }
}
