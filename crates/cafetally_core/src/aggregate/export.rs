//! CSV export of aggregate totals.
//!
//! Format: header `ingredient,unit,total`, then one unquoted row per total
//! with the total rendered by `format_quantity`.

use crate::aggregate::{format_quantity, AggregateTotal};

pub const TOTALS_CSV_HEADER: &str = "ingredient,unit,total";

/// Serializes totals as CSV text, newline-terminated.
pub fn export_totals_csv(totals: &[AggregateTotal]) -> String {
    let mut csv = String::from(TOTALS_CSV_HEADER);
    csv.push('\n');
    for total in totals {
        csv.push_str(&format!(
            "{},{},{}\n",
            total.ingredient_name,
            total.unit,
            format_quantity(total.total)
        ));
    }
    csv
}

/// Reads an exported totals CSV back into `(ingredient, unit, total)` rows.
///
/// The header row and rows with an unparseable total are skipped.
pub fn parse_totals_csv(text: &str) -> Vec<AggregateTotal> {
    text.lines()
        .filter(|line| line.trim() != TOTALS_CSV_HEADER)
        .filter_map(|line| {
            let mut fields = line.split(',').map(str::trim);
            let ingredient_name = fields.next()?.to_string();
            let unit = fields.next()?.to_string();
            let total = fields.next()?.parse::<f64>().ok()?;
            Some(AggregateTotal {
                ingredient_name,
                unit,
                total,
            })
        })
        .collect()
}
