//! Structured (JSON) recipe importer.
//!
//! Accepts either a bare array of recipe-like objects or an object with a
//! `recipes` array field. Anything else is a shape error for the whole file.

use crate::import::record::RecipeRecord;
use crate::import::{ImportError, ImportResult};
use serde_json::Value;

/// Parses JSON text into untrusted recipe records (not merged).
pub fn parse_recipes_json(text: &str) -> ImportResult<Vec<RecipeRecord>> {
    let value: Value = serde_json::from_str(text)?;
    let entries = match &value {
        Value::Array(entries) => entries,
        Value::Object(object) => match object.get("recipes") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ImportError::Shape("object without `recipes` array")),
        },
        _ => return Err(ImportError::Shape("expected array or object")),
    };

    Ok(entries.iter().map(RecipeRecord::from_json).collect())
}
