//! Loosely-typed recipe records and their coercion into `Recipe`.
//!
//! # Responsibility
//! - Accept recipe-shaped data from untrusted sources (JSON files, CSV rows).
//! - Produce either a strongly-typed `Recipe` or a `RecordRejection`.
//!
//! # Invariants
//! - Coercion never fails hard: every input yields `Ok(Recipe)` or a reason.
//! - Accepted recipes have a non-empty trimmed name and at least one
//!   ingredient line with a non-empty name and a positive quantity.
//! - Accepted recipe ids are normalized slugs.

use crate::model::identity::normalize_id;
use crate::model::recipe::{IngredientLine, Recipe, DEFAULT_CATEGORY};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Quantity as it appeared in the source, before numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawQuantity {
    Number(f64),
    Text(String),
}

impl RawQuantity {
    /// Coerces to a finite number. Blank text is 0; unparseable text is 0.
    pub fn to_number(&self) -> f64 {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// One ingredient entry of an untrusted record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientRecord {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub qty: Option<RawQuantity>,
}

/// One recipe-like entry of an untrusted record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeRecord {
    /// Explicit identity; normalized before use.
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    /// `None` when the source had no ingredient array at all.
    pub ingredients: Option<Vec<IngredientRecord>>,
}

/// Reason an untrusted record was not turned into a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRejection {
    /// Name absent or blank after trimming.
    MissingName,
    /// No ingredient line survived filtering.
    NoIngredients { name: String },
}

impl Display for RecordRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "record has no name"),
            Self::NoIngredients { name } => {
                write!(f, "record `{name}` has no usable ingredient lines")
            }
        }
    }
}

impl RecipeRecord {
    /// Reads a record from arbitrary JSON.
    ///
    /// Non-object values become an empty record, which is later rejected.
    /// Scalar numbers in text fields are accepted as their decimal text.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let ingredients = object
            .get("ingredients")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(IngredientRecord::from_json).collect());

        Self {
            id: object.get("id").and_then(json_text),
            name: object.get("name").and_then(json_text),
            category: object.get("category").and_then(json_text),
            ingredients,
        }
    }

    /// Validates and coerces this record into a recipe.
    ///
    /// Identity is the normalized explicit id when one is present and
    /// non-empty, otherwise the normalized name.
    pub fn into_recipe(self) -> Result<Recipe, RecordRejection> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(RecordRejection::MissingName);
        }
        let name = name.to_string();

        let ingredients = self
            .ingredients
            .unwrap_or_default()
            .into_iter()
            .filter_map(IngredientRecord::into_line)
            .collect::<Vec<_>>();
        if ingredients.is_empty() {
            return Err(RecordRejection::NoIngredients { name });
        }

        let id = match self.id.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => normalize_id(explicit),
            _ => normalize_id(&name),
        };
        let category = match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        };

        Ok(Recipe {
            id,
            name,
            category,
            ingredients,
        })
    }
}

impl IngredientRecord {
    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let qty = object.get("qty").and_then(|qty| match qty {
            Value::Number(number) => number.as_f64().map(RawQuantity::Number),
            Value::String(text) => Some(RawQuantity::Text(text.clone())),
            Value::Bool(flag) => Some(RawQuantity::Number(if *flag { 1.0 } else { 0.0 })),
            _ => None,
        });

        Self {
            name: object.get("name").and_then(json_text),
            unit: object.get("unit").and_then(json_text),
            qty,
        }
    }

    /// Keeps the line only when it has a name and a positive quantity.
    fn into_line(self) -> Option<IngredientLine> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return None;
        }
        let quantity = self.qty.as_ref().map_or(0.0, RawQuantity::to_number);
        if quantity <= 0.0 {
            return None;
        }
        let unit = self.unit.as_deref().map(str::trim).unwrap_or_default();
        Some(IngredientLine::new(name, unit, quantity))
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
