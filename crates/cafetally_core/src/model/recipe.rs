//! Recipe domain model.
//!
//! # Responsibility
//! - Define the canonical sellable item and its ingredient composition.
//!
//! # Invariants
//! - `id` is always a normalized slug (see `model::identity`).
//! - `IngredientLine` has no identity of its own and is owned by one recipe.
//! - Serialized shape matches stored catalog blobs (`qty` field name).

use crate::model::identity::RecipeId;
use serde::{Deserialize, Serialize};

/// Category assigned when an import record carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// One raw-material line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Consumption per sold unit, in `unit`.
    #[serde(rename = "qty", default)]
    pub quantity: f64,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            quantity,
        }
    }
}

/// Sellable item defined by its ingredient composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl Recipe {
    /// Creates a recipe with a caller-provided id and no ingredient lines.
    pub fn new(
        id: impl Into<RecipeId>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            ingredients: Vec::new(),
        }
    }

    /// Appends one ingredient line, builder style.
    pub fn with_line(mut self, name: &str, unit: &str, quantity: f64) -> Self {
        self.ingredients
            .push(IngredientLine::new(name, unit, quantity));
        self
    }

    /// Replaces every mutable field with `incoming`, keeping `self.id`.
    pub fn replace_contents(&mut self, incoming: Recipe) {
        self.name = incoming.name;
        self.category = incoming.category;
        self.ingredients = incoming.ingredients;
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}
