//! Recipe catalog with merge-by-identity.
//!
//! # Responsibility
//! - Hold the ordered set of recipes known to the shop.
//! - Merge imported records using a two-stage identity lookup.
//!
//! # Invariants
//! - Recipe ids are unique within the catalog.
//! - Merge replaces `name`, `category` and `ingredients` of a matched recipe
//!   in place; its `id` and position never change.
//! - Unmatched recipes are appended, so merge never duplicates an id.
//! - There is no delete operation.

use crate::import::record::{RecipeRecord, RecordRejection};
use crate::model::identity::RecipeId;
use crate::model::recipe::Recipe;
use serde::{Deserialize, Serialize};

/// Which identity key resolved a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKey {
    Id,
    /// Case-insensitive display name fallback.
    Name,
}

/// Result of resolving an incoming recipe against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLookup {
    Found { index: usize, key: MatchKey },
    NotFound,
}

/// What a single upsert did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(RecipeId),
    /// Carries the preserved id of the replaced recipe.
    Updated(RecipeId),
}

/// Summary of one merge batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub inserted: Vec<RecipeId>,
    pub updated: Vec<RecipeId>,
    pub rejected: Vec<RecordRejection>,
}

impl MergeReport {
    /// Returns whether the merge changed the catalog.
    pub fn changed(&self) -> bool {
        !self.inserted.is_empty() || !self.updated.is_empty()
    }
}

/// Ordered recipe collection, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from stored recipes, collapsing duplicate ids.
    ///
    /// Only `id` is an identity key here; names that differ by case alone
    /// stay separate recipes. The last recipe with a given id wins.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut catalog = Self::new();
        for recipe in recipes {
            match catalog.recipes.iter().position(|r| r.id == recipe.id) {
                Some(index) => catalog.recipes[index].replace_contents(recipe),
                None => catalog.recipes.push(recipe),
            }
        }
        catalog
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Resolves identity: first by exact id, then by case-insensitive name.
    pub fn lookup(&self, id: &str, name: &str) -> CatalogLookup {
        if let Some(index) = self.recipes.iter().position(|recipe| recipe.id == id) {
            return CatalogLookup::Found {
                index,
                key: MatchKey::Id,
            };
        }

        let folded = name.to_lowercase();
        match self
            .recipes
            .iter()
            .position(|recipe| recipe.name.to_lowercase() == folded)
        {
            Some(index) => CatalogLookup::Found {
                index,
                key: MatchKey::Name,
            },
            None => CatalogLookup::NotFound,
        }
    }

    /// Inserts `recipe` or replaces the contents of its matching entry.
    pub fn upsert(&mut self, recipe: Recipe) -> UpsertOutcome {
        match self.lookup(&recipe.id, &recipe.name) {
            CatalogLookup::Found { index, .. } => {
                let existing = &mut self.recipes[index];
                existing.replace_contents(recipe);
                UpsertOutcome::Updated(existing.id.clone())
            }
            CatalogLookup::NotFound => {
                let id = recipe.id.clone();
                self.recipes.push(recipe);
                UpsertOutcome::Inserted(id)
            }
        }
    }

    /// Coerces and merges untrusted records in order.
    ///
    /// Rejected records are reported and leave the catalog untouched. The
    /// caller owns persistence of the merged catalog.
    pub fn merge_records(
        &mut self,
        records: impl IntoIterator<Item = RecipeRecord>,
    ) -> MergeReport {
        let mut report = MergeReport::default();
        for record in records {
            match record.into_recipe() {
                Ok(recipe) => match self.upsert(recipe) {
                    UpsertOutcome::Inserted(id) => report.inserted.push(id),
                    UpsertOutcome::Updated(id) => report.updated.push(id),
                },
                Err(rejection) => report.rejected.push(rejection),
            }
        }
        report
    }
}
