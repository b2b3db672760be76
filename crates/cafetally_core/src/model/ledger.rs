//! Order ledger: units sold per recipe.
//!
//! # Responsibility
//! - Track non-negative sold counts keyed by recipe id.
//!
//! # Invariants
//! - Counts never go below zero; absent entries read as zero.
//! - Mutators report whether state actually changed so callers can skip
//!   redundant persistence.

use crate::model::identity::RecipeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from recipe id to units sold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    counts: BTreeMap<RecipeId, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sold count for `id`, zero when absent.
    pub fn count(&self, id: &str) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Adds one sold unit. Creates the entry at 1 when absent.
    pub fn increment(&mut self, id: &str) -> u64 {
        let entry = self.counts.entry(id.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    /// Removes one sold unit, clamped at zero.
    ///
    /// Returns `false` without touching state when the count is already 0.
    pub fn decrement(&mut self, id: &str) -> bool {
        match self.counts.get_mut(id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Clears every entry. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.counts.is_empty();
        self.counts.clear();
        changed
    }

    /// Sum of every count.
    pub fn total_orders(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(id, count)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(id, count)| (id.as_str(), *count))
    }
}
