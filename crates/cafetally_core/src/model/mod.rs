//! Domain model for the recipe catalog and sales ledger.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep identity derivation in one place (`identity`).
//!
//! # Invariants
//! - Every recipe is identified by a normalized slug `RecipeId`.
//! - Recipes are never deleted; they are only inserted or replaced.
//! - Ledger counts are never negative.

pub mod catalog;
pub mod defaults;
pub mod identity;
pub mod ledger;
pub mod recipe;
