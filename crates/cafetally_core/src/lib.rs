//! Core domain logic for cafetally.
//! This crate is the single source of truth for catalog, ledger and totals.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use aggregate::export::{export_totals_csv, parse_totals_csv};
pub use aggregate::{aggregate_totals, format_amount, format_quantity, AggregateTotal};
pub use config::CoreConfig;
pub use import::csv::{parse_recipes_csv, CsvImport};
pub use import::json::parse_recipes_json;
pub use import::record::{IngredientRecord, RawQuantity, RecipeRecord, RecordRejection};
pub use import::{ImportError, ImportFormat, ImportResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::catalog::{Catalog, CatalogLookup, MatchKey, MergeReport, UpsertOutcome};
pub use model::defaults::default_catalog;
pub use model::identity::{normalize_id, RecipeId};
pub use model::ledger::Ledger;
pub use model::recipe::{IngredientLine, Recipe, DEFAULT_CATEGORY};
pub use repo::slot_repo::{RepoError, RepoResult, Slot, SlotStore, SqliteSlotStore};
pub use service::import_service::{BatchImportReport, ImportFailure, ImportSource};
pub use service::inventory_service::{
    CatalogSource, InventoryError, InventoryResult, InventoryService, MenuEntry,
    ResetConfirmation,
};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
