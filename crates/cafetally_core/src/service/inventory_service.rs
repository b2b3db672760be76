//! Inventory use-case service.
//!
//! # Responsibility
//! - Own the in-memory catalog and ledger for one session (no globals).
//! - Load state from and persist state to a `SlotStore`.
//! - Expose sales counting, menu listing, totals and CSV export.
//!
//! # Invariants
//! - Loading never fails: absent or corrupt blobs fall back to the default
//!   catalog and an empty ledger.
//! - Every ledger mutation that changes state writes the full ledger once;
//!   mutations that change nothing write nothing.
//! - A failed write leaves the in-memory catalog and ledger unchanged.
//! - Reset runs only with an explicit `ResetConfirmation::Confirmed`.

use crate::aggregate::export::export_totals_csv;
use crate::aggregate::{aggregate_totals, AggregateTotal};
use crate::import::record::RecipeRecord;
use crate::model::catalog::{Catalog, MergeReport};
use crate::model::defaults::default_catalog;
use crate::model::identity::normalize_id;
use crate::model::ledger::Ledger;
use crate::model::recipe::Recipe;
use crate::repo::slot_repo::{RepoError, RepoResult, Slot, SlotStore};
use log::{debug, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for inventory use-cases.
#[derive(Debug)]
pub enum InventoryError {
    /// Ledger action targeted an id absent from the catalog.
    UnknownRecipe(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRecipe(id) => write!(f, "unknown recipe: `{id}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownRecipe(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for InventoryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Explicit user answer required before clearing every count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetConfirmation {
    Confirmed,
    Declined,
}

/// Where the catalog came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Stored,
    Default,
}

/// One menu row: a recipe and its current sold count.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<'a> {
    pub recipe: &'a Recipe,
    pub count: u64,
}

/// Session context owning catalog, ledger and their store.
pub struct InventoryService<S: SlotStore> {
    store: S,
    catalog: Catalog,
    ledger: Ledger,
    catalog_source: CatalogSource,
}

impl<S: SlotStore> InventoryService<S> {
    /// Loads catalog and ledger from `store`, recovering from bad data.
    pub fn load(store: S) -> Self {
        let (catalog, catalog_source) = load_catalog(&store);
        let ledger = load_ledger(&store);
        info!(
            "event=state_load module=service status=ok catalog_source={:?} recipes={} ledger_entries={}",
            catalog_source,
            catalog.len(),
            ledger.iter().count()
        );
        Self {
            store,
            catalog,
            ledger,
            catalog_source,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn catalog_source(&self) -> CatalogSource {
        self.catalog_source
    }

    pub fn recipe_count(&self) -> usize {
        self.catalog.len()
    }

    /// Sold count for `id`, zero when absent.
    pub fn count(&self, id: &str) -> u64 {
        self.ledger.count(id)
    }

    /// Sum of all sold counts.
    pub fn total_orders(&self) -> u64 {
        self.ledger.total_orders()
    }

    /// Records one sold unit and persists the ledger.
    pub fn increment(&mut self, id: &str) -> InventoryResult<u64> {
        self.ensure_known(id)?;
        let mut next = self.ledger.clone();
        let count = next.increment(id);
        self.commit_ledger(next)?;
        debug!("event=ledger_increment module=service status=ok id={id} count={count}");
        Ok(count)
    }

    /// Removes one sold unit. At zero this is a no-op and writes nothing.
    ///
    /// Returns whether the ledger changed.
    pub fn decrement(&mut self, id: &str) -> InventoryResult<bool> {
        self.ensure_known(id)?;
        let mut next = self.ledger.clone();
        if !next.decrement(id) {
            debug!("event=ledger_decrement module=service status=skip id={id} reason=at_zero");
            return Ok(false);
        }
        self.commit_ledger(next)?;
        debug!(
            "event=ledger_decrement module=service status=ok id={id} count={}",
            self.ledger.count(id)
        );
        Ok(true)
    }

    /// Clears every count after explicit confirmation.
    ///
    /// Returns whether the ledger changed. Declined confirmation and an
    /// already-empty ledger leave state and storage untouched.
    pub fn reset(&mut self, confirmation: ResetConfirmation) -> InventoryResult<bool> {
        if confirmation != ResetConfirmation::Confirmed {
            info!("event=ledger_reset module=service status=skip reason=declined");
            return Ok(false);
        }
        let mut next = self.ledger.clone();
        if !next.clear() {
            return Ok(false);
        }
        self.commit_ledger(next)?;
        info!("event=ledger_reset module=service status=ok");
        Ok(true)
    }

    /// Merges untrusted records into the catalog and persists it on change.
    pub fn merge_records(
        &mut self,
        records: impl IntoIterator<Item = RecipeRecord>,
    ) -> InventoryResult<MergeReport> {
        let mut next = self.catalog.clone();
        let report = next.merge_records(records);
        if report.changed() {
            save_slot(&self.store, Slot::Recipes, &next)?;
            self.catalog = next;
        }
        info!(
            "event=catalog_merge module=service status=ok inserted={} updated={} rejected={}",
            report.inserted.len(),
            report.updated.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Current ingredient totals, largest first.
    pub fn totals(&self) -> Vec<AggregateTotal> {
        aggregate_totals(&self.catalog, &self.ledger)
    }

    /// Current totals as `ingredient,unit,total` CSV.
    pub fn export_totals_csv(&self) -> String {
        export_totals_csv(&self.totals())
    }

    /// Recipes whose name or category contains `filter`, sorted by name.
    ///
    /// Matching is case-insensitive; a blank filter lists everything.
    pub fn menu(&self, filter: &str) -> Vec<MenuEntry<'_>> {
        let needle = filter.trim().to_lowercase();
        let mut entries = self
            .catalog
            .recipes()
            .iter()
            .filter(|recipe| {
                needle.is_empty()
                    || recipe.name.to_lowercase().contains(&needle)
                    || recipe.category.to_lowercase().contains(&needle)
            })
            .map(|recipe| MenuEntry {
                recipe,
                count: self.ledger.count(&recipe.id),
            })
            .collect::<Vec<_>>();
        entries.sort_by_cached_key(|entry| {
            (
                normalize_id(&entry.recipe.name),
                entry.recipe.name.to_lowercase(),
            )
        });
        entries
    }

    /// Writes both slots.
    pub fn save(&self) -> RepoResult<()> {
        save_slot(&self.store, Slot::Recipes, &self.catalog)?;
        save_slot(&self.store, Slot::Counts, &self.ledger)
    }

    fn ensure_known(&self, id: &str) -> InventoryResult<()> {
        match self.catalog.get(id) {
            Some(_) => Ok(()),
            None => Err(InventoryError::UnknownRecipe(id.to_string())),
        }
    }

    // In-memory state moves to `next` only once the store accepted it.
    fn commit_ledger(&mut self, next: Ledger) -> RepoResult<()> {
        save_slot(&self.store, Slot::Counts, &next)?;
        self.ledger = next;
        Ok(())
    }
}

fn save_slot<T: Serialize>(store: &impl SlotStore, slot: Slot, value: &T) -> RepoResult<()> {
    let blob = serde_json::to_string(value)?;
    store.save(slot, &blob)
}

fn load_catalog(store: &impl SlotStore) -> (Catalog, CatalogSource) {
    let blob = match store.load(Slot::Recipes) {
        Ok(Some(blob)) => blob,
        Ok(None) => return (default_catalog(), CatalogSource::Default),
        Err(err) => {
            warn!("event=state_load module=service status=error slot=recipes error={err}");
            return (default_catalog(), CatalogSource::Default);
        }
    };

    match serde_json::from_str::<Vec<Recipe>>(&blob) {
        Ok(recipes) if !recipes.is_empty() => {
            (Catalog::from_recipes(recipes), CatalogSource::Stored)
        }
        Ok(_) => (default_catalog(), CatalogSource::Default),
        Err(err) => {
            warn!("event=state_load module=service status=error slot=recipes error_code=corrupt_blob error={err}");
            (default_catalog(), CatalogSource::Default)
        }
    }
}

fn load_ledger(store: &impl SlotStore) -> Ledger {
    let blob = match store.load(Slot::Counts) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Ledger::new(),
        Err(err) => {
            warn!("event=state_load module=service status=error slot=counts error={err}");
            return Ledger::new();
        }
    };

    serde_json::from_str::<Ledger>(&blob).unwrap_or_else(|err| {
        warn!("event=state_load module=service status=error slot=counts error_code=corrupt_blob error={err}");
        Ledger::new()
    })
}
