//! Batch file import into the inventory catalog.
//!
//! # Responsibility
//! - Parse several files and merge their records in one catalog update.
//! - Report file-level failures by name without aborting the batch.
//!
//! # Invariants
//! - Files are parsed and their records merged in input order.
//! - A failed file contributes no records; other files are unaffected.
//! - The catalog is persisted at most once per batch.

use crate::import::{parse_records, ImportError, ImportFormat};
use crate::model::catalog::MergeReport;
use crate::repo::slot_repo::SlotStore;
use crate::service::inventory_service::{InventoryResult, InventoryService};
use log::{info, warn};
use std::path::Path;

/// One file queued for import: its name and the outcome of reading it.
#[derive(Debug)]
pub struct ImportSource {
    pub file_name: String,
    pub contents: Result<String, ImportError>,
}

impl ImportSource {
    /// Wraps already-available text.
    pub fn from_text(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: Ok(text.into()),
        }
    }

    /// Reads a file from disk; a read failure is kept for the report.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            file_name: path.display().to_string(),
            contents: std::fs::read_to_string(path).map_err(ImportError::from),
        }
    }
}

/// A file that could not be imported.
#[derive(Debug)]
pub struct ImportFailure {
    pub file_name: String,
    pub error: ImportError,
}

/// Outcome of one batch import.
#[derive(Debug, Default)]
pub struct BatchImportReport {
    pub files_imported: usize,
    pub failures: Vec<ImportFailure>,
    pub merge: MergeReport,
}

impl<S: SlotStore> InventoryService<S> {
    /// Imports every source, then merges all parsed records in order.
    ///
    /// File-level failures are collected in the report. Only persistence
    /// errors abort the batch.
    pub fn import_sources(
        &mut self,
        sources: impl IntoIterator<Item = ImportSource>,
    ) -> InventoryResult<BatchImportReport> {
        let mut report = BatchImportReport::default();
        let mut records = Vec::new();

        for source in sources {
            let parsed = source.contents.and_then(|text| {
                let format = ImportFormat::from_file_name(&source.file_name)?;
                parse_records(format, &text)
            });
            match parsed {
                Ok(mut parsed) => {
                    info!(
                        "event=import_file module=service status=ok records={}",
                        parsed.len()
                    );
                    report.files_imported += 1;
                    records.append(&mut parsed);
                }
                Err(error) => {
                    warn!("event=import_file module=service status=error error={error}");
                    report.failures.push(ImportFailure {
                        file_name: source.file_name,
                        error,
                    });
                }
            }
        }

        if !records.is_empty() {
            report.merge = self.merge_records(records)?;
        }
        Ok(report)
    }
}
