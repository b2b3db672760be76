//! Recipe import from externally authored files.
//!
//! # Responsibility
//! - Detect the payload format from a file name.
//! - Parse CSV/JSON payloads into untrusted `RecipeRecord`s.
//!
//! # Invariants
//! - Row-level data problems never surface as errors (see `csv`, `record`).
//! - File-level problems (unreadable, unparseable, unknown shape) surface as
//!   `ImportError` for that file only.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub mod csv;
pub mod json;
pub mod record;

use record::RecipeRecord;

pub type ImportResult<T> = Result<T, ImportError>;

/// File-level import failure.
#[derive(Debug)]
pub enum ImportError {
    Read(std::io::Error),
    Json(serde_json::Error),
    /// JSON parsed but is neither an array nor a `recipes` envelope.
    Shape(&'static str),
    /// File extension is neither `csv` nor `json`.
    UnsupportedFormat(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "cannot read file: {err}"),
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Shape(details) => write!(f, "unexpected JSON shape: {details}"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported file type `{ext}`"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Shape(_) | Self::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Read(value)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Supported import payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> ImportResult<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// Parses one file's text into records according to its format.
pub fn parse_records(format: ImportFormat, text: &str) -> ImportResult<Vec<RecipeRecord>> {
    match format {
        ImportFormat::Csv => Ok(csv::parse_recipes_csv(text).records),
        ImportFormat::Json => json::parse_recipes_json(text),
    }
}
