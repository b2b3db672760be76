//! Identity normalizer for recipe records.
//!
//! # Responsibility
//! - Turn free-text names into stable, lowercase slug identifiers.
//!
//! # Invariants
//! - Output only contains `[a-z0-9]` and single `-` separators.
//! - `normalize_id(normalize_id(x)) == normalize_id(x)` for every input.
//! - Inputs without alphanumeric content map to the empty slug; every such
//!   input shares that one identity bucket.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid separator regex"));

const SEPARATOR: &str = "-";

/// Stable identifier of a recipe inside a catalog.
pub type RecipeId = String;

/// Derives a stable slug identity from a display string.
///
/// Lowercases, decomposes accented characters (NFD), drops combining
/// marks, collapses every non-`[a-z0-9]` run to `-` and trims separators.
pub fn normalize_id(value: &str) -> RecipeId {
    let folded = value
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .fold(String::with_capacity(value.len()), |mut acc, ch| {
            match fold_base_letter(ch) {
                Some(replacement) => acc.push_str(replacement),
                None => acc.push(ch),
            }
            acc
        });

    SEPARATOR_RUN_RE
        .replace_all(&folded, SEPARATOR)
        .trim_matches('-')
        .to_string()
}

// Letters with no canonical decomposition that still read as a base letter.
fn fold_base_letter(ch: char) -> Option<&'static str> {
    match ch {
        'đ' => Some("d"),
        'ł' => Some("l"),
        'ø' => Some("o"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ß' => Some("ss"),
        _ => None,
    }
}
