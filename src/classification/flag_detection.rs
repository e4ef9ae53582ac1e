//! Non-conformance flag detection.
//!
//! The status column is typed by hand, so "NC", "Non conforme" and
//! "non-conforme" all have to mean the same thing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::StatusFlag;

lazy_static! {
    static ref NC_PATTERN: Regex =
        Regex::new(r"(?i)^\s*(nc|non[\s_-]?conform(e|ant)?)\s*$").unwrap();
}

/// Check if a status cell marks the tool as non-conformant.
///
/// # Examples
/// ```
/// use gmao_compliance::classification::is_non_conformant;
/// assert!(is_non_conformant("NC"));
/// assert!(is_non_conformant("Non conforme"));
/// assert!(!is_non_conformant("Conforme"));
/// ```
pub fn is_non_conformant(status: &str) -> bool {
    NC_PATTERN.is_match(status)
}

/// Map a status cell to a flag. Empty or unrecognised cells are `Normal`.
pub fn detect_status_flag(status: Option<&str>) -> StatusFlag {
    match status {
        Some(s) if is_non_conformant(s) => StatusFlag::NonConformant,
        _ => StatusFlag::Normal,
    }
}
