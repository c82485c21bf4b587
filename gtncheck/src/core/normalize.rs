//! Canonical forms used only for equality comparison.
//!
//! Both functions are pure and locale-independent. Diagnostics always show
//! the original values, never the normalized ones.

use crate::core::table::Cell;

/// Normalize a raw employee identifier.
///
/// Trims whitespace, treats `None`, empty and `nan` (any case) as absent, and
/// strips trailing `.0` suffixes left behind when integer ids were stored as
/// floats. Stripping repeats until none remain, so the function is idempotent.
pub fn normalize_id(raw: Option<&str>) -> Option<String> {
    let mut value = raw?.trim();
    while let Some(stripped) = value.strip_suffix(".0") {
        value = stripped.trim_end();
    }
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(value.to_string())
}

/// Normalize an identifier cell as loaded from a spreadsheet.
pub fn normalize_id_cell(cell: &Cell) -> Option<String> {
    if cell.is_null() {
        return None;
    }
    normalize_id(Some(&cell.to_string()))
}

/// Normalize a pay element name: ASCII lowercase with all whitespace removed.
pub fn normalize_element(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
