//! Single-header heuristic (check 3).
//!
//! Real data rows carry at least one numeric cell (a pay amount). A row near
//! the top made only of text and nulls is most likely a second header row.
//! This is a heuristic: a legitimate all-text data row inside the scan window
//! is reported as a false positive, and a second header that happens to hold
//! a number is missed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::table::{GtnTable, Row};
use crate::core::verdict::{CheckId, ErrorKind, Verdict};

/// Default number of leading data rows inspected for header-like content.
pub const HEADER_SCAN_ROWS: usize = 3;

/// Placeholder label given to blank header cells at load time.
static UNNAMED_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Unnamed: \d+(_level_\d+)?$").expect("valid placeholder pattern")
});

pub fn is_placeholder_label(label: &str) -> bool {
    label.trim().is_empty() || UNNAMED_LABEL.is_match(label)
}

/// Every cell is text or null.
pub fn is_header_like(row: Row<'_>) -> bool {
    row.cells().all(|cell| cell.is_text() || cell.is_null())
}

/// Check 3: the GTN sheet has exactly one recognised header row.
pub fn check_single_header(dataset: &str, gtn: &GtnTable, scan_rows: usize) -> Verdict {
    if gtn.columns().iter().all(|label| is_placeholder_label(label)) {
        return Verdict::fail(
            CheckId::SingleHeader,
            ErrorKind::Structural,
            format!("{dataset} GTN file appears to have no header row."),
            gtn.columns().to_vec(),
        );
    }

    let header_like: Vec<usize> = gtn
        .rows()
        .take(scan_rows)
        .enumerate()
        .filter(|(_, row)| is_header_like(*row))
        .map(|(index, _)| index)
        .collect();
    debug!(dataset, scan_rows, header_like = header_like.len(), "single header check");

    if header_like.is_empty() {
        return Verdict::pass(CheckId::SingleHeader);
    }
    let offending: Vec<String> = header_like.iter().map(|index| index.to_string()).collect();
    Verdict::fail(
        CheckId::SingleHeader,
        ErrorKind::Structural,
        format!(
            "{dataset} GTN file has more than one header row (header-like data row index(es): {}).",
            offending.join(", ")
        ),
        offending,
    )
}
