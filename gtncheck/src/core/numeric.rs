//! Numeric-type check on mapped GTN pay element columns (check 8).

use tracing::debug;

use crate::core::mapping::Mapping;
use crate::core::table::GtnTable;
use crate::core::verdict::{CheckId, ErrorKind, Verdict};

/// A non-numeric value found in a pay element column.
#[derive(Debug, Clone, PartialEq)]
pub struct NonNumericValue {
    pub column: String,
    pub row: usize,
    pub value: String,
}

/// Check 8: every active vendor column exists in GTN and holds only numbers
/// or nulls.
///
/// Columns are matched by exact label. The first absent column ends the check
/// with a referential failure; the remaining columns are not inspected. That
/// failure takes precedence over non-numeric values already found in earlier
/// columns, which are not reported.
pub fn check_numeric_elements(gtn: &GtnTable, mapping: &Mapping) -> Verdict {
    let mut found = Vec::new();

    for entry in mapping.active() {
        let Some(index) = gtn.column_index(entry.vendor) else {
            return Verdict::fail(
                CheckId::NumericElements,
                ErrorKind::Referential,
                format!("Pay Element column '{}' not found in GTN file.", entry.vendor),
                vec![entry.vendor.to_string()],
            );
        };
        found.extend(
            gtn.column_cells(index)
                .enumerate()
                .filter(|(_, cell)| !(cell.is_null() || cell.is_numeric()))
                .map(|(row, cell)| NonNumericValue {
                    column: entry.vendor.to_string(),
                    row,
                    value: cell.to_string(),
                }),
        );
    }

    debug!(non_numeric = found.len(), "numeric element check");
    if found.is_empty() {
        return Verdict::pass(CheckId::NumericElements);
    }

    let mut columns: Vec<&str> = Vec::new();
    for value in &found {
        if !columns.contains(&value.column.as_str()) {
            columns.push(value.column.as_str());
        }
    }
    let details: Vec<String> = columns
        .iter()
        .map(|column| {
            let values: Vec<String> = found
                .iter()
                .filter(|value| value.column == *column)
                .map(|value| format!("'{}'", value.value))
                .collect();
            format!(
                "The column '{column}' in GTN file contains non-numeric values: [{}]",
                values.join(", ")
            )
        })
        .collect();
    let offending = found.iter().map(|value| value.value.clone()).collect();
    Verdict::fail(
        CheckId::NumericElements,
        ErrorKind::NonNumericValue,
        details.join("; "),
        offending,
    )
}
