//! Empty-row detection (check 2).

use tracing::debug;

use crate::core::table::GtnTable;
use crate::core::verdict::{CheckId, ErrorKind, Verdict};

/// Data-row indexes (0-based, header excluded) where every cell is null.
pub fn empty_row_indexes(gtn: &GtnTable) -> Vec<usize> {
    gtn.rows()
        .enumerate()
        .filter(|(_, row)| row.cells().all(|cell| cell.is_null()))
        .map(|(index, _)| index)
        .collect()
}

/// Check 2: no GTN row is entirely null.
pub fn check_empty_rows(dataset: &str, gtn: &GtnTable) -> Verdict {
    let empty = empty_row_indexes(gtn);
    debug!(dataset, empty = empty.len(), "empty row check");
    if empty.is_empty() {
        return Verdict::pass(CheckId::EmptyRows);
    }
    let offending: Vec<String> = empty.iter().map(|index| index.to_string()).collect();
    Verdict::fail(
        CheckId::EmptyRows,
        ErrorKind::Structural,
        format!(
            "{dataset} has empty rows in the GTN file at row index(es): {}",
            offending.join(", ")
        ),
        offending,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Cell;

    fn table(rows: Vec<Vec<Cell>>) -> GtnTable {
        GtnTable::new(vec!["employee_id".to_string(), "GrossPay".to_string()], rows)
    }

    #[test]
    fn passes_without_blank_rows() {
        let gtn = table(vec![
            vec![Cell::Int(1), Cell::Float(10.0)],
            vec![Cell::Int(2), Cell::Empty],
        ]);
        assert!(check_empty_rows("valid_data", &gtn).passed());
    }

    #[test]
    fn reports_each_blank_row() {
        let gtn = table(vec![
            vec![Cell::Int(1), Cell::Float(10.0)],
            vec![Cell::Empty, Cell::text(" ")],
            vec![],
            vec![Cell::Int(3), Cell::Float(30.0)],
        ]);
        let verdict = check_empty_rows("unit_test2", &gtn);
        let failure = verdict.failure().expect("failure");
        assert_eq!(failure.kind, ErrorKind::Structural);
        assert_eq!(failure.offending, vec!["1", "2"]);
        assert!(failure.message.contains("unit_test2 has empty rows in the GTN file"));
    }
}
