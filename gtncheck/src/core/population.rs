//! Employee population reconciliation (checks 4 and 5).

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::core::normalize::normalize_id_cell;
use crate::core::table::{GtnTable, PayrunTable};
use crate::core::verdict::{CheckId, ErrorKind, Verdict};

/// Normalized ids from one side, plus whether the id column was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    pub ids: BTreeSet<String>,
    pub column_found: bool,
}

/// Both set differences, computed from a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub gtn: IdSet,
    pub payrun: IdSet,
    /// In Payrun but not in GTN.
    pub missing_in_gtn: Vec<String>,
    /// In GTN but not in Payrun.
    pub missing_in_payrun: Vec<String>,
}

/// Employee id column names for both exports.
#[derive(Debug, Clone, Copy)]
pub struct IdColumns<'a> {
    pub gtn: &'a str,
    pub payrun_group: &'a str,
}

pub fn gtn_ids(gtn: &GtnTable, column: &str) -> IdSet {
    match gtn.column_index(column) {
        Some(index) => IdSet {
            ids: gtn.column_cells(index).filter_map(normalize_id_cell).collect(),
            column_found: true,
        },
        None => IdSet::default(),
    }
}

/// Ids from the first Payrun column whose group label is `group`.
///
/// A missing column yields an empty set rather than an error.
pub fn payrun_ids(payrun: &PayrunTable, group: &str) -> IdSet {
    match payrun.group_index(group) {
        Some(index) => IdSet {
            ids: payrun
                .column_cells(index)
                .filter_map(normalize_id_cell)
                .collect(),
            column_found: true,
        },
        None => IdSet::default(),
    }
}

pub fn reconcile(gtn: &GtnTable, payrun: &PayrunTable, columns: IdColumns<'_>) -> Reconciliation {
    let gtn_set = gtn_ids(gtn, columns.gtn);
    let payrun_set = payrun_ids(payrun, columns.payrun_group);
    if !gtn_set.column_found {
        warn!(column = columns.gtn, "GTN employee id column not found");
    }
    if !payrun_set.column_found {
        warn!(group = columns.payrun_group, "Payrun employee id column not found");
    }

    let missing_in_gtn = payrun_set.ids.difference(&gtn_set.ids).cloned().collect();
    let missing_in_payrun = gtn_set.ids.difference(&payrun_set.ids).cloned().collect();
    Reconciliation {
        gtn: gtn_set,
        payrun: payrun_set,
        missing_in_gtn,
        missing_in_payrun,
    }
}

impl Reconciliation {
    /// Check 4: every Payrun employee is present in GTN.
    pub fn missing_in_gtn_verdict(&self, columns: IdColumns<'_>) -> Verdict {
        self.column_error(CheckId::EmployeesMissingInGtn, columns)
            .unwrap_or_else(|| {
                difference_verdict(
                    CheckId::EmployeesMissingInGtn,
                    "GTN",
                    &self.missing_in_gtn,
                    &self.column_notes(columns),
                )
            })
    }

    /// Check 5: every GTN employee is present in Payrun.
    pub fn missing_in_payrun_verdict(&self, columns: IdColumns<'_>) -> Verdict {
        self.column_error(CheckId::EmployeesMissingInPayrun, columns)
            .unwrap_or_else(|| {
                difference_verdict(
                    CheckId::EmployeesMissingInPayrun,
                    "Payrun",
                    &self.missing_in_payrun,
                    &self.column_notes(columns),
                )
            })
    }

    /// Without the GTN id column the populations cannot be compared, so both
    /// directions fail instead of passing on an empty set.
    fn column_error(&self, check: CheckId, columns: IdColumns<'_>) -> Option<Verdict> {
        if self.gtn.column_found {
            return None;
        }
        let mut message = format!(
            "Employee ID column '{}' not found in GTN file.",
            columns.gtn
        );
        let notes = self.column_notes(columns);
        if !notes.is_empty() {
            message.push_str(&format!(" ({})", notes.join("; ")));
        }
        Some(Verdict::fail(
            check,
            ErrorKind::Referential,
            message,
            vec![columns.gtn.to_string()],
        ))
    }

    /// The Payrun side degrades to an empty set; the note keeps that visible.
    fn column_notes(&self, columns: IdColumns<'_>) -> Vec<String> {
        if self.payrun.column_found {
            return Vec::new();
        }
        vec![format!(
            "Payrun identifier column '{}' not found",
            columns.payrun_group
        )]
    }
}

fn difference_verdict(check: CheckId, file: &str, missing: &[String], notes: &[String]) -> Verdict {
    debug!(%check, missing = missing.len(), "employee reconciliation");
    if missing.is_empty() {
        return Verdict::pass(check);
    }
    let mut message = format!(
        "ID of missing employees in the {file} file: {}",
        missing.join(", ")
    );
    if !notes.is_empty() {
        message.push_str(&format!(" ({})", notes.join("; ")));
    }
    Verdict::fail(check, ErrorKind::Referential, message, missing.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{Cell, ColumnKey};

    const COLUMNS: IdColumns<'static> = IdColumns {
        gtn: "employee_id",
        payrun_group: "Employee ID",
    };

    fn gtn(ids: Vec<Cell>) -> GtnTable {
        GtnTable::new(
            vec!["employee_id".to_string()],
            ids.into_iter().map(|id| vec![id]).collect(),
        )
    }

    fn payrun(ids: Vec<Cell>) -> PayrunTable {
        PayrunTable::new(
            vec![ColumnKey::new("Employee ID", "Unnamed: 0_level_1")],
            ids.into_iter().map(|id| vec![id]).collect(),
        )
    }

    #[test]
    fn reports_both_directions() {
        let gtn = gtn(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let payrun = payrun(vec![Cell::Float(2.0), Cell::text("3"), Cell::Int(4)]);
        let result = reconcile(&gtn, &payrun, COLUMNS);
        assert_eq!(result.missing_in_gtn, vec!["4"]);
        assert_eq!(result.missing_in_payrun, vec!["1"]);

        let check4 = result.missing_in_gtn_verdict(COLUMNS);
        let check5 = result.missing_in_payrun_verdict(COLUMNS);
        assert_eq!(
            check4.failure().expect("check 4").message,
            "ID of missing employees in the GTN file: 4"
        );
        assert_eq!(
            check5.failure().expect("check 5").message,
            "ID of missing employees in the Payrun file: 1"
        );
    }

    #[test]
    fn ignores_float_noise_and_blanks() {
        let gtn = gtn(vec![Cell::Float(101.0), Cell::Empty, Cell::text("nan")]);
        let payrun = payrun(vec![Cell::text(" 101 "), Cell::Float(f64::NAN)]);
        let result = reconcile(&gtn, &payrun, COLUMNS);
        assert!(result.missing_in_gtn_verdict(COLUMNS).passed());
        assert!(result.missing_in_payrun_verdict(COLUMNS).passed());
    }

    #[test]
    fn swap_keeps_intersection() {
        let left = gtn(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let right = payrun(vec![Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
        let forward = reconcile(&left, &right, COLUMNS);

        let swapped_gtn = gtn(vec![Cell::Int(2), Cell::Int(3), Cell::Int(4)]);
        let swapped_payrun = payrun(vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
        let backward = reconcile(&swapped_gtn, &swapped_payrun, COLUMNS);

        assert_eq!(forward.missing_in_gtn, backward.missing_in_payrun);
        assert_eq!(forward.missing_in_payrun, backward.missing_in_gtn);
        let forward_common: BTreeSet<_> =
            forward.gtn.ids.intersection(&forward.payrun.ids).collect();
        let backward_common: BTreeSet<_> =
            backward.gtn.ids.intersection(&backward.payrun.ids).collect();
        assert_eq!(forward_common, backward_common);
    }

    #[test]
    fn missing_payrun_column_degrades_to_empty_set() {
        let gtn = gtn(vec![Cell::Int(1), Cell::Int(2)]);
        let payrun = PayrunTable::new(
            vec![ColumnKey::new("Employee Number", "Unnamed: 0_level_1")],
            vec![vec![Cell::Int(1)]],
        );
        let result = reconcile(&gtn, &payrun, COLUMNS);
        assert!(!result.payrun.column_found);
        assert!(result.missing_in_gtn_verdict(COLUMNS).passed());

        let failure = result
            .missing_in_payrun_verdict(COLUMNS)
            .failure()
            .cloned()
            .expect("check 5");
        assert_eq!(failure.offending, vec!["1", "2"]);
        assert!(failure.message.contains("Payrun identifier column 'Employee ID' not found"));
    }

    #[test]
    fn missing_gtn_column_fails_both_directions() {
        let gtn = GtnTable::new(
            vec!["emp".to_string(), "GrossPay".to_string()],
            vec![vec![Cell::Int(1), Cell::Int(10)], vec![Cell::Int(2), Cell::Int(20)]],
        );
        let payrun = payrun(vec![Cell::Int(1), Cell::Int(2)]);
        let result = reconcile(&gtn, &payrun, COLUMNS);
        assert!(!result.gtn.column_found);
        assert!(result.payrun.column_found);

        for verdict in [
            result.missing_in_gtn_verdict(COLUMNS),
            result.missing_in_payrun_verdict(COLUMNS),
        ] {
            let failure = verdict.failure().cloned().expect("column failure");
            assert_eq!(failure.kind, ErrorKind::Referential);
            assert_eq!(failure.offending, vec!["employee_id"]);
            assert_eq!(
                failure.message,
                "Employee ID column 'employee_id' not found in GTN file."
            );
        }
    }

    #[test]
    fn both_id_columns_missing_never_pass() {
        let gtn = GtnTable::new(
            vec!["emp".to_string(), "GrossPay".to_string()],
            vec![vec![Cell::Int(1), Cell::Int(10)], vec![Cell::Int(2), Cell::Int(20)]],
        );
        let payrun = PayrunTable::new(
            vec![ColumnKey::new("Emp No", "x"), ColumnKey::new("Earnings", "Base Pay")],
            vec![vec![Cell::Int(3), Cell::Int(5)]],
        );
        let result = reconcile(&gtn, &payrun, COLUMNS);
        let check4 = result.missing_in_gtn_verdict(COLUMNS);
        let check5 = result.missing_in_payrun_verdict(COLUMNS);
        assert!(!check4.passed());
        assert!(!check5.passed());

        let failure = check5.failure().expect("check 5");
        assert!(failure.message.starts_with("Employee ID column 'employee_id' not found"));
        assert!(failure.message.contains("Payrun identifier column 'Employee ID' not found"));
        assert_eq!(check4.failure().expect("check 4").kind, ErrorKind::Referential);
    }
}
