//! The validation rule set over loaded data (checks 2 through 8).
//!
//! Every check is independent and idempotent. Each one scans all of its input
//! and collects every offending item before producing a verdict.

use crate::core::elements::coverage;
use crate::core::header::check_single_header;
use crate::core::mapping::Mapping;
use crate::core::numeric::check_numeric_elements;
use crate::core::population::{IdColumns, reconcile};
use crate::core::rows::check_empty_rows;
use crate::core::table::{GtnTable, PayrunTable};
use crate::core::verdict::{CheckId, Verdict};

/// Settings the rules need; resolved from configuration by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    pub gtn_id_column: String,
    pub payrun_id_group: String,
    pub header_scan_rows: usize,
}

/// The three loaded artifacts of one dataset.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub gtn: GtnTable,
    pub payrun: PayrunTable,
    pub mapping: Mapping,
}

impl RuleSettings {
    fn id_columns(&self) -> IdColumns<'_> {
        IdColumns {
            gtn: &self.gtn_id_column,
            payrun_group: &self.payrun_id_group,
        }
    }
}

/// Evaluate one check against loaded data.
///
/// `FileFormat` runs on the raw file inventory, not loaded data; it yields
/// `None` here.
pub fn run_check(
    check: CheckId,
    dataset: &str,
    data: &LoadedDataset,
    settings: &RuleSettings,
) -> Option<Verdict> {
    let columns = settings.id_columns();
    let verdict = match check {
        CheckId::FileFormat => return None,
        CheckId::EmptyRows => check_empty_rows(dataset, &data.gtn),
        CheckId::SingleHeader => {
            check_single_header(dataset, &data.gtn, settings.header_scan_rows)
        }
        CheckId::EmployeesMissingInGtn => {
            reconcile(&data.gtn, &data.payrun, columns).missing_in_gtn_verdict(columns)
        }
        CheckId::EmployeesMissingInPayrun => {
            reconcile(&data.gtn, &data.payrun, columns).missing_in_payrun_verdict(columns)
        }
        CheckId::ElementsMissingInPayrun => {
            coverage(&data.mapping, &data.gtn, &data.payrun).missing_in_payrun_verdict()
        }
        CheckId::ElementsMissingInGtn => {
            coverage(&data.mapping, &data.gtn, &data.payrun).missing_in_gtn_verdict()
        }
        CheckId::NumericElements => check_numeric_elements(&data.gtn, &data.mapping),
    };
    Some(verdict)
}

/// Evaluate checks 2 through 8. Two-sided checks share one computation.
pub fn run_rule_set(dataset: &str, data: &LoadedDataset, settings: &RuleSettings) -> Vec<Verdict> {
    let columns = settings.id_columns();
    let reconciliation = reconcile(&data.gtn, &data.payrun, columns);
    let elements = coverage(&data.mapping, &data.gtn, &data.payrun);

    vec![
        check_empty_rows(dataset, &data.gtn),
        check_single_header(dataset, &data.gtn, settings.header_scan_rows),
        reconciliation.missing_in_gtn_verdict(columns),
        reconciliation.missing_in_payrun_verdict(columns),
        elements.missing_in_payrun_verdict(),
        elements.missing_in_gtn_verdict(),
        check_numeric_elements(&data.gtn, &data.mapping),
    ]
}
