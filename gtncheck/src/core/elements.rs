//! Pay element mapping coverage (checks 6 and 7).

use std::collections::HashSet;

use tracing::debug;

use crate::core::mapping::Mapping;
use crate::core::normalize::normalize_element;
use crate::core::table::{GtnTable, PayrunTable};
use crate::core::verdict::{CheckId, ErrorKind, Verdict};

/// Normalized names from both levels of every Payrun column label.
pub fn payrun_names(payrun: &PayrunTable) -> HashSet<String> {
    payrun
        .columns()
        .iter()
        .flat_map(|column| column.parts())
        .map(normalize_element)
        .collect()
}

pub fn gtn_names(gtn: &GtnTable) -> HashSet<String> {
    gtn.columns()
        .iter()
        .map(|column| normalize_element(column))
        .collect()
}

/// Active mapping names absent from the other file's headers, per direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Active mapping keys with no Payrun column.
    pub missing_in_payrun: Vec<String>,
    /// Active vendor names with no GTN column.
    pub missing_in_gtn: Vec<String>,
}

pub fn coverage(mapping: &Mapping, gtn: &GtnTable, payrun: &PayrunTable) -> Coverage {
    let payrun_names = payrun_names(payrun);
    let gtn_names = gtn_names(gtn);

    let mut result = Coverage::default();
    for entry in mapping.active() {
        if !payrun_names.contains(&normalize_element(entry.key)) {
            result.missing_in_payrun.push(entry.key.to_string());
        }
        if !gtn_names.contains(&normalize_element(entry.vendor)) {
            result.missing_in_gtn.push(entry.vendor.to_string());
        }
    }
    debug!(
        missing_in_payrun = result.missing_in_payrun.len(),
        missing_in_gtn = result.missing_in_gtn.len(),
        "mapping coverage"
    );
    result
}

impl Coverage {
    /// Check 6: every active mapping key has a Payrun column.
    pub fn missing_in_payrun_verdict(&self) -> Verdict {
        names_verdict(
            CheckId::ElementsMissingInPayrun,
            "Missing mapped Payrun columns in headers",
            &self.missing_in_payrun,
        )
    }

    /// Check 7: every active vendor name has a GTN column.
    pub fn missing_in_gtn_verdict(&self) -> Verdict {
        names_verdict(
            CheckId::ElementsMissingInGtn,
            "Missing mapped GTN columns",
            &self.missing_in_gtn,
        )
    }
}

fn names_verdict(check: CheckId, prefix: &str, missing: &[String]) -> Verdict {
    if missing.is_empty() {
        return Verdict::pass(check);
    }
    let quoted: Vec<String> = missing.iter().map(|name| format!("'{name}'")).collect();
    Verdict::fail(
        check,
        ErrorKind::Referential,
        format!("{prefix}: [{}]", quoted.join(", ")),
        missing.to_vec(),
    )
}
