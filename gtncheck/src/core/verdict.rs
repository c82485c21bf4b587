//! Check identities, error taxonomy and per-check verdicts.
//!
//! These types are the stable contract between the rule set and reporting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight consistency checks, in their conventional numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    FileFormat,
    EmptyRows,
    SingleHeader,
    EmployeesMissingInGtn,
    EmployeesMissingInPayrun,
    ElementsMissingInPayrun,
    ElementsMissingInGtn,
    NumericElements,
}

impl CheckId {
    pub const ALL: [CheckId; 8] = [
        CheckId::FileFormat,
        CheckId::EmptyRows,
        CheckId::SingleHeader,
        CheckId::EmployeesMissingInGtn,
        CheckId::EmployeesMissingInPayrun,
        CheckId::ElementsMissingInPayrun,
        CheckId::ElementsMissingInGtn,
        CheckId::NumericElements,
    ];

    pub fn number(self) -> u8 {
        match self {
            CheckId::FileFormat => 1,
            CheckId::EmptyRows => 2,
            CheckId::SingleHeader => 3,
            CheckId::EmployeesMissingInGtn => 4,
            CheckId::EmployeesMissingInPayrun => 5,
            CheckId::ElementsMissingInPayrun => 6,
            CheckId::ElementsMissingInGtn => 7,
            CheckId::NumericElements => 8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CheckId::FileFormat => "file_format",
            CheckId::EmptyRows => "empty_rows",
            CheckId::SingleHeader => "single_header",
            CheckId::EmployeesMissingInGtn => "employees_missing_in_gtn",
            CheckId::EmployeesMissingInPayrun => "employees_missing_in_payrun",
            CheckId::ElementsMissingInPayrun => "elements_missing_in_payrun",
            CheckId::ElementsMissingInGtn => "elements_missing_in_gtn",
            CheckId::NumericElements => "numeric_elements",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CheckId::FileFormat => "GTN and Payrun files are spreadsheets",
            CheckId::EmptyRows => "GTN file has no empty rows",
            CheckId::SingleHeader => "GTN file has a single header row",
            CheckId::EmployeesMissingInGtn => "Payrun employees are present in GTN",
            CheckId::EmployeesMissingInPayrun => "GTN employees are present in Payrun",
            CheckId::ElementsMissingInPayrun => "mapped pay elements exist in Payrun headers",
            CheckId::ElementsMissingInGtn => "mapped vendor columns exist in GTN headers",
            CheckId::NumericElements => "mapped GTN pay element columns are numeric",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a check label (`empty_rows`) or number (`2`).
impl FromStr for CheckId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        CheckId::ALL
            .into_iter()
            .find(|check| check.label() == value || check.number().to_string() == value)
            .ok_or_else(|| format!("unknown check '{value}' (see `gtncheck checks`)"))
    }
}

/// Failure classes. `Load` marks dataset-level load failures, not a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "LoadError")]
    Load,
    #[serde(rename = "FormatError")]
    Format,
    #[serde(rename = "StructuralError")]
    Structural,
    #[serde(rename = "ReferentialError")]
    Referential,
    #[serde(rename = "NonNumericValueError")]
    NonNumericValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Load => "LoadError",
            ErrorKind::Format => "FormatError",
            ErrorKind::Structural => "StructuralError",
            ErrorKind::Referential => "ReferentialError",
            ErrorKind::NonNumericValue => "NonNumericValueError",
        })
    }
}

/// A failed check: message for humans plus the offending items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    pub offending: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Fail(Failure),
}

/// Result of one check on one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub check: CheckId,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl Verdict {
    pub fn pass(check: CheckId) -> Self {
        Self {
            check,
            outcome: CheckOutcome::Pass,
        }
    }

    pub fn fail(
        check: CheckId,
        kind: ErrorKind,
        message: impl Into<String>,
        offending: Vec<String>,
    ) -> Self {
        Self {
            check,
            outcome: CheckOutcome::Fail(Failure {
                kind,
                message: message.into(),
                offending,
            }),
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Pass)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            CheckOutcome::Pass => None,
            CheckOutcome::Fail(failure) => Some(failure),
        }
    }
}
