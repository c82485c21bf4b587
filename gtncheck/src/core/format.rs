//! File-type precondition (check 1).
//!
//! Operates on the raw file inventory of a dataset folder, before any
//! spreadsheet parsing happens.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::core::verdict::{CheckId, ErrorKind, Verdict};

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Which export a source file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRole {
    Gtn,
    Payrun,
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceRole::Gtn => "GTN",
            SourceRole::Payrun => "Payrun",
        })
    }
}

/// Container format recognised from a file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signature {
    /// ZIP container (`xlsx`, `xlsm`).
    Zip,
    /// OLE2 compound document (legacy `xls`).
    Ole2,
    Unknown,
}

impl Signature {
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(&ZIP_MAGIC) {
            Signature::Zip
        } else if head.starts_with(&OLE2_MAGIC) {
            Signature::Ole2
        } else {
            Signature::Unknown
        }
    }

    /// Signature a file with `extension` is expected to carry, if known.
    pub fn expected_for(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(Signature::Zip),
            "xls" => Some(Signature::Ole2),
            _ => None,
        }
    }
}

/// A located source file. `signature` is `None` when the file could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub file_name: String,
    pub extension: Option<String>,
    pub signature: Option<Signature>,
}

/// Raw view of the two spreadsheet sources in one dataset folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInventory {
    pub folder: String,
    pub gtn: Option<SourceFile>,
    pub payrun: Option<SourceFile>,
}

impl SourceInventory {
    pub fn get(&self, role: SourceRole) -> Option<&SourceFile> {
        match role {
            SourceRole::Gtn => self.gtn.as_ref(),
            SourceRole::Payrun => self.payrun.as_ref(),
        }
    }
}

/// Check 1: both sources exist and are accepted spreadsheet formats.
///
/// Extension comparison is case-insensitive. When the leading bytes were
/// read, they must match the container format implied by the extension.
pub fn check_file_format(inventory: &SourceInventory, accepted_extensions: &[String]) -> Verdict {
    let mut problems = Vec::new();
    let mut offending = Vec::new();

    for role in [SourceRole::Gtn, SourceRole::Payrun] {
        let Some(file) = inventory.get(role) else {
            problems.push(format!("No {role} file found in {}", inventory.folder));
            offending.push(format!("{role} (missing)"));
            continue;
        };

        let extension = file.extension.as_deref().unwrap_or_default();
        let accepted = accepted_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(extension));
        if !accepted {
            problems.push(format!(
                "{role} file is not an Excel format: {}",
                file.file_name
            ));
            offending.push(file.file_name.clone());
            continue;
        }

        if let (Some(expected), Some(found)) = (Signature::expected_for(extension), file.signature)
            && expected != found
        {
            problems.push(format!(
                "{role} file content does not match its .{extension} extension: {}",
                file.file_name
            ));
            offending.push(file.file_name.clone());
        }
    }

    debug!(folder = %inventory.folder, problems = problems.len(), "file format check");
    if problems.is_empty() {
        Verdict::pass(CheckId::FileFormat)
    } else {
        Verdict::fail(
            CheckId::FileFormat,
            ErrorKind::Format,
            problems.join("; "),
            offending,
        )
    }
}
