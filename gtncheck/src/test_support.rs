//! Test-only helpers for constructing tables, mappings and dataset folders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::header::HEADER_SCAN_ROWS;
use crate::core::mapping::{Mapping, MappingEntry};
use crate::core::rule_set::RuleSettings;
use crate::core::table::{Cell, ColumnKey, GtnTable, PayrunTable};

/// Zip local-file-header magic, enough to pass the signature sniff.
pub const XLSX_MAGIC: &[u8] = b"PK\x03\x04";

/// Flat GTN table from string labels.
pub fn gtn_table(columns: &[&str], rows: Vec<Vec<Cell>>) -> GtnTable {
    GtnTable::new(
        columns.iter().map(|column| column.to_string()).collect(),
        rows,
    )
}

/// Two-level Payrun table from `(group, label)` pairs.
pub fn payrun_table(columns: &[(&str, &str)], rows: Vec<Vec<Cell>>) -> PayrunTable {
    PayrunTable::new(
        columns
            .iter()
            .map(|(group, label)| ColumnKey::new(*group, *label))
            .collect(),
        rows,
    )
}

/// Mapping with every `(key, vendor)` pair active.
pub fn active_mapping(pairs: &[(&str, &str)]) -> Mapping {
    Mapping::new(
        pairs
            .iter()
            .map(|(key, vendor)| MappingEntry {
                key: key.to_string(),
                map: true,
                vendor: Some(vendor.to_string()),
            })
            .collect(),
    )
}

/// Default rule settings (`employee_id` / `Employee ID`, three scan rows).
pub fn settings() -> RuleSettings {
    RuleSettings {
        gtn_id_column: "employee_id".to_string(),
        payrun_id_group: "Employee ID".to_string(),
        header_scan_rows: HEADER_SCAN_ROWS,
    }
}

/// Create `root/name` with the given files and return its path.
pub fn write_dataset(root: &Path, name: &str, files: &[(&str, &[u8])]) -> std::io::Result<PathBuf> {
    let dir = root.join(name);
    fs::create_dir_all(&dir)?;
    for (file_name, contents) in files {
        fs::write(dir.join(file_name), contents)?;
    }
    Ok(dir)
}

/// A small mapping document with one active and one inactive entry.
pub fn mapping_json() -> &'static str {
    r#"{
  "mappings": {
    "Base Pay": { "map": true, "vendor": "GrossPay", "notes": "salary" },
    "Bonus": { "map": false, "vendor": "Bonus" }
  }
}
"#
}
