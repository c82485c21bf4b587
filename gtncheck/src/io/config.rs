//! Validator configuration stored in `gtncheck.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::header::HEADER_SCAN_ROWS;
use crate::core::rule_set::RuleSettings;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "gtncheck.toml";

/// Validator configuration (TOML).
///
/// Missing fields default to the conventions of the GTN/Payrun exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// GTN employee identifier column label.
    pub gtn_id_column: String,

    /// Outer (group) label of the Payrun employee identifier column.
    pub payrun_id_group: String,

    /// Number of leading GTN data rows inspected for a second header.
    pub header_scan_rows: usize,

    /// Accepted spreadsheet extensions, compared case-insensitively.
    pub accepted_extensions: Vec<String>,

    pub files: FilesConfig,
}

/// Names of the three inputs inside a dataset folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilesConfig {
    /// File stem of the GTN export (case-insensitive).
    pub gtn_stem: String,
    /// File stem of the Payrun export (case-insensitive).
    pub payrun_stem: String,
    /// Exact file name of the mapping document.
    pub mapping: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            gtn_stem: "gtn".to_string(),
            payrun_stem: "payrun".to_string(),
            mapping: "mapping.json".to_string(),
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            gtn_id_column: "employee_id".to_string(),
            payrun_id_group: "Employee ID".to_string(),
            header_scan_rows: HEADER_SCAN_ROWS,
            accepted_extensions: vec!["xlsx".to_string(), "xls".to_string(), "xlsm".to_string()],
            files: FilesConfig::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.gtn_id_column.trim().is_empty() {
            return Err(anyhow!("gtn_id_column must be non-empty"));
        }
        if self.payrun_id_group.trim().is_empty() {
            return Err(anyhow!("payrun_id_group must be non-empty"));
        }
        if self.header_scan_rows == 0 {
            return Err(anyhow!("header_scan_rows must be > 0"));
        }
        if self.accepted_extensions.is_empty()
            || self
                .accepted_extensions
                .iter()
                .any(|ext| ext.trim().is_empty() || ext.starts_with('.'))
        {
            return Err(anyhow!(
                "accepted_extensions must be a non-empty array of extensions without dots"
            ));
        }
        if self.files.gtn_stem.trim().is_empty() || self.files.payrun_stem.trim().is_empty() {
            return Err(anyhow!("files.gtn_stem and files.payrun_stem must be non-empty"));
        }
        if self.files.gtn_stem.eq_ignore_ascii_case(&self.files.payrun_stem) {
            return Err(anyhow!("files.gtn_stem and files.payrun_stem must differ"));
        }
        if self.files.mapping.trim().is_empty() {
            return Err(anyhow!("files.mapping must be non-empty"));
        }
        Ok(())
    }

    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            gtn_id_column: self.gtn_id_column.clone(),
            payrun_id_group: self.payrun_id_group.clone(),
            header_scan_rows: self.header_scan_rows,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ValidatorConfig::default()`.
pub fn load_config(path: &Path) -> Result<ValidatorConfig> {
    if !path.exists() {
        let cfg = ValidatorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ValidatorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
