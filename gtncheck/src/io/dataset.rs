//! Dataset folder discovery, source inventory and loading.
//!
//! A dataset folder holds a GTN export, a Payrun export and a mapping
//! document. Spreadsheets are located by case-insensitive file stem.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::core::format::{Signature, SourceFile, SourceInventory};
use crate::core::rule_set::LoadedDataset;
use crate::io::config::ValidatorConfig;
use crate::io::mapping_file::load_mapping;
use crate::io::workbook::{read_gtn, read_payrun};

const SIGNATURE_LEN: u64 = 8;

/// Fatal load failure for one dataset. No loaded-data checks run after it.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("Failed to load {file} in {dataset}. Error: {cause}")]
pub struct LoadError {
    pub dataset: String,
    pub file: String,
    pub cause: String,
}

impl LoadError {
    pub fn new(dataset: &str, file: impl Into<String>, cause: &anyhow::Error) -> Self {
        Self {
            dataset: dataset.to_string(),
            file: file.into(),
            cause: format!("{cause:#}"),
        }
    }
}

/// Display name for a dataset folder.
pub fn dataset_name(folder: &Path) -> String {
    folder.display().to_string()
}

/// Subdirectories of `root`, sorted by path. Hidden directories are skipped.
pub fn discover_datasets(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let entry = entry.context("read entry")?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if path.is_dir() && !hidden {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Locate the file in `folder` whose stem equals `stem`, ignoring case.
///
/// When several files share the stem, one with an accepted extension wins;
/// ties resolve by file name.
pub fn find_by_stem(folder: &Path, stem: &str, accepted: &[String]) -> Result<Option<PathBuf>> {
    let mut matches = Vec::new();
    for entry in fs::read_dir(folder).with_context(|| format!("read {}", folder.display()))? {
        let entry = entry.context("read entry")?;
        let path = entry.path();
        let stem_matches = path
            .file_stem()
            .and_then(|value| value.to_str())
            .is_some_and(|value| value.eq_ignore_ascii_case(stem));
        if path.is_file() && stem_matches {
            matches.push(path);
        }
    }
    matches.sort();
    let preferred = matches
        .iter()
        .position(|path| has_accepted_extension(path, accepted))
        .unwrap_or(0);
    Ok(matches.into_iter().nth(preferred))
}

fn has_accepted_extension(path: &Path, accepted: &[String]) -> bool {
    extension_of(path).is_some_and(|ext| accepted.iter().any(|a| a.eq_ignore_ascii_case(&ext)))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_string())
}

/// Describe a located file; leading bytes are sniffed when readable.
pub fn describe_source(path: &Path) -> SourceFile {
    let signature = read_head(path).ok().map(|head| Signature::sniff(&head));
    SourceFile {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        extension: extension_of(path),
        signature,
    }
}

fn read_head(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut head = Vec::with_capacity(SIGNATURE_LEN as usize);
    file.take(SIGNATURE_LEN)
        .read_to_end(&mut head)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(head)
}

/// Raw inventory of the two spreadsheets in `folder`.
pub fn inventory(folder: &Path, config: &ValidatorConfig) -> Result<SourceInventory> {
    let accepted = &config.accepted_extensions;
    let gtn = find_by_stem(folder, &config.files.gtn_stem, accepted)?;
    let payrun = find_by_stem(folder, &config.files.payrun_stem, accepted)?;
    Ok(SourceInventory {
        folder: dataset_name(folder),
        gtn: gtn.as_deref().map(describe_source),
        payrun: payrun.as_deref().map(describe_source),
    })
}

/// Load GTN, Payrun and mapping, in that order. The first failure is fatal.
#[instrument(skip_all, fields(dataset = %folder.display()))]
pub fn load_dataset(folder: &Path, config: &ValidatorConfig) -> Result<LoadedDataset, LoadError> {
    let dataset = dataset_name(folder);
    let accepted = &config.accepted_extensions;

    let gtn_path = locate(folder, &config.files.gtn_stem, accepted).map_err(|err| {
        LoadError::new(&dataset, format!("{} file", config.files.gtn_stem), &err)
    })?;
    let gtn =
        read_gtn(&gtn_path).map_err(|err| LoadError::new(&dataset, file_label(&gtn_path), &err))?;
    debug!(columns = gtn.columns().len(), rows = gtn.row_count(), "loaded GTN");

    let payrun_path = locate(folder, &config.files.payrun_stem, accepted).map_err(|err| {
        LoadError::new(&dataset, format!("{} file", config.files.payrun_stem), &err)
    })?;
    let payrun = read_payrun(&payrun_path)
        .map_err(|err| LoadError::new(&dataset, file_label(&payrun_path), &err))?;
    debug!(columns = payrun.columns().len(), rows = payrun.row_count(), "loaded Payrun");

    let mapping_path = folder.join(&config.files.mapping);
    let mapping = load_mapping(&mapping_path)
        .map_err(|err| LoadError::new(&dataset, config.files.mapping.clone(), &err))?;
    debug!(entries = mapping.entries().len(), "loaded mapping");

    Ok(LoadedDataset {
        gtn,
        payrun,
        mapping,
    })
}

fn locate(folder: &Path, stem: &str, accepted: &[String]) -> Result<PathBuf> {
    find_by_stem(folder, stem, accepted)?
        .with_context(|| format!("no file named '{stem}' found in {}", folder.display()))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
