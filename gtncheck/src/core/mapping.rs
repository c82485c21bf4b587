//! Pay element mapping between Payrun and GTN column names.

use serde::Serialize;

/// One mapping record, keyed by its logical (Payrun) element name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub key: String,
    pub map: bool,
    /// GTN column name. Only guaranteed present on active entries.
    pub vendor: Option<String>,
}

/// Parsed mapping object. Entry order follows the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

/// Active entry view: both names are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEntry<'a> {
    pub key: &'a str,
    pub vendor: &'a str,
}

impl Mapping {
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Entries with `map == true`. Inactive entries never take part in checks.
    pub fn active(&self) -> impl Iterator<Item = ActiveEntry<'_>> + '_ {
        self.entries.iter().filter(|entry| entry.map).filter_map(|entry| {
            entry.vendor.as_deref().map(|vendor| ActiveEntry {
                key: entry.key.as_str(),
                vendor,
            })
        })
    }
}
