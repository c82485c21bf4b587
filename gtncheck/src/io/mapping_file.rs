//! `mapping.json` loading with schema validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::Deserialize;
use serde_json::Value;

use crate::core::mapping::{Mapping, MappingEntry};

const MAPPING_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/mapping/v1.schema.json"
));

/// Fields the validator reads from each entry; everything else is ignored.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    map: bool,
    #[serde(default)]
    vendor: Option<String>,
}

/// Load and validate a mapping document from disk.
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read mapping {}", path.display()))?;
    parse_mapping(&contents).with_context(|| format!("load mapping {}", path.display()))
}

/// Parse mapping JSON text, preserving entry order.
pub fn parse_mapping(contents: &str) -> Result<Mapping> {
    let value: Value = serde_json::from_str(contents).context("parse mapping json")?;
    validate_schema(&value)?;

    let Some(mappings) = value.get("mappings").and_then(Value::as_object) else {
        return Err(anyhow!("mapping document has no 'mappings' object"));
    };
    let mut entries = Vec::with_capacity(mappings.len());
    for (key, raw) in mappings {
        let raw: RawEntry = serde_json::from_value(raw.clone())
            .with_context(|| format!("deserialize mapping entry '{key}'"))?;
        entries.push(MappingEntry {
            key: key.clone(),
            map: raw.map,
            vendor: raw.vendor,
        });
    }
    Ok(Mapping::new(entries))
}

fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(MAPPING_SCHEMA).context("parse mapping schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(anyhow!(
            "mapping schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
