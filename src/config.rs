//! Config document handling - YAML load/save and the flatten/unflatten codec
//!
//! The user-facing document is nested by section (`dock: {size: 48}`); the
//! engine works on flat dotted keys (`dock.size`). The codec is pure; the
//! registry filter at the call site decides what actually reaches the engine.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use serde_yaml::{Mapping, Value};

use crate::defaults::PrefValue;
use crate::registry::Registry;

/// Flat dotted-key config, restricted to registry-known keys.
/// A `Vec` keeps the document's iteration order; keys are unique.
pub type FlatConfig = Vec<(String, PrefValue)>;

/// Load a config document from a file.
pub fn load_document(path: &Path) -> Result<Mapping> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_document(&contents)
}

/// Parse YAML text into a document. Empty input is an empty document.
pub fn parse_document(contents: &str) -> Result<Mapping> {
    if contents.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml::from_str(contents).context("Invalid YAML in config file")?;
    match value {
        Value::Mapping(doc) => Ok(doc),
        Value::Null => Ok(Mapping::new()),
        _ => bail!("Config file must be a mapping of sections"),
    }
}

/// Write a document to a file, creating parent directories as needed.
pub fn save_document(path: &Path, doc: &Mapping) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let yaml = serde_yaml::to_string(doc).context("Failed to serialize config")?;
    fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Flatten a nested document to dotted keys.
///
/// `{dock: {size: 48}}` becomes `[("dock.size", 48)]`. Depth-first, order
/// preserved within each level.
pub fn flatten(doc: &Mapping) -> Vec<(String, Value)> {
    let mut flat = Vec::new();
    flatten_into(doc, "", &mut flat);
    flat
}

fn flatten_into(doc: &Mapping, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in doc {
        let Some(name) = key.as_str() else { continue };
        let full = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            Value::Mapping(nested) => flatten_into(nested, &full, out),
            leaf => out.push((full, leaf.clone())),
        }
    }
}

/// Unflatten dotted keys back into a nested document. Inverse of [`flatten`]
/// for documents with scalar leaves and non-dotted section names.
pub fn unflatten(flat: &[(String, Value)]) -> Mapping {
    let mut root = Mapping::new();

    for (key, value) in flat {
        let mut parts: Vec<&str> = key.split('.').collect();
        let Some(leaf) = parts.pop() else { continue };

        let mut current = &mut root;
        for part in parts {
            let entry = current
                .entry(Value::String(part.to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            // A scalar squatting on a section path is undefined behavior;
            // replace it so the walk can continue.
            if !matches!(entry, Value::Mapping(_)) {
                *entry = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(nested) = entry else {
                unreachable!()
            };
            current = nested;
        }

        current.insert(Value::String(leaf.to_string()), value.clone());
    }

    root
}

/// Restrict a flattened document to registry-known keys.
///
/// Returns the typed flat config plus the sorted list of unknown keys for
/// the caller to warn about. A known key holding a non-scalar value is a
/// validation error.
pub fn filter_known(
    registry: &Registry,
    flat: Vec<(String, Value)>,
) -> Result<(FlatConfig, Vec<String>)> {
    let mut known = Vec::new();
    let mut unknown = Vec::new();

    for (key, value) in flat {
        if registry.lookup(&key).is_none() {
            unknown.push(key);
            continue;
        }
        let parsed: PrefValue = serde_yaml::from_value(value).map_err(|_| {
            anyhow::anyhow!("Invalid value for '{key}': expected a bool, number, or string")
        })?;
        known.push((key, parsed));
    }

    unknown.sort();
    Ok((known, unknown))
}
