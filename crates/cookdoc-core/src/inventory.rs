//! Inventory parsing: the registry listing and local cookbook discovery.
//!
//! Both sources reduce to a name -> version map. Local discovery additionally
//! keeps the cookbooks whose metadata it could not read, so the reconciler
//! can report them in place instead of dropping them.

use crate::error::{CookdocError, MalformedMetadata};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name -> version, iterated in name order.
pub type VersionMap = BTreeMap<String, String>;

pub const METADATA_RB: &str = "metadata.rb";
pub const METADATA_JSON: &str = "metadata.json";

/// Parse registry entries of the form `<name> <version>`.
///
/// Blank entries are skipped. A repeated name keeps its first version.
pub fn parse_registry_listing<I, S>(entries: I) -> Result<VersionMap, CookdocError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut versions = VersionMap::new();
    for entry in entries {
        let entry = entry.as_ref().trim();
        if entry.is_empty() {
            continue;
        }
        let mut tokens = entry.split_whitespace();
        let (Some(name), Some(version), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(CookdocError::MalformedRegistryEntry {
                entry: entry.to_string(),
            });
        };
        if versions.contains_key(name) {
            tracing::warn!(cookbook = name, version, "duplicate registry entry ignored");
            continue;
        }
        versions.insert(name.to_string(), version.to_string());
    }
    Ok(versions)
}

/// Cookbooks found under the local search roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalInventory {
    versions: VersionMap,
    malformed: BTreeMap<String, MalformedMetadata>,
}

impl LocalInventory {
    /// Inventory from already-known versions, for callers that discover
    /// cookbooks some other way.
    pub fn from_versions(versions: VersionMap) -> Self {
        Self {
            versions,
            malformed: BTreeMap::new(),
        }
    }

    pub fn versions(&self) -> &VersionMap {
        &self.versions
    }

    pub fn malformed(&self) -> &BTreeMap<String, MalformedMetadata> {
        &self.malformed
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    /// True if `name` was found locally, readable or not.
    pub fn contains(&self, name: &str) -> bool {
        self.versions.contains_key(name) || self.malformed.contains_key(name)
    }

    pub fn insert_malformed(&mut self, error: MalformedMetadata) {
        self.malformed.insert(error.name.clone(), error);
    }
}

/// Scan `roots` in order for immediate subdirectories holding a metadata file.
///
/// Missing roots are skipped. The first root to provide a name wins.
pub fn discover_local(roots: &[PathBuf]) -> Result<LocalInventory, CookdocError> {
    let mut inventory = LocalInventory::default();
    for root in roots {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "search root does not exist, skipping");
            continue;
        }
        for dir in subdirectories(root)? {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                continue;
            };
            if inventory.contains(&name) {
                tracing::warn!(
                    cookbook = %name,
                    path = %dir.display(),
                    "shadowed by an earlier search root"
                );
                continue;
            }
            match read_local_version(&name, &dir)? {
                None => {}
                Some(Ok(version)) => {
                    inventory.versions.insert(name, version);
                }
                Some(Err(error)) => {
                    tracing::warn!(cookbook = %name, detail = %error.detail, "malformed metadata");
                    inventory.insert_malformed(error);
                }
            }
        }
    }
    Ok(inventory)
}

fn subdirectories(root: &Path) -> Result<Vec<PathBuf>, CookdocError> {
    let io_error = |e: std::io::Error| CookdocError::Io {
        path: root.to_path_buf(),
        message: e.to_string(),
    };
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// `None` when `dir` holds no metadata descriptor and is not a cookbook.
fn read_local_version(
    name: &str,
    dir: &Path,
) -> Result<Option<Result<String, MalformedMetadata>>, CookdocError> {
    let (path, parse): (PathBuf, fn(&str) -> Result<String, String>) =
        if dir.join(METADATA_RB).is_file() {
            (dir.join(METADATA_RB), parse_metadata_rb)
        } else if dir.join(METADATA_JSON).is_file() {
            (dir.join(METADATA_JSON), parse_metadata_json)
        } else {
            return Ok(None);
        };
    let text = fs::read_to_string(&path).map_err(|e| CookdocError::Io {
        path: path.clone(),
        message: e.to_string(),
    })?;
    Ok(Some(parse(&text).map_err(|detail| MalformedMetadata {
        name: name.to_string(),
        path,
        detail,
    })))
}

/// Extract the version from a Ruby metadata descriptor.
///
/// The first line whose first token is `version` is the marker line; the rest
/// of it must be a single quoted literal.
pub fn parse_metadata_rb(text: &str) -> Result<String, String> {
    let marker = text.lines().map(str::trim).find(|line| {
        line.split_whitespace().next() == Some("version")
    });
    let Some(line) = marker else {
        return Err("no `version` line".to_string());
    };
    let literal = line["version".len()..].trim();
    unquote(literal)
        .map(str::to_string)
        .ok_or_else(|| format!("expected a single quoted version literal, got {literal:?}"))
}

fn unquote(literal: &str) -> Option<&str> {
    let quote = literal.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = literal.strip_prefix(quote)?.strip_suffix(quote)?;
    if inner.is_empty() || inner.contains(['\'', '"']) {
        return None;
    }
    Some(inner)
}

/// Extract the top-level `version` string from a JSON metadata descriptor.
pub fn parse_metadata_json(text: &str) -> Result<String, String> {
    let payload: Value = serde_json::from_str(text).map_err(|e| format!("invalid json: {e}"))?;
    match payload.get("version").and_then(Value::as_str).map(str::trim) {
        Some(version) if !version.is_empty() => Ok(version.to_string()),
        _ => Err("missing string field `version`".to_string()),
    }
}
