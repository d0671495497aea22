//! Merge the registry and local inventories into cookbook records.
//!
//! ```text
//! registry: VersionMap ─┐
//!                       ├─ union of names, sorted ─► resolve path ─► Cookbook
//! local: LocalInventory ┘                            (first root wins)
//! ```
//!
//! Path resolution and local discovery are independent: a name can carry a
//! local version yet have no resolved path if the two disagree. That record is
//! kept as-is and left to the checks.

use crate::cookbook::Cookbook;
use crate::error::{CookdocError, MalformedMetadata};
use crate::inventory::{LocalInventory, VersionMap, discover_local};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// One reconciled slot: a record, or the metadata error that prevented one.
pub type Reconciled = Result<Cookbook, MalformedMetadata>;

/// Merges inventories against an ordered list of local search roots.
#[derive(Debug, Clone)]
pub struct Reconciler {
    search_roots: Vec<PathBuf>,
}

impl Reconciler {
    pub fn new(search_roots: Vec<PathBuf>) -> Self {
        Self { search_roots }
    }

    /// Discover local cookbooks under this reconciler's search roots.
    pub fn discover(&self) -> Result<LocalInventory, CookdocError> {
        discover_local(&self.search_roots)
    }

    /// Produce one slot per name in the sorted union of both sources.
    pub fn reconcile(&self, registry: &VersionMap, local: &LocalInventory) -> Vec<Reconciled> {
        merged_names(registry, local)
            .into_iter()
            .map(|name| {
                if let Some(error) = local.malformed().get(&name) {
                    return Err(error.clone());
                }
                let path = resolve_path(&name, &self.search_roots);
                let server_version = registry.get(&name).cloned();
                let local_version = local.version(&name).map(str::to_string);
                Ok(Cookbook::new(name, path, server_version, local_version))
            })
            .collect()
    }
}

/// Sorted, deduplicated union of registry and local names.
pub fn merged_names(registry: &VersionMap, local: &LocalInventory) -> BTreeSet<String> {
    registry
        .keys()
        .chain(local.versions().keys())
        .chain(local.malformed().keys())
        .cloned()
        .collect()
}

/// First search root, in order, that holds a directory called `name`.
///
/// Only a single plain path component is joined. Absolute names, `.`, `..`
/// and names with a separator never resolve.
pub fn resolve_path(name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    if !is_plain_name(name) {
        return None;
    }
    roots
        .iter()
        .map(|root| root.join(name))
        .find(|candidate| candidate.is_dir())
}

fn is_plain_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}
