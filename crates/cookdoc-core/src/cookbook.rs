//! The merged cookbook record.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One cookbook's state across the registry and the local checkout.
///
/// Built once per reconciliation run and never mutated afterwards. At least
/// one of `path` and `server_version` is always present, because records are
/// only created for names that appear in one of the two sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cookbook {
    name: String,
    path: Option<PathBuf>,
    server_version: Option<String>,
    local_version: Option<String>,
    is_git_repo: bool,
}

impl Cookbook {
    /// Build a record, probing `path` for a `.git` marker.
    pub fn new(
        name: impl Into<String>,
        path: Option<PathBuf>,
        server_version: Option<String>,
        local_version: Option<String>,
    ) -> Self {
        let is_git_repo = path.as_deref().is_some_and(has_git_marker);
        Self::from_parts(name, path, server_version, local_version, is_git_repo)
    }

    /// Build a record with an explicit git flag, without touching the filesystem.
    ///
    /// The flag is forced to false when `path` is absent.
    pub fn from_parts(
        name: impl Into<String>,
        path: Option<PathBuf>,
        server_version: Option<String>,
        local_version: Option<String>,
        is_git_repo: bool,
    ) -> Self {
        let is_git_repo = is_git_repo && path.is_some();
        Self {
            name: name.into(),
            path,
            server_version,
            local_version,
            is_git_repo,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local directory, absent for registry-only cookbooks.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn server_version(&self) -> Option<&str> {
        self.server_version.as_deref()
    }

    pub fn local_version(&self) -> Option<&str> {
        self.local_version.as_deref()
    }

    /// True iff the local directory exists and carries a `.git` marker.
    pub fn is_git_repo(&self) -> bool {
        self.is_git_repo
    }
}

/// `.git` may be a directory (plain clone) or a file (worktree, submodule).
fn has_git_marker(path: &Path) -> bool {
    path.join(".git").exists()
}
