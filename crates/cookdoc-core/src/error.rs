//! Error types for cookdoc operations.

use std::path::PathBuf;

/// Errors that abort a cookdoc run.
///
/// Absent paths and versions are not errors; they are carried as optional
/// fields on [`crate::Cookbook`] and surface as check findings instead.
#[derive(Debug, thiserror::Error)]
pub enum CookdocError {
    /// An external program could not be found.
    #[error("{program} executable is not available in PATH")]
    NotInstalled { program: String },

    /// An external program ran but reported failure.
    #[error("command failed: {command} ({message})")]
    CommandFailed { command: String, message: String },

    /// The registry listing held an entry that is not a `name version` pair.
    #[error("malformed registry entry {entry:?}: expected `<name> <version>`")]
    MalformedRegistryEntry { entry: String },

    /// Filesystem failure while scanning search roots.
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

/// A local cookbook whose metadata descriptor exists but yields no version.
///
/// Scoped to one cookbook: the reconciler records it in that cookbook's slot
/// and keeps going with the rest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed metadata for cookbook {name} at {}: {detail}", .path.display())]
pub struct MalformedMetadata {
    pub name: String,
    pub path: PathBuf,
    pub detail: String,
}
