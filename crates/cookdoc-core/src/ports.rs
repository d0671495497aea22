//! Collaborator interfaces.
//!
//! The core decides; adapters fetch. Everything that would otherwise spawn
//! a process or print goes through one of these traits, so tests can swap
//! in fakes.

use crate::check::Finding;
use crate::error::{CookdocError, MalformedMetadata};
use std::path::Path;

/// Source of the registry's cookbook listing.
pub trait RegistrySource {
    /// Raw `name version` entries, one per element.
    fn list_cookbooks(&self) -> Result<Vec<String>, CookdocError>;
}

/// Git working-tree status for a cookbook directory.
pub trait GitStatus {
    /// Literal stdout of a short-format status in `path`.
    fn short_status(&self, path: &Path) -> Result<String, CookdocError>;

    /// Literal stdout of a long-format status in `path`.
    fn full_status(&self, path: &Path) -> Result<String, CookdocError>;
}

/// Receives exactly one event per reconciled cookbook.
pub trait Reporter {
    fn report_success(&mut self, name: &str);

    /// `findings` are in check order and never empty.
    fn report_failure(&mut self, name: &str, findings: &[Finding]);

    /// The cookbook's local metadata could not be parsed; no checks ran.
    fn report_malformed(&mut self, error: &MalformedMetadata);
}
