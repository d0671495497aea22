use crate::command::run_capture;
use cookdoc_core::{CookdocError, GitStatus};
use std::path::Path;

/// Pins git's message catalog so long-format status text stays in English.
const GIT_ENV: &[(&str, &str)] = &[("LC_ALL", "C")];

/// [`GitStatus`] backed by the `git` CLI, run inside the cookbook directory.
///
/// Runs with `LC_ALL=C` regardless of the caller's locale.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn status(&self, path: &Path, extra: &[&str]) -> Result<String, CookdocError> {
        let args: Vec<String> = std::iter::once("status")
            .chain(extra.iter().copied())
            .map(str::to_string)
            .collect();
        run_capture(&self.program, &args, Some(path), GIT_ENV)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitStatus for GitCli {
    fn short_status(&self, path: &Path) -> Result<String, CookdocError> {
        self.status(path, &["--short"])
    }

    fn full_status(&self, path: &Path) -> Result<String, CookdocError> {
        self.status(path, &[])
    }
}
