//! Consistency checks over a single cookbook.
//!
//! Every check reads only its own cookbook (plus git status through the
//! [`GitStatus`] port) and never looks at another check's outcome.

use crate::cookbook::Cookbook;
use crate::error::CookdocError;
use crate::ports::GitStatus;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// The five checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    LocalExists,
    ServerExists,
    VersionsMatch,
    NoUncommittedChanges,
    NoUnpushedCommits,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::LocalExists,
        Check::ServerExists,
        Check::VersionsMatch,
        Check::NoUncommittedChanges,
        Check::NoUnpushedCommits,
    ];

    /// Stable identifier used in reports.
    pub fn id(self) -> &'static str {
        match self {
            Check::LocalExists => "local_exists",
            Check::ServerExists => "server_exists",
            Check::VersionsMatch => "versions_match",
            Check::NoUncommittedChanges => "no_uncommitted_changes",
            Check::NoUnpushedCommits => "no_unpushed_commits",
        }
    }

    /// Evaluate against one cookbook. `Ok(None)` is a pass.
    ///
    /// The git checks pass without calling `git` when the cookbook is not a
    /// git working tree.
    pub fn evaluate(
        self,
        cookbook: &Cookbook,
        git: &dyn GitStatus,
    ) -> Result<Option<Finding>, CookdocError> {
        let finding = match self {
            Check::LocalExists => cookbook.path().is_none().then_some(Finding::MissingLocally),
            Check::ServerExists => cookbook
                .server_version()
                .is_none()
                .then_some(Finding::MissingOnServer),
            Check::VersionsMatch => match (cookbook.server_version(), cookbook.local_version()) {
                (Some(server), Some(local)) if server != local => Some(Finding::VersionMismatch {
                    server: server.to_string(),
                    local: local.to_string(),
                }),
                _ => None,
            },
            Check::NoUncommittedChanges => match git_path(cookbook) {
                Some(path) => uncommitted_changes(&git.short_status(path)?),
                None => None,
            },
            Check::NoUnpushedCommits => match git_path(cookbook) {
                Some(path) => unpushed_upstream(&git.full_status(path)?).map(|upstream| {
                    Finding::UnpushedCommits {
                        upstream: upstream.to_string(),
                    }
                }),
                None => None,
            },
        };
        Ok(finding)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Why a check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check")]
pub enum Finding {
    #[serde(rename = "local_exists")]
    MissingLocally,
    #[serde(rename = "server_exists")]
    MissingOnServer,
    #[serde(rename = "versions_match")]
    VersionMismatch { server: String, local: String },
    /// `status` is the short-status output with trailing whitespace removed.
    #[serde(rename = "no_uncommitted_changes")]
    UncommittedChanges { status: String },
    #[serde(rename = "no_unpushed_commits")]
    UnpushedCommits { upstream: String },
}

impl Finding {
    pub fn check(&self) -> Check {
        match self {
            Finding::MissingLocally => Check::LocalExists,
            Finding::MissingOnServer => Check::ServerExists,
            Finding::VersionMismatch { .. } => Check::VersionsMatch,
            Finding::UncommittedChanges { .. } => Check::NoUncommittedChanges,
            Finding::UnpushedCommits { .. } => Check::NoUnpushedCommits,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingLocally => f.write_str("exists on server but not locally"),
            Finding::MissingOnServer => f.write_str("exists locally but not on server"),
            Finding::VersionMismatch { server, local } => {
                write!(f, "server version {server} does not match local version {local}")
            }
            Finding::UncommittedChanges { status } => {
                write!(f, "uncommitted changes:\n{status}")
            }
            Finding::UnpushedCommits { upstream } => {
                write!(f, "unpushed commits ahead of {upstream}")
            }
        }
    }
}

fn git_path(cookbook: &Cookbook) -> Option<&std::path::Path> {
    cookbook.path().filter(|_| cookbook.is_git_repo())
}

fn uncommitted_changes(short_status: &str) -> Option<Finding> {
    let status = short_status.trim_end();
    (!status.trim_start().is_empty()).then(|| Finding::UncommittedChanges {
        status: status.to_string(),
    })
}

fn ahead_of_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Your branch is ahead of '?([^'\s]+)'?").expect("ahead-of regex must compile")
    })
}

/// Upstream ref named in an "ahead of" line of long-format status output.
///
/// Only the ahead state is detected; behind, diverged and untracked
/// branches yield `None`.
pub fn unpushed_upstream(full_status: &str) -> Option<&str> {
    ahead_of_re()
        .captures(full_status)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
