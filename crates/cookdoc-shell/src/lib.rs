//! Process adapters for the cookdoc ports.
//!
//! This crate is intentionally thin: it shells out to `git` and to the
//! registry listing command and hands their stdout back verbatim. All
//! interpretation lives in `cookdoc-core`.

mod command;
mod git;
mod knife;

pub use git::GitCli;
pub use knife::KnifeRegistry;
