use crate::command::run_capture;
use cookdoc_core::{CookdocError, RegistrySource};

pub const DEFAULT_PROGRAM: &str = "knife";
pub const DEFAULT_ARGS: [&str; 2] = ["cookbook", "list"];

/// [`RegistrySource`] that runs a listing command, `knife cookbook list` by
/// default, and yields one entry per non-blank stdout line.
#[derive(Debug, Clone)]
pub struct KnifeRegistry {
    program: String,
    args: Vec<String>,
}

impl KnifeRegistry {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for KnifeRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect(),
        )
    }
}

impl RegistrySource for KnifeRegistry {
    fn list_cookbooks(&self) -> Result<Vec<String>, CookdocError> {
        let stdout = run_capture(&self.program, &self.args, None, &[])?;
        Ok(listing_lines(&stdout))
    }
}

fn listing_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
