//! Apply every check to every reconciled cookbook and report the outcome.

use crate::check::{Check, Finding};
use crate::cookbook::Cookbook;
use crate::error::CookdocError;
use crate::ports::{GitStatus, Reporter};
use crate::reconcile::Reconciled;
use serde::Serialize;

/// Counts for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub malformed: usize,
}

impl RunSummary {
    /// Nothing failed and every local cookbook was readable.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.malformed == 0
    }
}

/// Runs [`Check::ALL`] over cookbooks, sequentially and in the given order.
pub struct Runner<'a> {
    git: &'a dyn GitStatus,
}

impl<'a> Runner<'a> {
    pub fn new(git: &'a dyn GitStatus) -> Self {
        Self { git }
    }

    /// All findings for one cookbook, in check order. Empty means it passes.
    pub fn evaluate(&self, cookbook: &Cookbook) -> Result<Vec<Finding>, CookdocError> {
        let mut findings = Vec::new();
        for check in Check::ALL {
            if let Some(finding) = check.evaluate(cookbook, self.git)? {
                tracing::debug!(cookbook = cookbook.name(), %check, "check failed");
                findings.push(finding);
            }
        }
        Ok(findings)
    }

    /// Evaluate each entry and emit one reporter event for it.
    ///
    /// A collaborator error aborts the run; cookbooks already reported stay
    /// reported.
    pub fn run(
        &self,
        entries: &[Reconciled],
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, CookdocError> {
        let mut summary = RunSummary {
            total: entries.len(),
            ..RunSummary::default()
        };
        for entry in entries {
            match entry {
                Ok(cookbook) => {
                    let findings = self.evaluate(cookbook)?;
                    if findings.is_empty() {
                        summary.passed += 1;
                        reporter.report_success(cookbook.name());
                    } else {
                        summary.failed += 1;
                        reporter.report_failure(cookbook.name(), &findings);
                    }
                }
                Err(error) => {
                    summary.malformed += 1;
                    reporter.report_malformed(error);
                }
            }
        }
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            malformed = summary.malformed,
            "check run complete"
        );
        Ok(summary)
    }
}
