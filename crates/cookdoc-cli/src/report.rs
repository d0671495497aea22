//! Text and JSON renderings of a check run.

use cookdoc_core::{Finding, MalformedMetadata, Reporter, RunSummary};
use serde::Serialize;
use std::fmt::Write as _;

const REPORT_KIND: &str = "cookdoc.check_report.v1";

/// Line-oriented report, buffered until the run completes.
#[derive(Debug, Default)]
pub struct TextReporter {
    out: String,
}

impl TextReporter {
    pub fn finish(mut self, summary: &RunSummary) -> String {
        let verdict = if summary.is_clean() { "OK" } else { "FAIL" };
        let _ = writeln!(
            self.out,
            "[cookdoc] {verdict} (cookbooks={}, passed={}, failed={}, malformed={})",
            summary.total, summary.passed, summary.failed, summary.malformed
        );
        self.out
    }

    fn push_detail(&mut self, message: &str) {
        let mut lines = message.lines();
        if let Some(first) = lines.next() {
            let _ = writeln!(self.out, "  - {first}");
        }
        for line in lines {
            let _ = writeln!(self.out, "    {line}");
        }
    }
}

impl Reporter for TextReporter {
    fn report_success(&mut self, name: &str) {
        let _ = writeln!(self.out, "OK {name}");
    }

    fn report_failure(&mut self, name: &str, findings: &[Finding]) {
        let _ = writeln!(self.out, "FAIL {name}");
        for finding in findings {
            self.push_detail(&finding.to_string());
        }
    }

    fn report_malformed(&mut self, error: &MalformedMetadata) {
        let _ = writeln!(self.out, "MALFORMED {}", error.name);
        self.push_detail(&error.to_string());
    }
}

#[derive(Debug, Serialize)]
struct FindingRow {
    #[serde(flatten)]
    finding: Finding,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CookbookRow {
    name: String,
    result: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    findings: Vec<FindingRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    schema: u32,
    report_kind: &'static str,
    result: &'static str,
    summary: RunSummary,
    cookbooks: Vec<CookbookRow>,
}

/// Collects rows for a single JSON document.
#[derive(Debug, Default)]
pub struct JsonReporter {
    rows: Vec<CookbookRow>,
}

impl JsonReporter {
    pub fn finish(self, summary: RunSummary) -> JsonReport {
        JsonReport {
            schema: 1,
            report_kind: REPORT_KIND,
            result: if summary.is_clean() {
                "accepted"
            } else {
                "rejected"
            },
            summary,
            cookbooks: self.rows,
        }
    }
}

impl Reporter for JsonReporter {
    fn report_success(&mut self, name: &str) {
        self.rows.push(CookbookRow {
            name: name.to_string(),
            result: "ok",
            findings: Vec::new(),
            error: None,
        });
    }

    fn report_failure(&mut self, name: &str, findings: &[Finding]) {
        self.rows.push(CookbookRow {
            name: name.to_string(),
            result: "failed",
            findings: findings
                .iter()
                .map(|finding| FindingRow {
                    finding: finding.clone(),
                    message: finding.to_string(),
                })
                .collect(),
            error: None,
        });
    }

    fn report_malformed(&mut self, error: &MalformedMetadata) {
        self.rows.push(CookbookRow {
            name: error.name.clone(),
            result: "malformed",
            findings: Vec::new(),
            error: Some(error.to_string()),
        });
    }
}
