// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-repo findings and run results.

use std::path::PathBuf;

use serde::Serialize;

/// Ordered, append-only list of findings for one repo.
///
/// A fresh report is created for every repo and discarded once printed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    findings: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding.
    pub fn push(&mut self, finding: impl Into<String>) {
        self.findings.push(finding.into());
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().map(String::as_str)
    }

    pub fn into_findings(self) -> Vec<String> {
        self.findings
    }
}

impl Extend<String> for Report {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.findings.extend(iter);
    }
}

/// Overall state of a repo after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoStatus {
    /// All checks ran and reported nothing.
    Ok,
    /// At least one finding.
    Warn,
    /// Repo path does not exist.
    Missing,
    /// Repo path exists but is not a git working copy.
    NotGit,
}

/// Result of processing a single repo.
#[derive(Debug, Clone, Serialize)]
pub struct RepoOutcome {
    pub name: String,
    pub path: PathBuf,
    pub status: RepoStatus,
    /// Findings in the order checks reported them.
    pub findings: Vec<String>,
}

impl RepoOutcome {
    /// Outcome of a repo whose checks ran.
    pub fn checked(name: impl Into<String>, path: impl Into<PathBuf>, report: Report) -> Self {
        let status = if report.is_empty() {
            RepoStatus::Ok
        } else {
            RepoStatus::Warn
        };
        Self {
            name: name.into(),
            path: path.into(),
            status,
            findings: report.into_findings(),
        }
    }

    /// Outcome of a repo that was skipped before any check ran.
    pub fn skipped(name: impl Into<String>, path: impl Into<PathBuf>, status: RepoStatus) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            status,
            findings: Vec::new(),
        }
    }
}

/// Aggregated results for a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// ISO 8601 timestamp.
    pub timestamp: String,

    pub repos: Vec<RepoOutcome>,
}

impl RunOutput {
    pub fn new(timestamp: String, repos: Vec<RepoOutcome>) -> Self {
        Self { timestamp, repos }
    }

    /// Count repos with the given status.
    pub fn count(&self, status: RepoStatus) -> usize {
        self.repos.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
