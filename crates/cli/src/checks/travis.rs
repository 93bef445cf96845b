// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CI language-version check.
//!
//! Compares the python versions declared in `.travis.yml` with the
//! globally accepted list. Read-only: the CI file is never rewritten.

use std::cmp::Ordering;
use std::sync::Arc;

use anyhow::Context;
use serde_yaml::Value;

use super::{CheckModule, version};
use crate::check::{Check, CheckContext, CheckDescriptor};
use crate::check_descriptor;
use crate::config::{GlobalConfig, LocalConfig, version_string};
use crate::report::Report;

/// CI configuration file inspected by this check.
pub const TRAVIS_FILE: &str = ".travis.yml";

/// Version tag for the development build in the CI matrix.
const NIGHTLY: &str = "nightly";

pub const CHECKS: &[CheckDescriptor] = &[check_descriptor!(
    TravisCheck,
    name: "travis",
    order: 10,
)];

pub const MODULE: CheckModule = CheckModule {
    path: module_path!(),
    members: CHECKS,
};

pub struct TravisCheck {
    config: Arc<GlobalConfig>,
}

impl TravisCheck {
    pub fn new(config: Arc<GlobalConfig>) -> Self {
        Self { config }
    }

    /// Versions the CI matrix should declare for this repo.
    pub fn expected_versions(&self, local: &LocalConfig) -> Vec<String> {
        let mut want = self.config.travis.python.versions.clone();
        if local.travis.python.nightly {
            want.push(NIGHTLY.to_string());
        }
        want
    }
}

impl Check for TravisCheck {
    fn check_repo(&self, ctx: &CheckContext<'_>, report: &mut Report) -> anyhow::Result<()> {
        let path = ctx.repo.path.join(TRAVIS_FILE);
        if ctx.local.travis.skip || !path.is_file() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let travis: Value = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {TRAVIS_FILE}"))?;

        if travis.get("language").and_then(Value::as_str) != Some("python") {
            return Ok(());
        }

        let mut got = declared_versions(travis.get("python"))
            .with_context(|| format!("invalid `python` list in {TRAVIS_FILE}"))?;
        got.sort_by(|a, b| ci_order(a, b));
        let want = self.expected_versions(ctx.local);

        if got != want {
            report.push(format!(
                "{TRAVIS_FILE}: python={}, should be {}",
                py_list(&got),
                py_list(&want)
            ));
        }
        Ok(())
    }
}

/// Versions listed under `python:`; a single scalar counts as one entry.
fn declared_versions(value: Option<&Value>) -> Result<Vec<String>, serde_yaml::Error> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items.iter().map(version_string).collect(),
        Some(scalar) => Ok(vec![version_string::<serde_yaml::Error>(scalar)?]),
    }
}

/// Order CI versions numerically, with named builds such as `nightly` last.
fn ci_order(a: &str, b: &str) -> Ordering {
    let numeric = |s: &str| s.starts_with(|c: char| c.is_ascii_digit());
    match (numeric(a), numeric(b)) {
        (true, true) => version::compare(a, b).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Render a list as `['3.8', '3.9']`.
fn py_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("'{i}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
#[path = "travis_tests.rs"]
mod tests;
