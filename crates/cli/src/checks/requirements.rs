// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency freshness check.
//!
//! Finds pinned `name==version` requirements, asks the package index for
//! the latest release of each, and rewrites outdated pins in place.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use super::{CheckModule, version};
use crate::check::{Check, CheckContext, CheckDescriptor};
use crate::check_descriptor;
use crate::config::{GlobalConfig, RequirementsLocal};
use crate::report::Report;
use crate::tools::{Invocation, ToolError, ToolRunner};

/// Requirement files picked up without configuration, in priority order.
const DEFAULT_PATTERNS: &[&str] = &["requirements.txt", "requirements/*.txt"];

/// Variant files matched in the repo root.
const VARIANT_PATTERN: &str = "requirements-*.txt";

/// `name[extras]==version` at the start of a requirement line.
#[allow(clippy::expect_used)]
static PIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*==\s*([^\s;#,]+)")
        .expect("valid regex")
});

/// First line of `pip index versions`: `name (version)`.
#[allow(clippy::expect_used)]
static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+ \(([^)\s]+)\)").expect("valid regex"));

pub const CHECKS: &[CheckDescriptor] = &[check_descriptor!(
    RequirementsCheck,
    name: "requirements",
    order: 20,
)];

pub const MODULE: CheckModule = CheckModule {
    path: module_path!(),
    members: CHECKS,
};

pub struct RequirementsCheck {
    config: Arc<GlobalConfig>,
}

/// A pinned requirement within a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    pub name: String,
    pub version: String,
    /// Zero-based line index.
    pub line: usize,
}

/// An upgrade applied to the requirement files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upgrade {
    pub name: String,
    pub current: String,
    pub latest: String,
}

impl RequirementsCheck {
    pub fn new(config: Arc<GlobalConfig>) -> Self {
        Self { config }
    }

    /// Latest release of `package` according to the package index.
    fn latest_version(
        &self,
        tools: &dyn ToolRunner,
        root: &Path,
        package: &str,
    ) -> Result<String, ToolError> {
        let invocation = Invocation::new(&self.config.requirements.pip, root)
            .args(["index", "versions", package]);
        let stdout = tools.run(&invocation)?;
        parse_index_output(&stdout).ok_or_else(|| {
            ToolError::output(&invocation, format!("no version found for {package}"))
        })
    }
}

impl Check for RequirementsCheck {
    fn check_repo(&self, ctx: &CheckContext<'_>, report: &mut Report) -> anyhow::Result<()> {
        let local = &ctx.local.requirements;
        if local.skip {
            return Ok(());
        }

        let root = &ctx.repo.path;
        let files = requirement_files(root, local)?;
        if files.is_empty() {
            return Ok(());
        }
        tracing::debug!("{}: requirement files {:?}", ctx.repo.name, files);

        let mut contents = Vec::with_capacity(files.len());
        for file in &files {
            let path = root.join(file);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            contents.push(content);
        }

        // Distinct pinned versions per package, keyed case-insensitively.
        let mut pinned: BTreeMap<String, (String, Vec<String>)> = BTreeMap::new();
        for content in &contents {
            for pin in parse_pins(content) {
                let (_, versions) = pinned
                    .entry(pin.name.to_ascii_lowercase())
                    .or_insert_with(|| (pin.name.clone(), Vec::new()));
                if !versions.contains(&pin.version) {
                    versions.push(pin.version);
                }
            }
        }

        let mut latest: BTreeMap<String, String> = BTreeMap::new();
        let mut upgrades = Vec::new();
        for (key, (name, versions)) in &pinned {
            if local.ignores(name) {
                continue;
            }
            let newest = self
                .latest_version(ctx.tools, root, name)
                .with_context(|| format!("failed to look up {name}"))?;
            let stale: Vec<&String> = versions
                .iter()
                .filter(|pin| version::compare(&newest, pin) == Ordering::Greater)
                .collect();
            if stale.is_empty() {
                continue;
            }
            upgrades.extend(stale.into_iter().map(|pin| Upgrade {
                name: name.clone(),
                current: pin.clone(),
                latest: newest.clone(),
            }));
            latest.insert(key.clone(), newest);
        }

        if upgrades.is_empty() {
            return Ok(());
        }

        for (file, content) in files.iter().zip(&contents) {
            if let Some(updated) = apply_upgrades(content, &latest) {
                let path = root.join(file);
                std::fs::write(&path, updated)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }

        report.extend(upgrades.into_iter().map(|u| {
            format!("requirements: {}: {} -> {}", u.name, u.current, u.latest)
        }));
        Ok(())
    }
}

/// Requirement files to scan, relative to `root`.
///
/// Order: `requirements.txt`, `requirements/*.txt`, configured files, then
/// `requirements-*.txt` variants. Each file appears once; files matching
/// `ignore_files` are dropped.
pub fn requirement_files(root: &Path, local: &RequirementsLocal) -> anyhow::Result<Vec<String>> {
    let defaults = build_matcher(DEFAULT_PATTERNS.iter().copied())?;
    let variants = build_matcher([VARIANT_PATTERN])?;
    let ignored = build_matcher(local.ignore_files.iter().map(String::as_str))?;

    let mut candidates = list_files(root, "")?;
    candidates.extend(list_files(&root.join("requirements"), "requirements/")?);
    candidates.sort();

    let mut files: Vec<String> = Vec::new();
    let mut add = |name: String| {
        if !files.contains(&name) {
            files.push(name);
        }
    };

    // requirements.txt sorts before requirements/..., keeping priority order
    for name in candidates.iter().filter(|c| defaults.is_match(c.as_str())) {
        add(name.clone());
    }
    for name in &local.files {
        if !root.join(name).is_file() {
            anyhow::bail!("configured requirements file {name} does not exist");
        }
        add(name.clone());
    }
    for name in candidates.iter().filter(|c| variants.is_match(c.as_str())) {
        add(name.clone());
    }

    files.retain(|f| !ignored.is_match(f.as_str()));
    Ok(files)
}

fn build_matcher<'a>(patterns: impl IntoIterator<Item = &'a str>) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid pattern {pattern}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Regular files directly in `dir`, named with `prefix`.
fn list_files(dir: &Path, prefix: &str) -> anyhow::Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?
    {
        let entry = entry?;
        if entry.path().is_file() {
            names.push(format!("{prefix}{}", entry.file_name().to_string_lossy()));
        }
    }
    Ok(names)
}

/// Pinned requirements in a file's content.
///
/// Comments, options (`-r`, `--hash`) and unpinned requirements are skipped.
pub fn parse_pins(content: &str) -> Vec<Pin> {
    content
        .lines()
        .enumerate()
        .filter_map(|(line, text)| {
            let trimmed = text.trim_start();
            if trimmed.starts_with('#') || trimmed.starts_with('-') {
                return None;
            }
            let caps = PIN_PATTERN.captures(text)?;
            Some(Pin {
                name: caps[1].to_string(),
                version: caps[2].to_string(),
                line,
            })
        })
        .collect()
}

/// Rewrite pins whose (lowercased) name is in `latest` and whose version
/// is older than the latest one.
///
/// Newer or equal pins are left alone. Only the version text changes;
/// extras, markers and comments are kept. Returns `None` when nothing
/// changed.
pub fn apply_upgrades(content: &str, latest: &BTreeMap<String, String>) -> Option<String> {
    let mut changed = false;
    let mut out = String::with_capacity(content.len());

    for segment in content.split_inclusive('\n') {
        let (text, newline) = match segment.strip_suffix('\n') {
            Some(text) => (text, "\n"),
            None => (segment, ""),
        };
        let replacement = if text.trim_start().starts_with(['#', '-']) {
            None
        } else {
            PIN_PATTERN.captures(text).and_then(|caps| {
                let new = latest.get(&caps[1].to_ascii_lowercase())?;
                if version::compare(new, &caps[2]) != Ordering::Greater {
                    return None;
                }
                let range = caps.get(2)?.range();
                Some(format!("{}{}{}", &text[..range.start], new, &text[range.end..]))
            })
        };
        match replacement {
            Some(line) => {
                changed = true;
                out.push_str(&line);
            }
            None => out.push_str(text),
        }
        out.push_str(newline);
    }

    changed.then_some(out)
}

/// Latest version from `pip index versions` output.
pub fn parse_index_output(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| INDEX_PATTERN.captures(line.trim()))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
#[path = "requirements_tests.rs"]
mod tests;
