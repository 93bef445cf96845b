// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-repo configuration overrides.
//!
//! Each repo may carry a `.repo-maint.yaml` with one section per check
//! namespace. Every section is defaulted, so checks never have to deal
//! with missing keys.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use super::{parse_mapping, suggest::warn_unknown_name};
use crate::error::{Error, Result};

/// File name of the per-repo override config.
pub const LOCAL_CONFIG_FILE: &str = ".repo-maint.yaml";

/// Namespaces understood in the per-repo config.
const NAMESPACES: &[&str] = &["travis", "requirements", "pyenv"];

/// Merged per-repo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub travis: TravisLocal,
    pub requirements: RequirementsLocal,
    pub pyenv: PyenvLocal,
}

/// `travis` namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravisLocal {
    pub skip: bool,
    pub python: TravisPythonLocal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravisPythonLocal {
    /// Whether `nightly` is expected in the CI version matrix.
    pub nightly: bool,
}

impl Default for TravisPythonLocal {
    fn default() -> Self {
        Self { nightly: true }
    }
}

/// `requirements` namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementsLocal {
    pub skip: bool,
    /// Extra requirement files to scan.
    pub files: Vec<String>,
    /// Packages never upgraded (matched case-insensitively).
    pub ignore: Vec<String>,
    /// Requirement files excluded from scanning.
    pub ignore_files: Vec<String>,
}

impl RequirementsLocal {
    /// Whether upgrades for `package` are suppressed.
    pub fn ignores(&self, package: &str) -> bool {
        self.ignore.iter().any(|i| i.eq_ignore_ascii_case(package))
    }
}

/// `pyenv` namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PyenvLocal {
    pub skip: bool,
    /// Append the development interpreter.
    pub dev: bool,
    pub latest_versions: LatestVersions,
    /// Put the repo's virtualenv first in `.python-version`.
    pub virtualenv: bool,
    /// Requirement files installed into a freshly created virtualenv.
    pub requirements: Vec<String>,
}

/// `pyenv.latest-versions`: `false`, `true`, or a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LatestVersions {
    Flag(bool),
    Count(usize),
}

impl Default for LatestVersions {
    fn default() -> Self {
        LatestVersions::Flag(false)
    }
}

impl LatestVersions {
    /// Number of newest versions to keep, if limited.
    ///
    /// `true` keeps one version; `false` and `0` keep all of them.
    pub fn limit(self) -> Option<usize> {
        match self {
            LatestVersions::Flag(false) | LatestVersions::Count(0) => None,
            LatestVersions::Flag(true) => Some(1),
            LatestVersions::Count(n) => Some(n),
        }
    }
}

impl<'de> Deserialize<'de> for LatestVersions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(flag) => Ok(LatestVersions::Flag(flag)),
            Value::Number(n) => n.as_u64().map(|n| LatestVersions::Count(n as usize)).ok_or_else(
                || serde::de::Error::custom("latest-versions must be a non-negative integer"),
            ),
            _ => Err(serde::de::Error::custom(
                "latest-versions must be a boolean or an integer",
            )),
        }
    }
}

/// Build the merged config for the repo at `repo_path`.
///
/// A missing override file yields the defaults. Every call parses afresh,
/// so no state is shared between repos.
pub fn merge_local_config(repo_path: &Path) -> Result<LocalConfig> {
    let path = repo_path.join(LOCAL_CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("no {} in {}", LOCAL_CONFIG_FILE, repo_path.display());
        return Ok(LocalConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::Io {
        path: path.clone(),
        source: e,
    })?;
    parse_local_config(&content, &path)
}

/// Parse override content and apply the per-namespace defaults.
pub fn parse_local_config(content: &str, path: &Path) -> Result<LocalConfig> {
    let mapping = parse_mapping(content, path)?;

    for key in mapping.keys() {
        if let Some(name) = key.as_str()
            && !NAMESPACES.contains(&name)
        {
            warn_unknown_name(path, name, NAMESPACES);
        }
    }

    serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
