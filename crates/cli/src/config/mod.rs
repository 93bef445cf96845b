// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! The global config (`repo-maint.yaml`) is loaded once per process and is
//! read-only afterwards. Per-repo overrides live in [`local`].

pub mod local;
mod suggest;

use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub use local::{
    LOCAL_CONFIG_FILE, LatestVersions, LocalConfig, PyenvLocal, RequirementsLocal, TravisLocal,
    TravisPythonLocal, merge_local_config, parse_local_config,
};
pub use suggest::{suggest_name, unknown_message, warn_unknown_name};

use crate::error::{Error, Result};

/// Top-level keys understood in the global config.
const KNOWN_KEYS: &[&str] = &["base-dir", "repos", "travis", "pyenv", "requirements"];

/// Directory (relative to the home directory) holding checkouts when
/// `base-dir` is not configured.
const DEFAULT_BASE_DIR: &str = "git";

/// Process-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Directory that repo names are resolved against.
    pub base_dir: Option<PathBuf>,

    /// Repos checked when none are given on the command line.
    pub repos: Vec<String>,

    pub travis: TravisConfig,

    pub pyenv: PyenvConfig,

    pub requirements: RequirementsConfig,
}

/// Accepted CI language versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravisConfig {
    pub python: TravisPythonConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravisPythonConfig {
    /// Versions every python repo should test against, in the order they
    /// are expected to appear once sorted.
    #[serde(deserialize_with = "version_list")]
    pub versions: Vec<String>,
}

/// Interpreter versions managed through pyenv.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PyenvConfig {
    #[serde(deserialize_with = "version_list")]
    pub versions: Vec<String>,

    /// Development interpreter appended for repos with `pyenv.dev` set.
    pub dev_version: Option<String>,
}

/// Settings for the dependency freshness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementsConfig {
    /// Program used to query the package index.
    pub pip: String,
}

impl Default for RequirementsConfig {
    fn default() -> Self {
        Self {
            pip: "pip".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Directory that repo names are resolved against, with `~` expanded.
    pub fn base_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => expand_home(dir),
            None => dirs::home_dir()
                .unwrap_or_default()
                .join(DEFAULT_BASE_DIR),
        }
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Load the global config, failing if the file is absent or malformed.
pub fn load_global_config(path: &Path) -> Result<GlobalConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    parse_global_config(&content, path)
}

/// Parse the global config, warning on unknown keys.
pub fn parse_global_config(content: &str, path: &Path) -> Result<GlobalConfig> {
    let mapping = parse_mapping(content, path)?;

    for key in mapping.keys() {
        match key.as_str() {
            Some(name) if KNOWN_KEYS.contains(&name) => {}
            Some(name) => warn_unknown_key(path, name),
            None => warn_unknown_key(path, &format!("{key:?}")),
        }
    }

    serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML content into a mapping.
///
/// Empty documents are an empty mapping. Null values are dropped so that
/// `key:` with nothing after it falls back to the key's default.
pub(crate) fn parse_mapping(content: &str, path: &Path) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mut mapping) => {
            prune_nulls(&mut mapping);
            Ok(mapping)
        }
        other => Err(Error::ConfigParse {
            path: path.to_path_buf(),
            message: format!("expected a mapping at the top level, found {}", kind(&other)),
        }),
    }
}

fn prune_nulls(mapping: &mut Mapping) {
    mapping.retain(|_, value| !value.is_null());
    for value in mapping.values_mut() {
        if let Value::Mapping(inner) = value {
            prune_nulls(inner);
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Warn about an unrecognized config key.
pub(crate) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "repo-maint: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Deserialize a list of version identifiers.
///
/// Unquoted YAML versions such as `3.8` arrive as numbers; they are kept in
/// their textual form.
pub(crate) fn version_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    values.iter().map(version_string).collect()
}

pub(crate) fn version_string<E: de::Error>(value: &Value) -> std::result::Result<String, E> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!(
            "expected a version string, found {}",
            kind(other)
        ))),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
