// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Global config file discovery.
//!
//! Walks from the current directory up to the filesystem root looking for
//! repo-maint.yaml, then falls back to the user config directory.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the global configuration.
pub const CONFIG_FILE_NAME: &str = "repo-maint.yaml";

/// Find repo-maint.yaml starting from `start_dir` and walking up.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Location of the config file in the user config directory
/// (`$XDG_CONFIG_HOME/repo-maint.yaml` or platform equivalent).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "REPO_MAINT_CONFIG")
/// 2. Discovery from the current directory upwards
/// 3. The user config directory
///
/// Unlike per-repo overrides, the global config is mandatory.
pub fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
    user_config: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            })
        };
    }

    if let Some(found) = find_config(cwd) {
        return Ok(found);
    }

    match user_config {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        }),
        None => Err(Error::ConfigNotFound {
            path: cwd.join(CONFIG_FILE_NAME),
        }),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
