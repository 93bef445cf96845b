// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Managed repository references.

use std::path::{Path, PathBuf};

use git2::Repository;

/// One managed repository, resolved against the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Name as listed in the config (a relative path segment).
    pub name: String,
    /// Absolute working-copy path.
    pub path: PathBuf,
}

/// Why a repo cannot be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// Usable git working copy.
    Ready,
    /// Path does not exist.
    Missing,
    /// Path exists but has no `.git`.
    NotGit,
}

impl RepoRef {
    /// Resolve `name` against `base_dir`.
    pub fn resolve(base_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: base_dir.join(name),
        }
    }

    /// Final path component, used to name the repo's virtualenv.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    /// Determine whether the repo is a usable git working copy.
    ///
    /// Only the repo path itself is considered; a parent directory's `.git`
    /// does not count.
    pub fn state(&self) -> RepoState {
        if !self.path.exists() {
            return RepoState::Missing;
        }
        if !self.path.join(".git").exists() {
            return RepoState::NotGit;
        }
        match Repository::open(&self.path) {
            Ok(repo) if !repo.is_bare() => RepoState::Ready,
            Ok(_) => RepoState::NotGit,
            Err(e) => {
                tracing::debug!("{}: cannot open git repo: {}", self.path.display(), e);
                RepoState::NotGit
            }
        }
    }
}

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;
