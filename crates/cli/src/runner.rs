// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential repo runner with error recovery.
//!
//! Processes repos one at a time in list order, and within a repo runs the
//! checks in discovery order. A failing or panicking check is recorded as a
//! finding so the remaining checks and repos still run.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::check::{CheckContext, CheckDescriptor};
use crate::config::{GlobalConfig, LOCAL_CONFIG_FILE, merge_local_config};
use crate::report::{RepoOutcome, RepoStatus, Report};
use crate::repo::{RepoRef, RepoState};
use crate::tools::ToolRunner;

/// Runs the enabled checks against managed repos.
pub struct RepoRunner<'a> {
    config: Arc<GlobalConfig>,
    base_dir: PathBuf,
    checks: Vec<CheckDescriptor>,
    tools: &'a dyn ToolRunner,
}

impl<'a> RepoRunner<'a> {
    pub fn new(
        config: Arc<GlobalConfig>,
        base_dir: PathBuf,
        checks: Vec<CheckDescriptor>,
        tools: &'a dyn ToolRunner,
    ) -> Self {
        Self {
            config,
            base_dir,
            checks,
            tools,
        }
    }

    /// Check every repo in order.
    pub fn run(&self, repos: &[String]) -> Vec<RepoOutcome> {
        repos.iter().map(|name| self.check_repo(name)).collect()
    }

    /// Check a single repo.
    ///
    /// Missing and non-git repos are skipped without running any check.
    /// Each call starts from a fresh per-repo config and report.
    pub fn check_repo(&self, name: &str) -> RepoOutcome {
        let repo = RepoRef::resolve(&self.base_dir, name);
        match repo.state() {
            RepoState::Missing => {
                tracing::debug!("{}: skipped, {} does not exist", name, repo.path.display());
                return RepoOutcome::skipped(name, repo.path, RepoStatus::Missing);
            }
            RepoState::NotGit => {
                tracing::debug!("{}: skipped, not a git working copy", name);
                return RepoOutcome::skipped(name, repo.path, RepoStatus::NotGit);
            }
            RepoState::Ready => {}
        }

        let mut report = Report::new();
        let local = match merge_local_config(&repo.path) {
            Ok(local) => local,
            Err(e) => {
                tracing::debug!("{}: invalid {}: {}", name, LOCAL_CONFIG_FILE, e);
                report.push(e.to_string());
                return RepoOutcome::checked(name, repo.path, report);
            }
        };

        let ctx = CheckContext {
            repo: &repo,
            local: &local,
            tools: self.tools,
        };

        for descriptor in &self.checks {
            let start = Instant::now();
            let check = descriptor.instantiate(Arc::clone(&self.config));
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                check.check_repo(&ctx, &mut report)
            }));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("{}: {} failed: {:#}", name, descriptor.name, e);
                    report.push(format!("{}: {e:#}", descriptor.name));
                }
                Err(_) => {
                    tracing::warn!("{}: {} panicked", name, descriptor.name);
                    report.push(format!("{}: internal error: check panicked", descriptor.name));
                }
            }
            tracing::debug!(
                "{}: {} finished in {:?}",
                name,
                descriptor.name,
                start.elapsed()
            );
        }

        RepoOutcome::checked(name, repo.path, report)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
