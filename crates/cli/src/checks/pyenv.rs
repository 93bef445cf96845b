// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local interpreter provisioning check.
//!
//! Keeps `.python-version` in line with the managed interpreter list and
//! maintains one virtualenv per repo through the `pyenv` version manager.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use super::{CheckModule, version};
use crate::check::{Check, CheckContext, CheckDescriptor};
use crate::check_descriptor;
use crate::config::{GlobalConfig, PyenvLocal};
use crate::report::Report;
use crate::tools::{Invocation, ToolRunner};

/// Version file that marks a repo as managed by pyenv.
pub const PYTHON_VERSION_FILE: &str = ".python-version";

const PYENV: &str = "pyenv";

pub const CHECKS: &[CheckDescriptor] = &[check_descriptor!(
    PyenvCheck,
    name: "pyenv",
    order: 30,
)];

pub const MODULE: CheckModule = CheckModule {
    path: module_path!(),
    members: CHECKS,
};

pub struct PyenvCheck {
    config: Arc<GlobalConfig>,
}

/// Interpreter selection for one repo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected {
    /// Entries for `.python-version`, in order.
    pub versions: Vec<String>,
    /// Newest managed interpreter.
    pub newest: String,
    /// Name of the repo's virtualenv (`<newest>/envs/<basename>`).
    pub venv: String,
}

impl PyenvCheck {
    pub fn new(config: Arc<GlobalConfig>) -> Self {
        Self { config }
    }

    /// Compute the wanted `.python-version` entries for a repo.
    pub fn expected(&self, local: &PyenvLocal, basename: &str) -> anyhow::Result<Expected> {
        let mut versions = self.config.pyenv.versions.clone();
        versions.sort_by(|a, b| version::compare(b, a));
        if let Some(limit) = local.latest_versions.limit() {
            versions.truncate(limit);
        }
        if local.dev {
            let Some(dev) = &self.config.pyenv.dev_version else {
                anyhow::bail!("pyenv.dev is set but no dev-version is configured");
            };
            versions.push(dev.clone());
        }

        let Some(newest) = versions.first().cloned() else {
            anyhow::bail!("no interpreter versions configured");
        };
        let venv = venv_name(&newest, basename);
        if local.virtualenv {
            versions.insert(0, venv.clone());
        }

        Ok(Expected {
            versions,
            newest,
            venv,
        })
    }
}

impl Check for PyenvCheck {
    fn check_repo(&self, ctx: &CheckContext<'_>, report: &mut Report) -> anyhow::Result<()> {
        let local = &ctx.local.pyenv;
        let root = &ctx.repo.path;
        if local.skip || !root.join(PYTHON_VERSION_FILE).is_file() {
            return Ok(());
        }

        let basename = ctx.repo.basename();
        let expected = self.expected(local, &basename)?;
        let pyenv = Pyenv {
            tools: ctx.tools,
            root,
        };

        let current = pyenv.run(["local"]).context("failed to read local versions")?;
        let current: Vec<&str> = current.split_whitespace().collect();
        if current != expected.versions {
            pyenv
                .run(std::iter::once("local").chain(expected.versions.iter().map(String::as_str)))
                .context("failed to set local versions")?;
            report.push(format!(
                "pyenv versions updated to {}",
                expected.versions.join(", ")
            ));
        }

        let installed = pyenv
            .run(["versions", "--bare", "--skip-aliases"])
            .context("failed to list installed versions")?;
        let installed: Vec<&str> = installed.split_whitespace().collect();

        let suffix = format!("/envs/{basename}");
        for venv in installed.iter().filter(|v| v.ends_with(&suffix)) {
            if *venv != expected.venv {
                tracing::info!("{}: removing stale virtualenv {}", ctx.repo.name, venv);
                report.push(format!("pyenv: Delete {venv}"));
                pyenv
                    .run(["uninstall", "--force", *venv])
                    .with_context(|| format!("failed to delete {venv}"))?;
            }
        }

        if !installed.contains(&expected.venv.as_str()) {
            tracing::info!("{}: creating virtualenv {}", ctx.repo.name, expected.venv);
            pyenv
                .run(["virtualenv", expected.newest.as_str(), basename.as_str()])
                .with_context(|| format!("failed to create {}", expected.venv))?;
            pyenv
                .install(&expected.venv, ["install", "-U", "pip", "setuptools", "wheel"])
                .context("failed to upgrade installer packages")?;
            if !local.requirements.is_empty() {
                let args = local
                    .requirements
                    .iter()
                    .flat_map(|r| ["-r", r.as_str()]);
                pyenv
                    .install(&expected.venv, std::iter::once("install").chain(args))
                    .context("failed to install requirements")?;
            }
            report.push(format!(
                "pyenv: Created new venv with Python {}",
                expected.newest
            ));
        }

        Ok(())
    }
}

/// Virtualenv name for a repo on a given interpreter.
pub fn venv_name(version: &str, basename: &str) -> String {
    format!("{version}/envs/{basename}")
}

/// `pyenv` invocations rooted at one repo.
struct Pyenv<'a> {
    tools: &'a dyn ToolRunner,
    root: &'a Path,
}

impl Pyenv<'_> {
    fn run<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> anyhow::Result<String> {
        Ok(self.tools.run(&Invocation::new(PYENV, self.root).args(args))?)
    }

    /// Run `pip` inside `venv`, isolated from any active environment.
    fn install<'s>(
        &self,
        venv: &str,
        pip_args: impl IntoIterator<Item = &'s str>,
    ) -> anyhow::Result<String> {
        let invocation = Invocation::new(PYENV, self.root)
            .args(["exec", "pip"])
            .args(pip_args)
            .scrub_env("PYENV")
            .scrub_env("VIRTUAL_ENV")
            .env("PYENV_VERSION", venv);
        Ok(self.tools.run(&invocation)?)
    }
}

#[cfg(test)]
#[path = "pyenv_tests.rs"]
mod tests;
