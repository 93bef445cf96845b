// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The check capability and its registration metadata.

use std::fmt;
use std::sync::Arc;

use crate::config::{GlobalConfig, LocalConfig};
use crate::report::Report;
use crate::repo::RepoRef;
use crate::tools::ToolRunner;

/// Context passed to a check for one repo.
pub struct CheckContext<'a> {
    /// Repo being checked. Relative paths inside a check resolve against
    /// `repo.path`, never the process working directory.
    pub repo: &'a RepoRef,
    /// Merged per-repo configuration.
    pub local: &'a LocalConfig,
    /// Runner for external tools.
    pub tools: &'a dyn ToolRunner,
}

/// A single repo convention check.
///
/// Object-safe to allow dynamic dispatch via `Box<dyn Check>`. Instances are
/// built per repo from a [`CheckDescriptor`] and hold the global config.
pub trait Check {
    /// Verify (and where applicable repair) the repo, appending findings.
    ///
    /// Implementations should:
    /// - Return `Ok(())` without findings when there is nothing to do
    ///   (e.g. the file the check is about does not exist)
    /// - Propagate failures of external tools with context instead of
    ///   swallowing them
    fn check_repo(&self, ctx: &CheckContext<'_>, report: &mut Report) -> anyhow::Result<()>;
}

/// Builds a check instance bound to the global config.
pub type CheckFactory = fn(Arc<GlobalConfig>) -> Box<dyn Check>;

/// Registration record for a check implementation.
#[derive(Clone, Copy)]
pub struct CheckDescriptor {
    /// Namespace used for `--skip-module` and `--list-modules`.
    pub name: &'static str,
    /// Execution order; lower runs first.
    pub order: i32,
    /// Module that defines the implementation.
    pub module: &'static str,
    /// Type name of the implementation.
    pub type_name: &'static str,
    pub build: CheckFactory,
}

impl CheckDescriptor {
    /// Identity of the implementation (defining module and type).
    pub fn id(&self) -> (&'static str, &'static str) {
        (self.module, self.type_name)
    }

    /// Create an instance for one repo.
    pub fn instantiate(&self, config: Arc<GlobalConfig>) -> Box<dyn Check> {
        (self.build)(config)
    }
}

impl fmt::Debug for CheckDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckDescriptor")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("module", &self.module)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Declare a [`CheckDescriptor`] for a type defined in the current module.
///
/// The type must provide `fn new(Arc<GlobalConfig>) -> Self`.
#[macro_export]
macro_rules! check_descriptor {
    ($ty:ident, name: $name:expr, order: $order:expr $(,)?) => {
        $crate::check::CheckDescriptor {
            name: $name,
            order: $order,
            module: module_path!(),
            type_name: stringify!($ty),
            build: |config| Box::new($ty::new(config)),
        }
    };
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
