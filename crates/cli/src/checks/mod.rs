// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry and discovery.
//!
//! Each check module exports its implementations as a `CHECKS` slice of
//! [`CheckDescriptor`]s and is registered here once:
//! - travis: CI language-version matrix
//! - requirements: pinned dependency freshness
//! - pyenv: local interpreter and virtualenv provisioning
//!
//! The registry is built on first use and is read-only afterwards.

pub mod pyenv;
pub mod requirements;
pub mod travis;

mod version;

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use crate::check::CheckDescriptor;
use crate::error::{Error, Result};

/// Checks exported by one module.
///
/// `members` may include checks re-exported from other modules; only those
/// whose defining module equals `path` are attributed to this module.
#[derive(Debug, Clone, Copy)]
pub struct CheckModule {
    pub path: &'static str,
    pub members: &'static [CheckDescriptor],
}

/// Set of modules that may contribute checks.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    modules: BTreeMap<&'static str, &'static [CheckDescriptor]>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of all built-in check modules.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(travis::MODULE);
        registry.register(requirements::MODULE);
        registry.register(pyenv::MODULE);
        registry
    }

    /// Register a module. Registering the same path twice replaces it.
    pub fn register(&mut self, module: CheckModule) {
        self.modules.insert(module.path, module.members);
    }

    /// Discover all checks in a stable order.
    ///
    /// Modules are enumerated lexicographically by path. A module contributes
    /// only the checks it defines itself, and each implementation is yielded
    /// once. The result is sorted by `order`; ties keep enumeration order.
    pub fn discover(&self) -> Result<Vec<CheckDescriptor>> {
        let mut seen = HashSet::new();
        let mut names: BTreeMap<&str, (&str, &str)> = BTreeMap::new();
        let mut found = Vec::new();

        for (&path, members) in &self.modules {
            let local = members.iter().filter(|d| d.module == path);
            for descriptor in local {
                if !seen.insert(descriptor.id()) {
                    continue;
                }
                if descriptor.name.is_empty() {
                    return Err(Error::Discovery(format!(
                        "{}::{} has an empty name",
                        descriptor.module, descriptor.type_name
                    )));
                }
                if let Some((module, type_name)) = names.insert(descriptor.name, descriptor.id()) {
                    return Err(Error::Discovery(format!(
                        "check name `{}` is used by both {}::{} and {}::{}",
                        descriptor.name, module, type_name, descriptor.module, descriptor.type_name
                    )));
                }
                found.push(*descriptor);
            }
        }

        found.sort_by_key(|d| d.order);
        tracing::debug!(
            "discovered checks: {:?}",
            found.iter().map(|d| d.name).collect::<Vec<_>>()
        );
        Ok(found)
    }
}

/// The process-wide registry of built-in checks.
pub fn registry() -> &'static CheckRegistry {
    static REGISTRY: OnceLock<CheckRegistry> = OnceLock::new();
    REGISTRY.get_or_init(CheckRegistry::builtin)
}

/// Discover the built-in checks in execution order.
pub fn discover_checks() -> Result<Vec<CheckDescriptor>> {
    registry().discover()
}

/// Remove checks whose name is in `skip` (exact, case-sensitive match).
pub fn filter_checks(checks: &[CheckDescriptor], skip: &[String]) -> Vec<CheckDescriptor> {
    checks
        .iter()
        .filter(|c| !skip.iter().any(|s| s == c.name))
        .copied()
        .collect()
}

/// Names of the given checks, in order.
pub fn check_names(checks: &[CheckDescriptor]) -> Vec<&'static str> {
    checks.iter().map(|c| c.name).collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
