// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Name suggestions for config and flag validation.

use std::path::Path;

/// Suggest a known name for a typo.
pub fn suggest_name<'a>(unknown: &str, known: &[&'a str]) -> Option<&'a str> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    // Common aliases
    let alias = match unknown {
        "ci" | "travis-ci" | "travis.yml" => Some("travis"),
        "deps" | "dependencies" | "pip" | "requirement" | "reqs" => Some("requirements"),
        "python-version" | "venv" | "virtualenv" | "python" => Some("pyenv"),
        _ => None,
    };

    if let Some(alias) = alias
        && let Some(&name) = known.iter().find(|&&n| n == alias)
    {
        return Some(name);
    }

    // Try prefix matching (require at least 2 chars to avoid false positives)
    if unknown.len() >= 2 {
        for &name in known {
            if name.starts_with(unknown) || unknown.starts_with(name) {
                return Some(name);
            }
        }
    }

    None
}

/// Warn about an unknown namespace in a config file.
pub fn warn_unknown_name(path: &Path, key: &str, known: &[&str]) {
    eprintln!("repo-maint: warning: {}: {}", path.display(), unknown_message(key, known));
}

/// Message for an unknown name, with a suggestion when one is close.
pub fn unknown_message(key: &str, known: &[&str]) -> String {
    match suggest_name(key, known) {
        Some(suggested) => format!("unknown check `{key}`. Did you mean `{suggested}`?"),
        None => format!("unknown check `{key}`\n  Valid checks: {}", known.join(", ")),
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
