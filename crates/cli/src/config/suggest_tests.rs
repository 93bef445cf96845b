// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const KNOWN: &[&str] = &["travis", "requirements", "pyenv"];

#[test]
fn suggests_alias_for_ci() {
    assert_eq!(suggest_name("ci", KNOWN), Some("travis"));
    assert_eq!(suggest_name("travis-ci", KNOWN), Some("travis"));
}

#[test]
fn suggests_alias_for_dependencies() {
    assert_eq!(suggest_name("deps", KNOWN), Some("requirements"));
    assert_eq!(suggest_name("pip", KNOWN), Some("requirements"));
}

#[test]
fn suggests_alias_for_interpreter() {
    assert_eq!(suggest_name("venv", KNOWN), Some("pyenv"));
    assert_eq!(suggest_name("python-version", KNOWN), Some("pyenv"));
}

#[test]
fn suggests_by_prefix() {
    assert_eq!(suggest_name("trav", KNOWN), Some("travis"));
    assert_eq!(suggest_name("requirements-dev", KNOWN), Some("requirements"));
    assert_eq!(suggest_name("py", KNOWN), Some("pyenv"));
}

#[test]
fn alias_for_unregistered_name_is_not_suggested() {
    assert_eq!(suggest_name("ci", &["pyenv"]), None);
}

#[test]
fn no_suggestion_for_unrelated_name() {
    assert_eq!(suggest_name("", KNOWN), None);
    assert_eq!(suggest_name("x", KNOWN), None);
    assert_eq!(suggest_name("license", KNOWN), None);
}

#[test]
fn unknown_message_lists_valid_names_without_suggestion() {
    let msg = unknown_message("license", KNOWN);
    assert!(msg.contains("unknown check `license`"));
    assert!(msg.contains("Valid checks: travis, requirements, pyenv"));
}

#[test]
fn unknown_message_includes_suggestion() {
    let msg = unknown_message("trav", KNOWN);
    assert_eq!(msg, "unknown check `trav`. Did you mean `travis`?");
}
