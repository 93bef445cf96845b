// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use similar_asserts::assert_eq;
use termcolor::{Ansi, NoColor};

use super::TextFormatter;
use crate::report::{RepoOutcome, RepoStatus, Report};

fn render(outcomes: &[RepoOutcome]) -> String {
    let mut formatter = TextFormatter::new(NoColor::new(Vec::new()));
    for outcome in outcomes {
        formatter.write_repo(outcome).unwrap();
    }
    String::from_utf8(formatter.into_inner().into_inner()).unwrap()
}

#[test]
fn clean_repo_prints_ok() {
    let out = render(&[RepoOutcome::checked("a", "/git/a", Report::new())]);
    assert_eq!(out, "/git/a... [OK]\n");
}

#[test]
fn findings_are_listed_under_warn() {
    let mut report = Report::new();
    report.push(".travis.yml: python=['3.8'], should be ['3.8', 'nightly']");
    report.push("requirements: Django: 3.1.2 -> 3.1.3");

    let out = render(&[RepoOutcome::checked("a", "/git/a", report)]);
    assert_eq!(
        out,
        "/git/a... [WARN]\n\
         \x20  * .travis.yml: python=['3.8'], should be ['3.8', 'nightly']\n\
         \x20  * requirements: Django: 3.1.2 -> 3.1.3\n"
    );
}

#[test]
fn skipped_repos_print_reason() {
    let out = render(&[
        RepoOutcome::skipped("gone", "/git/gone", RepoStatus::Missing),
        RepoOutcome::skipped("plain", "/git/plain", RepoStatus::NotGit),
    ]);
    assert_eq!(
        out,
        "/git/gone: Repo does not exist.\n/git/plain: No .git directory - not a git repo?\n"
    );
}

#[test]
fn colored_output_styles_path_and_status() {
    let mut formatter = TextFormatter::new(Ansi::new(Vec::new()));
    formatter
        .write_repo(&RepoOutcome::checked("a", "/git/a", Report::new()))
        .unwrap();
    let out = String::from_utf8(formatter.into_inner().into_inner()).unwrap();

    assert!(out.contains("\x1b[1m/git/a"), "{out:?}");
    assert!(out.contains("\x1b[32m[OK]"), "{out:?}");
}
