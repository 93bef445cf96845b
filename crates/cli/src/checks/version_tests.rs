// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    minor_is_numeric = { "3.10.0", "3.9.1", Ordering::Greater },
    patch = { "3.9.1", "3.9.0", Ordering::Greater },
    missing_parts_are_zero = { "3.9", "3.9.0", Ordering::Equal },
    release_beats_rc = { "2.0", "2.0rc1", Ordering::Greater },
    dev_before_release = { "3.10-dev", "3.10.0", Ordering::Less },
    post_after_release = { "1.0.post1", "1.0", Ordering::Greater },
    leading_v = { "v1.2", "1.2", Ordering::Equal },
    major = { "22.0", "3.0", Ordering::Greater },
)]
fn ordering(a: &str, b: &str, expected: Ordering) {
    assert_eq!(compare(a, b), expected);
}

#[test]
fn sorts_interpreters_newest_first() {
    let mut versions = vec!["3.8.6", "3.10.0", "3.9.0", "3.7.9"];
    versions.sort_by(|a, b| compare(b, a));
    assert_eq!(versions, ["3.10.0", "3.9.0", "3.8.6", "3.7.9"]);
}
