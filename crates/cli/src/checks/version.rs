// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Loose version ordering for interpreter and package versions.
//!
//! Compares the dotted numeric release first (`3.10.0 > 3.9.1`), then ranks
//! suffixes: pre-releases (`rc1`, `-dev`) < final < post-releases.

use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Version<'a> {
    release: Vec<u64>,
    suffix: &'a str,
}

impl<'a> Version<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix('v').unwrap_or(raw);
        let end = raw
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(raw.len());
        let (release, suffix) = raw.split_at(end);
        let release = release
            .split('.')
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.parse().ok())
            .collect();
        Self {
            release,
            suffix: suffix.trim_start_matches(['.', '-', '_']),
        }
    }

    fn suffix_rank(&self) -> u8 {
        if self.suffix.is_empty() {
            1
        } else if self.suffix.starts_with("post") {
            2
        } else {
            0
        }
    }
}

impl Ord for Version<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.suffix_rank()
            .cmp(&other.suffix_rank())
            .then_with(|| self.suffix.cmp(other.suffix))
    }
}

impl PartialEq for Version<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version<'_> {}

impl PartialOrd for Version<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
