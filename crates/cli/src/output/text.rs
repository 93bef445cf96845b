// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! One block per repo, written as soon as the repo is done:
//! ```text
//! /home/user/git/project... [WARN]
//!    * <finding>
//! /home/user/git/other: Repo does not exist.
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::color::scheme;
use crate::report::{RepoOutcome, RepoStatus};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the block for a single repo.
    pub fn write_repo(&mut self, outcome: &RepoOutcome) -> std::io::Result<()> {
        let path = outcome.path.display();
        match outcome.status {
            RepoStatus::Missing => writeln!(self.out, "{path}: Repo does not exist.")?,
            RepoStatus::NotGit => {
                writeln!(self.out, "{path}: No .git directory - not a git repo?")?
            }
            RepoStatus::Ok | RepoStatus::Warn => {
                self.out.set_color(&scheme::repo())?;
                write!(self.out, "{path}")?;
                self.out.reset()?;
                write!(self.out, "... ")?;

                if outcome.status == RepoStatus::Ok {
                    self.out.set_color(&scheme::ok())?;
                    write!(self.out, "[OK]")?;
                } else {
                    self.out.set_color(&scheme::warn())?;
                    write!(self.out, "[WARN]")?;
                }
                self.out.reset()?;
                writeln!(self.out)?;

                for finding in &outcome.findings {
                    writeln!(self.out, "   * {finding}")?;
                }
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
