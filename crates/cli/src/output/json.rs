// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written once every repo has been processed.

use std::io::Write;

use chrono::Utc;

use crate::report::{RepoOutcome, RunOutput};

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON document.
    pub fn write(&mut self, output: &RunOutput) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Create RunOutput with current timestamp.
pub fn create_output(repos: Vec<RepoOutcome>) -> RunOutput {
    RunOutput::new(
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        repos,
    )
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
