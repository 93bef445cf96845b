// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External tool invocation.
//!
//! Checks never spawn processes directly; they describe an [`Invocation`]
//! and hand it to a [`ToolRunner`]. Every invocation carries its own
//! working directory, so the process-wide current directory is never
//! changed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child process.
    pub cwd: PathBuf,
    /// Variables set for the child.
    pub env: Vec<(String, String)>,
    /// Inherited variables with these prefixes are removed before `env` is applied.
    pub scrub_prefixes: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
            scrub_prefixes: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Drop inherited variables starting with `prefix`.
    pub fn scrub_env(mut self, prefix: impl Into<String>) -> Self {
        self.scrub_prefixes.push(prefix.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Failure of an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {}", .status.map_or_else(|| "signal".to_string(), |c| format!("status {c}")), .stderr.trim())]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("unexpected output from `{command}`: {message}")]
    Output { command: String, message: String },
}

impl ToolError {
    /// Build an output error for `invocation`.
    pub fn output(invocation: &Invocation, message: impl Into<String>) -> Self {
        ToolError::Output {
            command: invocation.to_string(),
            message: message.into(),
        }
    }
}

/// Runs external commands on behalf of checks.
pub trait ToolRunner {
    /// Run the command to completion and return its stdout.
    ///
    /// A non-zero exit status is an error.
    fn run(&self, invocation: &Invocation) -> Result<String, ToolError>;
}

/// Runs commands as child processes of this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<String, ToolError> {
        tracing::debug!("running `{}` in {}", invocation, invocation.cwd.display());

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).current_dir(&invocation.cwd);

        if !invocation.scrub_prefixes.is_empty() {
            for (key, _) in std::env::vars_os() {
                let name = key.to_string_lossy();
                if invocation
                    .scrub_prefixes
                    .iter()
                    .any(|prefix| name.starts_with(prefix.as_str()))
                {
                    command.env_remove(&key);
                }
            }
        }
        command.envs(invocation.env.iter().map(|(k, v)| (k, v)));

        let output = command.output().map_err(|e| ToolError::Spawn {
            command: invocation.to_string(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                command: invocation.to_string(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|_| ToolError::output(invocation, "stdout is not valid UTF-8"))
    }
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
