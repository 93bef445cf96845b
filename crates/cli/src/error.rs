// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// repo-maint error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be located
    #[error("config file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but could not be parsed
    #[error("config error: {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The check registry is inconsistent
    #[error("check discovery failed: {0}")]
    Discovery(String),
}

/// Result type using repo-maint Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// Warnings reported by checks never change the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Run completed (with or without warnings)
    Success = 0,
    /// Configuration error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::ConfigNotFound { .. } | Error::ConfigParse { .. } => ExitCode::ConfigError,
            Error::Io { .. } | Error::Discovery(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
