pub mod check;
pub mod checks;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod report;
pub mod repo;
pub mod runner;
pub mod tools;

pub use check::{Check, CheckContext, CheckDescriptor};
pub use checks::{CheckModule, CheckRegistry};
pub use cli::{Cli, OutputFormat};
pub use config::{GlobalConfig, LocalConfig};
pub use error::{Error, ExitCode, Result};
pub use report::{RepoOutcome, RepoStatus, Report, RunOutput};
pub use tools::{Invocation, SystemRunner, ToolError, ToolRunner};

#[cfg(test)]
pub mod test_utils;
