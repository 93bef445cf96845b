// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

/// Check a set of git repos against shared maintenance conventions
#[derive(Parser)]
#[command(name = "repo-maint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repos to check (default: all configured repos)
    #[arg(value_name = "REPO")]
    pub repos: Vec<String>,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "REPO_MAINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that repo names are resolved against
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// List available check modules in run order and exit
    #[arg(long)]
    pub list_modules: bool,

    /// List configured repos and exit
    #[arg(long)]
    pub list_repos: bool,

    /// Do not run the named check module (repeatable)
    #[arg(long = "skip-module", value_name = "NAME")]
    pub skip_module: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
