// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Default command: check the selected repos.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use repo_maint::checks::{self, check_names};
use repo_maint::cli::{Cli, OutputFormat};
use repo_maint::color::color_choice;
use repo_maint::config::{self, GlobalConfig, unknown_message};
use repo_maint::discovery;
use repo_maint::error::ExitCode;
use repo_maint::output::json::{self, JsonFormatter};
use repo_maint::output::text::TextFormatter;
use repo_maint::report::RepoStatus;
use repo_maint::runner::RepoRunner;
use repo_maint::tools::SystemRunner;

/// Run the command described by `cli`.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let user_config = discovery::user_config_path();
    let config_path =
        discovery::resolve_config(cli.config.as_deref(), &cwd, user_config.as_deref())?;
    tracing::debug!("loading config from {}", config_path.display());
    let config = config::load_global_config(&config_path)?;

    // Discovery problems are fatal even when only listing.
    let discovered = checks::discover_checks()?;

    if cli.list_modules {
        let mut stdout = std::io::stdout().lock();
        for name in check_names(&discovered) {
            writeln!(stdout, "{name}")?;
        }
        return Ok(ExitCode::Success);
    }

    if cli.list_repos {
        let mut stdout = std::io::stdout().lock();
        for repo in &config.repos {
            writeln!(stdout, "{repo}")?;
        }
        return Ok(ExitCode::Success);
    }

    let known = check_names(&discovered);
    for name in &cli.skip_module {
        if !known.contains(&name.as_str()) {
            eprintln!("repo-maint: warning: {}", unknown_message(name, &known));
        }
    }
    let enabled = checks::filter_checks(&discovered, &cli.skip_module);
    tracing::debug!("enabled checks: {:?}", check_names(&enabled));

    let base_dir = base_dir(cli, &config, &config_path);
    let repos = if cli.repos.is_empty() {
        config.repos.clone()
    } else {
        cli.repos.clone()
    };

    let tools = SystemRunner;
    let runner = RepoRunner::new(Arc::new(config), base_dir, enabled, &tools);

    match cli.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::stdout(color_choice(cli.color, cli.no_color));
            for name in &repos {
                formatter.write_repo(&runner.check_repo(name))?;
            }
        }
        OutputFormat::Json => {
            let output = json::create_output(runner.run(&repos));
            tracing::debug!(
                "{} ok, {} with warnings",
                output.count(RepoStatus::Ok),
                output.count(RepoStatus::Warn)
            );
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }

    Ok(ExitCode::Success)
}

/// Base directory from `--base-dir`, else the config's `base-dir`.
///
/// A relative `base-dir` in the config file is resolved against the
/// directory holding that file.
fn base_dir(cli: &Cli, config: &GlobalConfig, config_path: &Path) -> PathBuf {
    if let Some(dir) = &cli.base_dir {
        return config::expand_home(dir);
    }
    let dir = config.base_dir();
    if dir.is_relative() {
        config_path
            .parent()
            .map(|parent| parent.join(&dir))
            .unwrap_or(dir)
    } else {
        dir
    }
}
