//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running repo-maint against a temporary
//! workspace of repos.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the repo-maint binary.
///
/// Variables that would leak the caller's setup into the run are cleared.
pub fn repo_maint_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-maint"));
    for key in ["REPO_MAINT_CONFIG", "REPO_MAINT_LOG", "COLOR", "NO_COLOR", "CI"] {
        cmd.env_remove(key);
    }
    cmd
}

// =============================================================================
// Workspace
// =============================================================================

/// Temporary directory holding a `repo-maint.yaml` and the repos it names.
///
/// The config's `base-dir` points at the workspace itself, so repo `name`
/// lives at `<workspace>/name`.
///
/// # Examples
///
/// ```ignore
/// let ws = Workspace::new(&["app"]);
/// ws.git_repo("app");
/// ws.file("app/.travis.yml", "language: python\n");
/// ws.run().passes().stdout_has("[OK]");
/// ```
pub struct Workspace {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Workspace {
    /// Workspace whose config lists `repos` and no check settings.
    pub fn new(repos: &[&str]) -> Self {
        Self::with_config(repos, "")
    }

    /// Workspace whose config lists `repos`, followed by `extra` YAML.
    pub fn with_config(repos: &[&str], extra: &str) -> Self {
        let ws = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        let list = repos
            .iter()
            .map(|r| format!("  - {r}\n"))
            .collect::<String>();
        let repos = if list.is_empty() {
            "repos: []\n".to_string()
        } else {
            format!("repos:\n{list}")
        };
        ws.file(
            "repo-maint.yaml",
            &format!("base-dir: '{}'\n{repos}{extra}", ws.path().display()),
        );
        ws
    }

    /// Workspace path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a repo in this workspace.
    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Create a git working copy named `name`.
    pub fn git_repo(&self, name: &str) {
        git2::Repository::init(self.repo_path(name)).unwrap();
    }

    /// Create a plain directory named `name` (no `.git`).
    pub fn plain_dir(&self, name: &str) {
        std::fs::create_dir_all(self.repo_path(name)).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Read a file back.
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.path().join(path.as_ref())).unwrap()
    }

    /// Builder running repo-maint from inside the workspace.
    pub fn run(&self) -> RunBuilder {
        RunBuilder::new().pwd(self.path())
    }
}

// =============================================================================
// RunBuilder
// =============================================================================

/// Fluent builder for one repo-maint invocation.
pub struct RunBuilder {
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RunBuilder {
    pub fn new() -> Self {
        Self {
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Run and expect exit code 0.
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Run and expect the given exit code.
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run with `-o json`, expect success, and parse stdout.
    pub fn json(self) -> serde_json::Value {
        let run = self.args(&["-o", "json"]).passes();
        serde_json::from_str(&run.stdout()).unwrap()
    }

    fn command(self) -> Command {
        let mut cmd = repo_maint_cmd();
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            // No user-level config leaks in from the test environment.
            cmd.env("XDG_CONFIG_HOME", dir.join(".no-user-config"));
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected (with diff on failure)
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}
