//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::tools::{Invocation, ToolError, ToolRunner};

/// Creates a temp base directory holding one git working copy named `name`.
pub fn temp_repo(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    git2::Repository::init(dir.path().join(name)).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Scripted response for a command line.
enum Reply {
    Stdout(String),
    Fail(String),
}

/// Tool runner that records invocations and replays scripted output.
///
/// Responses are matched on the rendered command line (`program arg...`).
/// Commands without a scripted response succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    replies: RefCell<Vec<(String, VecDeque<Reply>)>>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` with `stdout` (queued; the last reply repeats).
    pub fn on(self, command: &str, stdout: &str) -> Self {
        self.push(command, Reply::Stdout(stdout.to_string()));
        self
    }

    /// Make `command` fail with `stderr`.
    pub fn fail(self, command: &str, stderr: &str) -> Self {
        self.push(command, Reply::Fail(stderr.to_string()));
        self
    }

    fn push(&self, command: &str, reply: Reply) {
        let mut replies = self.replies.borrow_mut();
        match replies.iter_mut().find(|(c, _)| c == command) {
            Some((_, queue)) => queue.push_back(reply),
            None => replies.push((command.to_string(), VecDeque::from([reply]))),
        }
    }

    /// All invocations so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines so far.
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<String, ToolError> {
        self.calls.borrow_mut().push(invocation.clone());

        let command = invocation.to_string();
        let mut replies = self.replies.borrow_mut();
        let Some((_, queue)) = replies.iter_mut().find(|(c, _)| *c == command) else {
            return Ok(String::new());
        };

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| match r {
                Reply::Stdout(s) => Reply::Stdout(s.clone()),
                Reply::Fail(s) => Reply::Fail(s.clone()),
            })
        };

        match reply {
            Some(Reply::Stdout(stdout)) => Ok(stdout),
            Some(Reply::Fail(stderr)) => Err(ToolError::Failed {
                command,
                status: Some(1),
                stderr,
            }),
            None => Ok(String::new()),
        }
    }
}
