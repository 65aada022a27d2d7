//! Test runner I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the two operations that touch the
//! outside world:
//! - Test discovery (filesystem walk)
//! - Test execution (runner process invocation)
//!
//! The runner loop only talks to these traits, which is what makes `--dry-run` possible
//! and lets the loop be tested without spawning processes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::discovery::ProjectWalker;

/// Errors that abort a test run
#[derive(Debug, Error)]
pub enum TestError {
    #[error("failed to walk '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to launch test runner '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl TestError {
    /// Wrap a walkdir error, keeping the path it happened on.
    pub fn from_walk(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        TestError::Walk { path, source: err }
    }
}

// ============================================================================
// Invocation
// ============================================================================

/// One call of the external runner against a single project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInvocation {
    pub project: PathBuf,
    /// `None` when no categories were given; the `--filter` flag is then omitted.
    pub filter: Option<String>,
}

impl TestInvocation {
    pub fn new(project: PathBuf, filter: &str) -> Self {
        let filter = (!filter.is_empty()).then(|| filter.to_string());
        Self { project, filter }
    }

    /// Arguments passed to the runner program, one entry per argv slot.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("test"), self.project.clone().into_os_string()];
        if let Some(filter) = &self.filter {
            args.push(OsString::from("--filter"));
            args.push(OsString::from(filter));
        }
        args
    }

    /// Human-readable command line, quoted for display only.
    pub fn command_line(&self) -> String {
        let mut line = format!("test \"{}\"", self.project.display());
        if let Some(filter) = &self.filter {
            line.push_str(&format!(" --filter \"{}\"", filter));
        }
        line
    }
}

/// How a single project run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectOutcome {
    Passed,
    /// The runner exited unsuccessfully. `code` is `None` when it was killed by a signal.
    Failed { code: Option<i32> },
    /// Nothing was launched (dry run).
    Skipped,
}

// ============================================================================
// Test Discovery Interface
// ============================================================================

/// Find test projects beneath a root folder.
pub trait TestDiscovery {
    /// Lazily yield project paths. The caller stops at the first error.
    fn discover<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf, TestError>> + 'a>;
}

// ============================================================================
// Test Executor Interface
// ============================================================================

/// Run the external test tool for one project and wait for it to finish.
pub trait TestExecutor {
    fn execute(&mut self, invocation: &TestInvocation) -> Result<ProjectOutcome, TestError>;
}

// ============================================================================
// Default Implementations
// ============================================================================

/// Filesystem walk matching a file-name suffix.
pub struct SuffixDiscovery {
    suffix: String,
}

impl SuffixDiscovery {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self { suffix: suffix.into() }
    }
}

impl TestDiscovery for SuffixDiscovery {
    fn discover<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf, TestError>> + 'a> {
        Box::new(ProjectWalker::new(root, self.suffix.as_str()))
    }
}

/// Spawns the runner program with inherited stdio and blocks until it exits.
pub struct ProcessExecutor {
    program: String,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl TestExecutor for ProcessExecutor {
    fn execute(&mut self, invocation: &TestInvocation) -> Result<ProjectOutcome, TestError> {
        let status = Command::new(&self.program)
            .args(invocation.args())
            .status()
            .map_err(|source| TestError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(ProjectOutcome::Passed)
        } else {
            Ok(ProjectOutcome::Failed { code: status.code() })
        }
    }
}

/// Prints what would be launched and launches nothing.
pub struct DryRunExecutor {
    program: String,
}

impl DryRunExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl TestExecutor for DryRunExecutor {
    fn execute(&mut self, invocation: &TestInvocation) -> Result<ProjectOutcome, TestError> {
        println!("[dry-run] {} {}", self.program, invocation.command_line());
        Ok(ProjectOutcome::Skipped)
    }
}
