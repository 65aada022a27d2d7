//! CLI module for the category runner
//!
//! ## Usage
//!
//! ```text
//! category-runner -f <PATH> [-i <CATEGORY>...] [-e <CATEGORY>...]
//! ```
//!
//! ## Modules
//!
//! - `discovery` - Lazy walk for test project files
//! - `test_interfaces` - Discovery/executor traits and their default implementations
//! - `test_runner` - The sequential runner loop and console reporting
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod discovery;
pub mod test_interfaces;
pub mod test_runner;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use tracing_subscriber::EnvFilter;

use crate::version::RUNNER_VERSION;
use discovery::DEFAULT_PROJECT_SUFFIX;
use test_runner::RunSettings;

/// Runner program used when neither `--runner` nor `TEST_RUNNER_PROGRAM` is set.
pub const DEFAULT_RUNNER: &str = "dotnet";

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run `dotnet test` for every test project under a folder
#[derive(Parser, Debug)]
#[command(name = "category-runner")]
#[command(version = RUNNER_VERSION)]
#[command(about = "Discover test projects and run them with a category filter", long_about = None)]
pub struct Cli {
    /// Folder that contains your test projects
    #[arg(short = 'f', long = "folder", value_name = "PATH")]
    pub folder: PathBuf,

    /// Included categories (matched against the "Category" trait)
    #[arg(short = 'i', long = "include", value_name = "CATEGORY", num_args = 1..)]
    pub include: Vec<String>,

    /// Excluded categories (matched against the "Category" trait)
    #[arg(short = 'e', long = "exclude", value_name = "CATEGORY", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Program invoked as `<PROGRAM> test <project> [--filter <expr>]`
    #[arg(long, value_name = "PROGRAM", env = "TEST_RUNNER_PROGRAM", default_value = DEFAULT_RUNNER)]
    pub runner: String,

    /// File-name suffix marking a test project (case-insensitive)
    #[arg(
        long,
        value_name = "SUFFIX",
        default_value = DEFAULT_PROJECT_SUFFIX,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub suffix: String,

    /// Print the commands without running them
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Exit with a failure code if any test project fails
    #[arg(long)]
    pub strict: bool,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn into_settings(self) -> RunSettings {
        RunSettings {
            folder: self.folder,
            include: self.include,
            exclude: self.exclude,
            runner: self.runner,
            suffix: self.suffix,
            dry_run: self.dry_run,
            strict: self.strict,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too and print to stdout
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            let _ = e.print();
            process::exit(code.0);
        }
    };

    init_tracing(cli.verbose);
    tracing::debug!(
        version = RUNNER_VERSION,
        args = ?env::args_os().skip(1).collect::<Vec<_>>(),
        "starting"
    );

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Initialize structured logging on stderr with env-based filter.
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .try_init();
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let settings = cli.into_settings();
    tracing::debug!(?settings, "resolved options");
    test_runner::run_tests(&settings)
}

// ============================================================================
// Tests
// ============================================================================
