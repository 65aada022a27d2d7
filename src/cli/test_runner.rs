//! Sequential test runner
//!
//! ## Flow
//!
//! The filter expression is built once, then every project yielded by discovery is run to
//! completion before the next one starts:
//!
//! ```text
//! Start -> ParseArgs -> (Fail | BuildFilter -> DiscoverAndRun* -> Done)
//! ```
//!
//! A project whose runner exits non-zero does not stop the loop and, unless `--strict` is
//! set, does not change the exit code. A discovery or launch error stops the loop at once.
//!
//! ## RunReporter Trait
//!
//! Console output goes through `RunReporter` so the loop itself never prints.

use std::path::PathBuf;

use crate::filter::build_filter;

use super::test_interfaces::{
    DryRunExecutor, ProcessExecutor, ProjectOutcome, SuffixDiscovery, TestDiscovery, TestError, TestExecutor,
    TestInvocation,
};
use super::{CliError, CliResult, ExitCode};

/// Resolved options for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub folder: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub runner: String,
    pub suffix: String,
    pub dry_run: bool,
    pub strict: bool,
}

// ============================================================================
// Run Reporter Trait
// ============================================================================

/// Trait for reporting run progress.
pub trait RunReporter {
    /// Called once, before discovery starts
    fn on_run_start(&mut self, _settings: &RunSettings) {}

    /// Called right before a project's runner is launched
    fn on_project_start(&mut self, invocation: &TestInvocation);

    /// Called after the runner for a project has exited
    fn on_project_complete(&mut self, _invocation: &TestInvocation, _outcome: ProjectOutcome) {}

    /// Called when every discovered project has been run
    fn on_run_complete(&mut self, summary: &RunSummary);
}

/// Summary of a completed run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of projects handed to the executor
    pub projects: usize,
    /// Projects whose runner exited unsuccessfully, in run order
    pub failed: Vec<PathBuf>,
}

/// Default console reporter
#[derive(Default)]
pub struct ConsoleReporter;

impl RunReporter for ConsoleReporter {
    fn on_run_start(&mut self, settings: &RunSettings) {
        println!("Folder: {}", settings.folder.display());
        if !settings.include.is_empty() {
            println!("Include: {}", settings.include.join(","));
        }
        if !settings.exclude.is_empty() {
            println!("Exclude: {}", settings.exclude.join(","));
        }
    }

    fn on_project_start(&mut self, invocation: &TestInvocation) {
        println!("Running tests for \"{}\".", invocation.project.display());
        println!(" Command: {}", invocation.command_line());
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        if summary.projects == 0 {
            println!("No test projects found");
        }
        if !summary.failed.is_empty() {
            println!(
                "{} of {} test project(s) failed:",
                summary.failed.len(),
                summary.projects
            );
            for project in &summary.failed {
                println!("  {}", project.display());
            }
        }
        println!("All done");
    }
}

/// Run every discovered project with the configured runner.
///
/// Returns the exit code for the whole run: success unless `--strict` is set and a
/// project failed.
#[tracing::instrument(skip_all, fields(folder = %settings.folder.display()))]
pub fn run_tests(settings: &RunSettings) -> CliResult<ExitCode> {
    let discovery = SuffixDiscovery::new(settings.suffix.as_str());
    let mut executor: Box<dyn TestExecutor> = if settings.dry_run {
        Box::new(DryRunExecutor::new(settings.runner.as_str()))
    } else {
        Box::new(ProcessExecutor::new(settings.runner.as_str()))
    };
    let mut reporter = ConsoleReporter;

    let summary = run_projects(settings, &discovery, executor.as_mut(), &mut reporter)
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    if settings.strict && !summary.failed.is_empty() {
        // Summary already printed
        return Err(CliError::new("", ExitCode::FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

/// The runner loop, independent of how projects are found, launched, and reported.
pub fn run_projects(
    settings: &RunSettings,
    discovery: &dyn TestDiscovery,
    executor: &mut dyn TestExecutor,
    reporter: &mut dyn RunReporter,
) -> Result<RunSummary, TestError> {
    reporter.on_run_start(settings);

    let filter = build_filter(&settings.include, &settings.exclude);
    tracing::debug!(filter = %filter, "built category filter");

    let mut summary = RunSummary::default();
    for project in discovery.discover(&settings.folder) {
        let invocation = TestInvocation::new(project?, &filter);

        reporter.on_project_start(&invocation);
        let outcome = executor.execute(&invocation)?;
        summary.projects += 1;

        if let ProjectOutcome::Failed { code } = outcome {
            tracing::warn!(
                project = %invocation.project.display(),
                exit_code = ?code,
                "test run exited unsuccessfully"
            );
            summary.failed.push(invocation.project.clone());
        }
        reporter.on_project_complete(&invocation, outcome);
    }

    reporter.on_run_complete(&summary);
    Ok(summary)
}

// ============================================================================
// Tests
// ============================================================================
