//! Black-box tests of the category-runner binary

use std::fs::{self, File};
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Runner program that is guaranteed not to exist; any launch attempt fails the run.
const NO_RUNNER: &str = "category-runner-no-such-program";

fn runner() -> Command {
    let mut cmd = Command::cargo_bin("category-runner").unwrap();
    cmd.env_remove("TEST_RUNNER_PROGRAM").env_remove("RUST_LOG");
    cmd
}

fn project_tree(root: &Path) {
    let api = root.join("Api");
    fs::create_dir(&api).unwrap();
    File::create(api.join("ApiTests.csproj")).unwrap();
    File::create(api.join("Api.csproj")).unwrap();
}

#[test]
fn test_missing_folder_argument_exits_1() {
    runner()
        .args(["-i", "Unit", "--runner", NO_RUNNER])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--folder"))
        .stdout(predicate::str::contains("Running tests").not());
}

#[test]
fn test_unknown_flag_exits_1() {
    let dir = tempdir().unwrap();
    runner()
        .arg("-f")
        .arg(dir.path())
        .arg("--no-such-flag")
        .assert()
        .code(1);
}

#[test]
fn test_help_exits_0() {
    runner()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--include"));
}

#[test]
fn test_empty_folder_launches_nothing() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["--runner", NO_RUNNER])
        .assert()
        .success()
        .stdout(predicate::str::contains("No test projects found"))
        .stdout(predicate::str::contains("All done"));
}

#[test]
fn test_nonexistent_folder_exits_1_with_message() {
    let dir = tempdir().unwrap();
    runner()
        .arg("-f")
        .arg(dir.path().join("missing"))
        .args(["--runner", NO_RUNNER])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: failed to walk"))
        .stdout(predicate::str::contains("All done").not());
}

#[test]
fn test_missing_runner_program_exits_1() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["--runner", NO_RUNNER])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to launch test runner"));
}

#[test]
fn test_dry_run_prints_commands() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["-i", "Unit", "-e", "Slow", "--runner", NO_RUNNER, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Include: Unit"))
        .stdout(predicate::str::contains("Exclude: Slow"))
        .stdout(predicate::str::contains("ApiTests.csproj"))
        .stdout(predicate::str::contains(r#"--filter "(Category=Unit)&(Category!=Slow)""#))
        .stdout(predicate::str::contains("[dry-run]"))
        .stdout(predicate::str::contains("Api.csproj\"").not());
}

#[test]
fn test_runner_from_environment() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .env("TEST_RUNNER_PROGRAM", "dotnet-from-env")
        .arg("-f")
        .arg(dir.path())
        .arg("-n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] dotnet-from-env test"));
}

#[cfg(unix)]
#[test]
fn test_runner_receives_separate_arguments() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    // echo prints its argv, which the child writes straight to our inherited stdout
    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["-i", "Unit", "Fast", "--runner", "echo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ApiTests.csproj --filter (Category=Unit|Category=Fast)"));
}

#[cfg(unix)]
#[test]
fn test_no_categories_omit_filter_flag() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["--runner", "echo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--filter").not());
}

#[cfg(unix)]
#[test]
fn test_failed_project_keeps_exit_code_0() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["--runner", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 test project(s) failed"))
        .stdout(predicate::str::contains("All done"));
}

#[cfg(unix)]
#[test]
fn test_strict_reports_failed_project() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["--runner", "false", "--strict"])
        .assert()
        .code(1);
}

#[cfg(unix)]
#[test]
fn test_strict_passes_when_all_projects_pass() {
    let dir = tempdir().unwrap();
    project_tree(dir.path());

    runner()
        .arg("-f")
        .arg(dir.path())
        .args(["--runner", "true", "--strict"])
        .assert()
        .success();
}
