//! End-to-end tests for the `solution-packager completions` command.
//!
//! These tests verify the CLI behavior of the `completions` command by
//! invoking the binary directly and checking its output.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("solution-packager");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate shell completion scripts",
        ))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"))
        .stdout(predicate::str::contains("fish"))
        .stdout(predicate::str::contains("powershell"))
        .stdout(predicate::str::contains("elvish"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("solution-packager");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        // Bash completions should contain the completion function
        .stdout(predicate::str::contains("_solution-packager()"))
        // And should reference our subcommands
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("solution-packager");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        // Zsh completions should start with compdef
        .stdout(predicate::str::contains("#compdef solution-packager"))
        .stdout(predicate::str::contains("build"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("solution-packager");
    cmd.arg("completions")
        .arg("tcsh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
