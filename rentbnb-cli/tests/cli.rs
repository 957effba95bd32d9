//! Smoke tests for argument parsing, help and completions.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("check-in"))
        .stdout(predicate::str::contains("available"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rentbnb"));
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rentbnb"));
}

#[test]
fn test_missing_subcommand_fails() {
    let env = TestEnv::new();
    env.command_bare().assert().failure();
}

#[test]
fn test_cancel_requires_actor() {
    let env = TestEnv::new();
    env.command()
        .args(["cancel", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--guest"));
}
