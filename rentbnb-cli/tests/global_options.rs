//! Global flags and the environment variables behind them.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_data_dir_from_environment() {
    let env = TestEnv::new();
    env.command_bare()
        .env("RENTBNB_DATA_DIR", &env.data_dir)
        .args(["cabin", "add", "--name", "Birch", "--number", "001"])
        .args(["--capacity", "2", "--price", "100"])
        .assert()
        .success();

    assert!(env.database_path().exists());
    let list = env.run_ok(&["cabin", "list"]);
    assert!(list.contains("Birch"));
}

#[test]
fn test_flag_beats_environment() {
    let env = TestEnv::new();
    let elsewhere = env.path().join("elsewhere");
    env.add_cabin("001", 2, "100");

    env.command_bare()
        .env("RENTBNB_DATA_DIR", &elsewhere)
        .arg("--data-dir")
        .arg(&env.data_dir)
        .args(["cabin", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cabin 001"));
    assert!(!elsewhere.exists());
}

#[test]
fn test_autoinit_disabled_by_config_environment() {
    let env = TestEnv::new();
    env.command()
        .env("RENTBNB_DISABLE_AUTOINIT", "true")
        .arg("list")
        .assert()
        .code(3);
}

#[test]
fn test_autoinit_creates_database() {
    let env = TestEnv::new();
    assert!(!env.data_dir.exists());
    env.command().arg("list").assert().success();
    assert!(env.database_path().exists());
}

#[test]
fn test_verbose_logs_and_quiet_silences() {
    let env = TestEnv::new();
    let cabin = env.add_cabin("001", 4, "100");
    let cabin = cabin.to_string();

    let verbose = env
        .command()
        .arg("--verbose")
        .args(["book", "--cabin", &cabin, "--guest", "1"])
        .args(["--from", "2031-01-01", "--to", "2031-01-02"])
        .output()
        .unwrap();
    assert!(verbose.status.success());
    assert!(!verbose.stderr.is_empty());

    // A past arrival is accepted with a warning, which --quiet suppresses
    let quiet = env
        .command()
        .arg("--quiet")
        .args(["book", "--cabin", &cabin, "--guest", "1"])
        .args(["--from", "2001-01-01", "--to", "2001-01-02"])
        .output()
        .unwrap();
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());

    let normal = env
        .command()
        .args(["book", "--cabin", &cabin, "--guest", "1"])
        .args(["--from", "2001-02-01", "--to", "2001-02-02"])
        .output()
        .unwrap();
    assert!(normal.status.success());
    assert!(!normal.stderr.is_empty());
}

#[test]
fn test_environment_overrides_output_format() {
    let env = TestEnv::new();
    let cabin = env.add_cabin("001", 4, "100");
    env.book(cabin, 1, "2031-01-01", "2031-01-02", 1);

    let output = env
        .command()
        .env("RENTBNB_OUTPUT_FORMAT", "json")
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);

    // An explicit flag still wins
    env.command()
        .env("RENTBNB_OUTPUT_FORMAT", "json")
        .args(["list", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id\tcabin_id"));
}
