//! Common test utilities for CLI integration tests.
//!
//! Each [`TestEnv`] owns a temporary directory used both as the working
//! directory (so no `rentbnb.yaml` from the host is picked up) and as the
//! parent of the data directory.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host settings into a test run.
const HOST_VARIABLES: &[&str] = &[
    "RENTBNB_DATA_DIR",
    "RENTBNB_BUSY_TIMEOUT",
    "RENTBNB_ADDON_RATE",
    "RENTBNB_CURRENCY",
    "RENTBNB_MAXIMUM_LOCK_WAIT_SECONDS",
    "RENTBNB_DISABLE_AUTOINIT",
    "RENTBNB_OUTPUT_FORMAT",
    "RENTBNB_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the rentbnb data directory (created on first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("rentbnb-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with no `--data-dir`, run from the temp directory.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("rentbnb").expect("Failed to find rentbnb binary");
        cmd.current_dir(&self.temp_path);
        for var in HOST_VARIABLES {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("rentbnb.db")
    }

    /// Add a cabin and return its id.
    pub fn add_cabin(&self, number: &str, capacity: u32, price: &str) -> i64 {
        let output = self
            .command()
            .args(["cabin", "add", "--name"])
            .arg(format!("Cabin {number}"))
            .args(["--number", number])
            .args(["--capacity", &capacity.to_string()])
            .args(["--price", price])
            .output()
            .expect("Failed to run cabin add");

        assert!(
            output.status.success(),
            "cabin add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a cabin id")
    }

    /// Run `book` and return the command output.
    pub fn book_output(
        &self,
        cabin: i64,
        guest: i64,
        from: &str,
        to: &str,
        guests: u32,
    ) -> std::process::Output {
        self.command()
            .arg("book")
            .args(["--cabin", &cabin.to_string()])
            .args(["--guest", &guest.to_string()])
            .args(["--from", from, "--to", to])
            .args(["--guests", &guests.to_string()])
            .output()
            .expect("Failed to run book")
    }

    /// Book a stay and return `(reservation id, total)`.
    pub fn book(&self, cabin: i64, guest: i64, from: &str, to: &str, guests: u32) -> (i64, String) {
        let output = self.book_output(cabin, guest, from, to, guests);
        assert!(
            output.status.success(),
            "book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_booking(&output.stdout)
    }

    /// Run a lifecycle command (`check-in`, `check-out`, ...) and require success.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

/// Parse `book` output: the id and total, tab separated.
pub fn parse_booking(stdout: &[u8]) -> (i64, String) {
    let text = String::from_utf8_lossy(stdout);
    let mut fields = text.trim().split('\t');
    let id = fields
        .next()
        .and_then(|id| id.parse().ok())
        .expect("Output does not start with a reservation id");
    let total = fields.next().expect("Output has no total").to_string();
    (id, total)
}
