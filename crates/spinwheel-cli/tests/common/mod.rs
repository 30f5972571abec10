//! Common utilities for CLI E2E tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Scratch directory holding a config file for one test.
pub struct Sandbox {
    _dir: TempDir,
    pub config: PathBuf,
}

impl Sandbox {
    /// Fresh sandbox with a fast deceleration so spins finish quickly.
    pub fn new() -> Self {
        Self::with_config("[spin]\ndeceleration_ms = 20\n")
    }

    pub fn with_config(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("config.toml");
        std::fs::write(&config, content).expect("Failed to write config");
        Self { _dir: dir, config }
    }
}

fn command(config: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spinwheel"));
    cmd.arg("--config")
        .arg(config)
        .args(args)
        .env_remove("SPINWHEEL_CONFIG")
        .env("SPINWHEEL_LOG", "off");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
pub fn run_cli(config: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(config, args, "")
}

/// Run a CLI command with `input` piped to stdin.
pub fn run_cli_with_input(config: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = command(config, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
pub fn run_cli_success(config: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(config, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack,
        needle
    );
}
