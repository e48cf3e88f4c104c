// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Path of the binary built by cargo for integration tests
pub fn fraglog_binary() -> &'static str {
    env!("CARGO_BIN_EXE_fraglog")
}

/// Path of a fixture under tests/data
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Command running inside `workdir` with user config lookups pointed at it,
/// so a developer's own config file never leaks into the tests
pub fn fraglog_command(workdir: &Path) -> Command {
    let mut cmd = Command::new(fraglog_binary());
    cmd.current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env("HOME", workdir)
        .env_remove("FRAGLOG_LOG");
    cmd
}

/// Helper function to run fraglog with given arguments and input via stdin
pub fn run_fraglog_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    let workdir = TempDir::new().expect("Failed to create temp dir");
    run_fraglog_in_dir(workdir.path(), args, input)
}

/// Run fraglog inside `workdir`, feeding `input` on stdin
pub fn run_fraglog_in_dir(workdir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut cmd = fraglog_command(workdir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start fraglog");

    if let Some(stdin) = cmd.stdin.as_mut() {
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run fraglog on files, without stdin
pub fn run_fraglog_with_files(args: &[&str], files: &[&Path]) -> (String, String, i32) {
    let workdir = TempDir::new().expect("Failed to create temp dir");
    let output = fraglog_command(workdir.path())
        .args(args)
        .args(files)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute fraglog");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run on a fixture and return the JSON report printed to stdout
pub fn report_for_fixture(name: &str, extra_args: &[&str]) -> serde_json::Value {
    let mut args = vec!["-o", "-"];
    args.extend_from_slice(extra_args);
    let path = fixture(name);
    let (stdout, stderr, exit_code) = run_fraglog_with_files(&args, &[path.as_path()]);
    assert_eq!(exit_code, 0, "fraglog failed: {}", stderr);
    serde_json::from_str(&stdout).expect("stdout should be a JSON report")
}

/// Helper to extract the match count from --stats stderr output
pub fn extract_matches_from_stats(stderr: &str) -> Option<usize> {
    stderr
        .lines()
        .find(|line| line.starts_with("Lines processed:"))
        .and_then(|line| line.split("Matches: ").nth(1))
        .and_then(|rest| {
            rest.split(|c: char| !c.is_ascii_digit())
                .next()
                .and_then(|n| n.parse().ok())
        })
}
