#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prism"));
    cmd.args(args);
    cmd.env("PRISM_DATA_DIR", data_dir);
    cmd.env_remove("PRISM_URL");
    cmd.env_remove("PRISM_USERNAME");
    cmd.env_remove("PRISM_PASSWORD");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Read the session id stored in the data directory.
pub fn stored_session_id(data_dir: &Path) -> Option<String> {
    let json = std::fs::read_to_string(data_dir.join("session.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&json).ok()?;
    value["item"]["id"].as_str().map(str::to_string)
}
