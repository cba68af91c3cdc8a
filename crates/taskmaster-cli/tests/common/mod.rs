#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;

/// Run the CLI with an isolated data directory against the given API.
pub fn run_cli_with_env(args: &[&str], data_dir: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskmaster"));
    cmd.args(args);
    cmd.env("TASKMASTER_DATA_DIR", data_dir);
    cmd.env("TASKMASTER_API_URL", api_url);
    cmd.env_remove("TASKMASTER_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_with_env_success(args: &[&str], data_dir: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, data_dir, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Path of a persisted session entry.
pub fn entry_path(data_dir: &Path, name: &str) -> std::path::PathBuf {
    data_dir.join(format!("taskmaster_auth_{}.json", name))
}

pub fn login_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "_id": "u1",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "user",
            "token": "T1",
            "refreshToken": "R1"
        }
    })
}

pub fn task_json(id: &str, title: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "status": status,
        "priority": "medium",
        "tags": []
    })
}
