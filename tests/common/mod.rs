//! Common test utilities for hrbridge integration tests
//!
//! - CLI invocation helpers with an isolated config directory
//! - Fixture files written into that directory

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    Interrupted = 130,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            130 => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout is not JSON")
    }
}

impl std::ops::Deref for CliResponse {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.stdout
    }
}

/// Isolated config directory and environment for one test
pub struct MockEnvironment {
    pub config_dir: TempDir,
    pub env_vars: HashMap<String, String>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }

    pub fn store_path(&self) -> PathBuf {
        self.config_path().join("configurations.json")
    }

    /// Write `config.toml` into the config directory
    pub fn write_config(&self, contents: &str) {
        fs::write(self.config_path().join("config.toml"), contents).expect("write config");
    }

    /// Write an arbitrary fixture file and return its path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.config_path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// A configured command, for assert_cmd style assertions
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hrbridge"));
        cmd.env("HRBRIDGE_CONFIG_DIR", self.config_path());
        cmd.env_remove("HRBRIDGE_API_KEY");
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

/// Run the CLI with a fresh environment
pub fn hrbridge(args: &[&str]) -> CliResponse {
    hrbridge_with_env(args, &MockEnvironment::new())
}

/// Run the CLI in the given environment
pub fn hrbridge_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = env.command();
    cmd.arg("--no-color");
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    let output = cmd.output().expect("Failed to execute command");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);
    CliResponse {
        stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}
