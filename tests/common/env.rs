//! Isolated environment for running the launchd-activate binary.
//!
//! The home directory is redirected through `LAUNCHD_ACTIVATE_HOME`, and
//! the config directory through `XDG_CONFIG_HOME`, so nothing outside the
//! temp directory is read or written.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::plist;

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_launchd-activate")),
        };
        for dir in ["home", "config", "new", "old"] {
            std::fs::create_dir_all(env.path(dir)).expect("Failed to create directories");
        }
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Directory of definitions to activate
    pub fn new_dir(&self) -> PathBuf {
        self.path("new")
    }

    /// Directory of previously activated definitions
    pub fn old_dir(&self) -> PathBuf {
        self.path("old")
    }

    /// `~/Library/LaunchAgents` inside the fake home
    pub fn agents_dir(&self) -> PathBuf {
        self.path("home/Library/LaunchAgents")
    }

    /// Add a definition for `label` to `dir` and return its path
    pub fn add_service(&self, dir: &Path, label: &str) -> PathBuf {
        let path = dir.join(format!("{}.plist", label));
        std::fs::write(&path, plist(label)).expect("Failed to write definition");
        path
    }

    /// Write the config file picked up without `--config`
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.path("config/launchd-activate/config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directories");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env("LAUNCHD_ACTIVATE_HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env("NO_COLOR", "1")
            .env_remove("LAUNCHD_ACTIVATE_INSTALL_METHOD")
            .env_remove("LAUNCHD_ACTIVATE_TIMEOUT")
            .env_remove("LAUNCHD_ACTIVATE_BOOTSTRAP_TIMEOUT")
            .env_remove("LAUNCHD_ACTIVATE_COLOR");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute launchd-activate");
        Self::to_result(output)
    }

    fn to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
