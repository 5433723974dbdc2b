//! Command runner for external programs
//!
//! `CommandRunner` is the seam between adapters that shell out (launchctl,
//! privileged file operations) and process spawning. `ProcessRunner` spawns
//! the command directly, without a shell in between.

use std::process::{Command, Stdio};

use crate::domain::value_objects::CommandLine;
use crate::error::{ActivateError, ActivateResult};

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes external commands
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion, capturing its output.
    ///
    /// `Err` only when the command could not be started.
    fn output(&self, command: &CommandLine) -> std::io::Result<CommandOutput>;

    /// Run a mutating command, echoing it first (`+ cmd`).
    ///
    /// A nonzero exit becomes [`ActivateError::CommandFailed`].
    fn run(&self, command: &CommandLine) -> ActivateResult<()> {
        log::info!("+ {}", command);
        let output = self
            .output(command)
            .map_err(|source| ActivateError::CommandLaunch {
                command: command.to_string(),
                source,
            })?;

        if output.is_success() {
            Ok(())
        } else {
            Err(ActivateError::CommandFailed {
                command: command.to_string(),
                code: output.code.unwrap_or(-1),
                stderr: output.stderr,
            })
        }
    }
}

/// Production runner using `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn output(&self, command: &CommandLine) -> std::io::Result<CommandOutput> {
        // sudo asks for a password on the terminal, not on stdin
        let output = Command::new(command.executable())
            .args(command.arguments())
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
