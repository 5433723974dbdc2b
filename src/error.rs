//! Error types for launchd-activate
//!
//! Uses `thiserror` for library errors. Only failures that make producing a
//! plan impossible surface as `Err`; per-operation failures during execution
//! are counted, not propagated.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::domain::ports::{FsError, ServiceManagerError};
use crate::domain::value_objects::{LoadState, ServiceTarget};

/// Result type alias for launchd-activate operations
pub type ActivateResult<T> = Result<T, ActivateError>;

/// Main error type for launchd-activate operations
#[derive(Error, Debug)]
pub enum ActivateError {
    /// The declared (new) source directory could not be listed
    #[error("cannot read service directory {path}: {message}")]
    SourceUnreadable { path: PathBuf, message: String },

    /// A path given on the command line does not exist
    #[error("{path} does not exist")]
    PathNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Home directory could not be resolved for the per-user root
    #[error("could not determine the home directory of the current user")]
    NoHomeDirectory,

    /// An external command exited with a nonzero status
    #[error("{command} exited with status {code}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// An external command could not be spawned at all
    #[error("failed to launch {command}: {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A service did not reach the expected load state before the deadline
    #[error("timed out after {}s waiting for {service} to {}", .timeout.as_secs(), .state.verb())]
    Timeout {
        service: ServiceTarget,
        state: LoadState,
        timeout: Duration,
    },

    /// File system port failure
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Service manager port failure
    #[error(transparent)]
    ServiceManager(#[from] ServiceManagerError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
