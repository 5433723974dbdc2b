//! ServiceManager port - the external service manager (launchd)
//!
//! Three operations: query whether a service is loaded, start
//! (bootstrap) and stop (bootout). Failures are returned as data; the
//! caller decides how to count them.

use thiserror::Error;

use crate::domain::value_objects::{DomainTarget, ServicePath, ServiceTarget};

pub type ServiceManagerResult<T> = Result<T, ServiceManagerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceManagerError {
    /// The manager rejected the request
    #[error("{command} failed with exit code {code}{}", detail_suffix(.detail))]
    Rejected {
        command: String,
        code: i32,
        detail: String,
    },

    /// The manager could not be reached (spawn failure, signal, ...)
    #[error("{command}: {message}")]
    Unavailable { command: String, message: String },
}

fn detail_suffix(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        String::new()
    } else {
        format!(": {}", detail)
    }
}

/// Client for the external service manager
pub trait ServiceManager {
    /// Whether `service` is currently loaded
    fn is_loaded(&self, service: &ServiceTarget) -> bool;

    /// Load and start the definition at `path` into `domain`
    fn bootstrap(&self, domain: DomainTarget, path: &ServicePath) -> ServiceManagerResult<()>;

    /// Stop and unload `service`
    fn bootout(&self, service: &ServiceTarget) -> ServiceManagerResult<()>;
}
