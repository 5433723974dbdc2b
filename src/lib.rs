//! launchd-activate - reconcile launchd services with a declared directory
//!
//! Given a directory of service definitions (`NEW`) and optionally the
//! directory activated last time (`OLD`), computes a [`Plan`] of file
//! and launchctl operations and executes it in phases: install files,
//! stop services, confirm they stopped, start services and confirm they
//! started.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod testing;

// Re-exports for convenience
pub use application::{ActivateOptions, ActivateReport, ActivateUseCase, Failure};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{Operation, Phase, Plan};
pub use domain::value_objects::{
    DomainTarget, InstallMethod, LoadState, ServiceDirectory, ServicePath, ServiceTarget,
};
pub use error::{ActivateError, ActivateResult};
