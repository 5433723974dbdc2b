//! Activate Use Case
//!
//! Reconciles installed service definitions with a declared directory:
//! plan the changes, then apply them phase by phase.

mod executor;
mod options;
mod report;
mod use_case;

pub use executor::PlanExecutor;
pub use options::{ActivateOptions, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, MIN_POLL_INTERVAL};
pub use report::{ActivateReport, Failure};
pub use use_case::ActivateUseCase;
