//! Application Layer
//!
//! Use cases that orchestrate the business flow. Decisions live in the
//! domain layer; this layer wires ports together and sequences the run.
//!
//! ## Use Cases
//!
//! - `ActivateUseCase` - plan against the live state, then apply the plan

pub mod activate;

pub use activate::{
    ActivateOptions, ActivateReport, ActivateUseCase, Failure, PlanExecutor, DEFAULT_POLL_INTERVAL,
    DEFAULT_TIMEOUT, MIN_POLL_INTERVAL,
};
