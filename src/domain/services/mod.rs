//! Domain Services
//!
//! Business logic that reads state only through the domain ports.

mod planner;

pub use planner::{PlanRequest, Planner, ServiceDiff, Snapshot};
