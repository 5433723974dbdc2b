//! Domain Entities
//!
//! - `Plan` - The computed reconciliation result
//! - `Operation` - A single side effect the executor applies

mod operation;
mod plan;

pub use operation::{Operation, Phase};
pub use plan::Plan;
