//! Activate Event Port
//!
//! Observable interface for planning and execution. Drives the console
//! output, the NDJSON stream for automation, and test assertions.

use crate::domain::entities::{Operation, Phase};
use crate::domain::value_objects::{LoadState, ServiceTarget};

/// Event emitted while planning or executing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivateEvent {
    /// Planning finished
    Planned {
        installs: usize,
        removals: usize,
        bootouts: usize,
        bootstraps: usize,
    },

    /// Non-fatal condition noticed while planning
    Warning { message: String },

    /// Operation that would run, reported instead of running it
    DryRun { operation: Operation },

    /// Operation ran successfully
    OperationSucceeded { operation: Operation },

    /// Operation failed
    OperationFailed { operation: Operation, error: String },

    /// Service reached the expected state
    Confirmed {
        service: ServiceTarget,
        state: LoadState,
    },

    /// Service did not reach the expected state in time
    ConfirmTimedOut {
        service: ServiceTarget,
        state: LoadState,
        timeout_secs: u64,
    },

    /// Execution stopped before `next` because of an interrupt
    Interrupted { next: Phase },

    /// Execution finished
    Completed { error_count: usize, dry_run: bool },
}

/// Trait for receiving activate events
///
/// Implementations:
/// - `ConsoleEventSink`: human-readable lines on stderr
/// - `JsonEventSink`: NDJSON on stdout
/// - `NoopEventSink`: silent operation
pub trait ActivateEventSink: Send + Sync {
    fn on_event(&self, event: ActivateEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ActivateEventSink for NoopEventSink {
    fn on_event(&self, _event: ActivateEvent) {}
}
