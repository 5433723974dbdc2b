//! JSON Event Sink
//!
//! Outputs activate events as NDJSON for automation.

use crate::domain::entities::Operation;
use crate::domain::ports::{ActivateEvent, ActivateEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn operation_json(operation: &Operation) -> serde_json::Value {
    let kind = match operation {
        Operation::Install { .. } => "install",
        Operation::Remove { .. } => "remove",
        Operation::Bootout { .. } => "bootout",
        Operation::Bootstrap { .. } => "bootstrap",
    };
    serde_json::json!({
        "kind": kind,
        "phase": operation.phase().to_string(),
        "command": operation.to_string(),
        "service": operation.service().map(ToString::to_string),
    })
}

impl ActivateEventSink for JsonEventSink {
    fn on_event(&self, event: ActivateEvent) {
        let json = match event {
            ActivateEvent::Planned {
                installs,
                removals,
                bootouts,
                bootstraps,
            } => serde_json::json!({
                "event": "planned",
                "installs": installs,
                "removals": removals,
                "bootouts": bootouts,
                "bootstraps": bootstraps,
            }),

            ActivateEvent::Warning { message } => serde_json::json!({
                "event": "warning",
                "message": message,
            }),

            ActivateEvent::DryRun { operation } => serde_json::json!({
                "event": "dry_run",
                "operation": operation_json(&operation),
            }),

            ActivateEvent::OperationSucceeded { operation } => serde_json::json!({
                "event": "operation_succeeded",
                "operation": operation_json(&operation),
            }),

            ActivateEvent::OperationFailed { operation, error } => serde_json::json!({
                "event": "operation_failed",
                "operation": operation_json(&operation),
                "error": error,
            }),

            ActivateEvent::Confirmed { service, state } => serde_json::json!({
                "event": "confirmed",
                "service": service.to_string(),
                "state": state.to_string(),
            }),

            ActivateEvent::ConfirmTimedOut {
                service,
                state,
                timeout_secs,
            } => serde_json::json!({
                "event": "confirm_timed_out",
                "service": service.to_string(),
                "state": state.to_string(),
                "timeout_secs": timeout_secs,
            }),

            ActivateEvent::Interrupted { next } => serde_json::json!({
                "event": "interrupted",
                "next_phase": next.to_string(),
            }),

            ActivateEvent::Completed {
                error_count,
                dry_run,
            } => {
                let status = if error_count == 0 {
                    "success"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "complete",
                    "status": status,
                    "errors": error_count,
                    "dry_run": dry_run,
                })
            }
        };

        self.write_event(json);
    }
}
