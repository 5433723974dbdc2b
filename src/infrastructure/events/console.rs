//! Console Event Sink
//!
//! Human-readable progress on stderr. Warnings and failures are already
//! reported through the logger, so this sink only renders what the log does
//! not: dry-run operations, confirmations and the final summary.

use crossterm::style::Stylize;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{ActivateEvent, ActivateEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn stderr(color: bool) -> Self {
        Self::with_writer(io::stderr(), color)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, color: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
            verbose: false,
        }
    }

    /// Also report each successful operation and confirmation
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }

    fn render(&self, event: ActivateEvent) -> Option<String> {
        match event {
            ActivateEvent::DryRun { operation } => {
                let tag = if self.color {
                    "[DRY RUN]".yellow().to_string()
                } else {
                    "[DRY RUN]".to_string()
                };
                Some(format!("{} {}", tag, operation))
            }

            ActivateEvent::OperationSucceeded { operation } if self.verbose => {
                Some(format!("{} {}", self.mark(true), operation))
            }

            ActivateEvent::Confirmed { service, state } if self.verbose => {
                Some(format!("{} {} {}", self.mark(true), service, state))
            }

            ActivateEvent::Completed {
                error_count,
                dry_run,
            } => {
                let summary = match (dry_run, error_count) {
                    (true, _) => "Dry run complete, nothing was changed".to_string(),
                    (false, 0) => "Activation complete".to_string(),
                    (false, 1) => "Activation finished with 1 error".to_string(),
                    (false, n) => format!("Activation finished with {} errors", n),
                };
                Some(format!("{} {}", self.mark(error_count == 0), summary))
            }

            ActivateEvent::Planned { .. }
            | ActivateEvent::Warning { .. }
            | ActivateEvent::OperationSucceeded { .. }
            | ActivateEvent::OperationFailed { .. }
            | ActivateEvent::Confirmed { .. }
            | ActivateEvent::ConfirmTimedOut { .. }
            | ActivateEvent::Interrupted { .. } => None,
        }
    }

    fn mark(&self, ok: bool) -> String {
        match (ok, self.color) {
            (true, true) => "✓".green().to_string(),
            (false, true) => "✗".red().to_string(),
            (true, false) => "[OK]".to_string(),
            (false, false) => "[FAIL]".to_string(),
        }
    }
}

impl ActivateEventSink for ConsoleEventSink {
    fn on_event(&self, event: ActivateEvent) {
        if let Some(text) = self.render(event) {
            self.line(text);
        }
    }
}
