//! Event Sink Implementations
//!
//! Concrete implementations of ActivateEventSink:
//! - ConsoleEventSink: human-readable progress on stderr
//! - JsonEventSink: NDJSON output for automation

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
