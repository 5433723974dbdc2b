//! Infrastructure Layer
//!
//! Concrete implementations of domain ports. This layer handles all I/O.
//!
//! ## Structure
//!
//! - `fs/` - local file system, home directory lookup
//! - `launchctl` - service manager client
//! - `shell` - external command runner
//! - `events/` - console and NDJSON event sinks
//! - `clock`, `session`, `logging` - ambient process services

pub mod clock;
pub mod events;
pub mod fs;
pub mod launchctl;
pub mod logging;
pub mod session;
pub mod shell;

pub use clock::SystemClock;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use launchctl::Launchctl;
pub use shell::{CommandOutput, CommandRunner, ProcessRunner};
