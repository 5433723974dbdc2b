//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides the concrete implementations; the `testing`
//! module provides in-memory ones.

pub mod activate_events;
pub mod clock;
pub mod file_system;
pub mod service_manager;

pub use activate_events::{ActivateEvent, ActivateEventSink, NoopEventSink};
pub use clock::Clock;
pub use file_system::{FileSystem, FsError, FsResult};
pub use service_manager::{ServiceManager, ServiceManagerError, ServiceManagerResult};
