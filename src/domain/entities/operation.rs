//! Operation entity - one side effect applied by the executor
//!
//! Operations are derived from a [`Plan`](super::Plan) at execution time.
//! Each renders as the equivalent shell command, which is what dry-run
//! reports.

use std::fmt;

use crate::domain::value_objects::command_line::{CP, LAUNCHCTL, LN, RM};
use crate::domain::value_objects::{CommandLine, InstallMethod, ServicePath, ServiceTarget};

/// Execution phases, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Install and remove definition files
    Files,
    /// Stop services
    Stop,
    /// Wait for stopped services to unload
    ConfirmStop,
    /// Start services and wait for them to load
    Start,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Files => write!(f, "files"),
            Phase::Stop => write!(f, "stop"),
            Phase::ConfirmStop => write!(f, "confirm-stop"),
            Phase::Start => write!(f, "start"),
        }
    }
}

/// A single mutating action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Place `source` at `destination`
    Install {
        source: ServicePath,
        destination: ServicePath,
        method: InstallMethod,
    },
    /// Delete `destination`
    Remove { destination: ServicePath },
    /// Stop a service
    Bootout { service: ServiceTarget },
    /// Start a service from its installed definition
    Bootstrap {
        service: ServiceTarget,
        path: ServicePath,
    },
}

impl Operation {
    pub fn phase(&self) -> Phase {
        match self {
            Operation::Install { .. } | Operation::Remove { .. } => Phase::Files,
            Operation::Bootout { .. } => Phase::Stop,
            Operation::Bootstrap { .. } => Phase::Start,
        }
    }

    /// Whether the operation must be escalated to root
    pub fn needs_privilege(&self) -> bool {
        match self {
            Operation::Install { destination, .. } | Operation::Remove { destination } => {
                destination.needs_privilege()
            }
            Operation::Bootout { service } | Operation::Bootstrap { service, .. } => {
                service.domain().needs_privilege()
            }
        }
    }

    /// Service affected by a service-manager operation
    pub fn service(&self) -> Option<&ServiceTarget> {
        match self {
            Operation::Bootout { service } | Operation::Bootstrap { service, .. } => Some(service),
            Operation::Install { .. } | Operation::Remove { .. } => None,
        }
    }

    /// Equivalent command line
    pub fn command_line(&self) -> CommandLine {
        let command = match self {
            Operation::Install {
                source,
                destination,
                method: InstallMethod::Symlink,
            } => CommandLine::new(
                LN,
                [
                    "-fs".to_string(),
                    source.to_string(),
                    destination.to_string(),
                ],
            ),
            Operation::Install {
                source,
                destination,
                method: InstallMethod::Copy,
            } => CommandLine::new(CP, [source.to_string(), destination.to_string()]),
            Operation::Remove { destination } => CommandLine::new(RM, [destination.to_string()]),
            Operation::Bootout { service } => {
                CommandLine::new(LAUNCHCTL, ["bootout".to_string(), service.to_string()])
            }
            Operation::Bootstrap { service, path } => CommandLine::new(
                LAUNCHCTL,
                [
                    "bootstrap".to_string(),
                    service.domain().to_string(),
                    path.to_string(),
                ],
            ),
        };
        command.with_sudo(self.needs_privilege())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}
