//! launchctl adapter
//!
//! Implements the ServiceManager port by running `/bin/launchctl`.
//! `print` answers load-state queries (exit 0 means loaded); `bootstrap`
//! and `bootout` go through `sudo` in the system domain.

use crate::domain::entities::Operation;
use crate::domain::ports::{ServiceManager, ServiceManagerError, ServiceManagerResult};
use crate::domain::value_objects::command_line::LAUNCHCTL;
use crate::domain::value_objects::{CommandLine, DomainTarget, ServicePath, ServiceTarget};
use crate::error::ActivateError;

use super::shell::{CommandRunner, ProcessRunner};

/// launchd client
#[derive(Debug, Clone, Default)]
pub struct Launchctl<R = ProcessRunner> {
    runner: R,
}

impl Launchctl {
    pub fn new() -> Self {
        Self::with_runner(ProcessRunner)
    }
}

impl<R: CommandRunner> Launchctl<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn run(&self, operation: Operation) -> ServiceManagerResult<()> {
        let command = operation.command_line();
        self.runner
            .run(&command)
            .map_err(|e| manager_error(&command, e))
    }
}

impl<R: CommandRunner> ServiceManager for Launchctl<R> {
    fn is_loaded(&self, service: &ServiceTarget) -> bool {
        let command = CommandLine::new(LAUNCHCTL, ["print".to_string(), service.to_string()]);
        match self.runner.output(&command) {
            Ok(output) => {
                log::trace!("{} -> {:?}", command, output.code);
                output.is_success()
            }
            Err(e) => {
                log::debug!("{}: {}", command, e);
                false
            }
        }
    }

    fn bootstrap(&self, domain: DomainTarget, path: &ServicePath) -> ServiceManagerResult<()> {
        self.run(Operation::Bootstrap {
            service: path.service_target(domain),
            path: path.clone(),
        })
    }

    fn bootout(&self, service: &ServiceTarget) -> ServiceManagerResult<()> {
        self.run(Operation::Bootout {
            service: service.clone(),
        })
    }
}

fn manager_error(command: &CommandLine, err: ActivateError) -> ServiceManagerError {
    match err {
        ActivateError::CommandFailed { code, stderr, .. } => ServiceManagerError::Rejected {
            command: command.to_string(),
            code,
            detail: stderr,
        },
        other => ServiceManagerError::Unavailable {
            command: command.to_string(),
            message: other.to_string(),
        },
    }
}
