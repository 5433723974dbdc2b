//! Plan executor
//!
//! Applies a [`Plan`] in four phases: files, stop, confirm-stop, start
//! (with confirm-start). Operations inside a phase are independent; a
//! failure is recorded and the rest of the phase still runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::domain::entities::{Operation, Phase, Plan};
use crate::domain::ports::{
    ActivateEvent, ActivateEventSink, Clock, FileSystem, FsResult, ServiceManager,
};
use crate::domain::value_objects::{InstallMethod, LoadState, ServiceTarget};
use crate::error::{ActivateError, ActivateResult};

use super::options::{ActivateOptions, MIN_POLL_INTERVAL};
use super::report::ActivateReport;

/// Side-effecting half of an activation run
pub struct PlanExecutor<'a, FS: ?Sized, SM: ?Sized, C: ?Sized> {
    fs: &'a FS,
    manager: &'a SM,
    clock: &'a C,
    events: &'a dyn ActivateEventSink,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a, FS, SM, C> PlanExecutor<'a, FS, SM, C>
where
    FS: FileSystem + ?Sized,
    SM: ServiceManager + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(
        fs: &'a FS,
        manager: &'a SM,
        clock: &'a C,
        events: &'a dyn ActivateEventSink,
    ) -> Self {
        Self {
            fs,
            manager,
            clock,
            events,
            interrupt: None,
        }
    }

    /// Stop before the next phase once `flag` is set
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Apply `plan`. Never fails as a whole: every failed operation or
    /// confirmation is recorded in the report.
    pub fn execute(&self, plan: &Plan, options: &ActivateOptions) -> ActivateReport {
        let mut report = ActivateReport::new(plan.clone(), options.dry_run);

        let completed = self.run_phases(plan, options, &mut report);
        if let Err(next) = completed {
            log::warn!("interrupted before {} phase", next);
            report.interrupted = Some(next);
            self.events.on_event(ActivateEvent::Interrupted { next });
        }

        self.events.on_event(ActivateEvent::Completed {
            error_count: report.error_count(),
            dry_run: options.dry_run,
        });
        report
    }

    /// Runs the phases in order; `Err` carries the phase that was skipped
    fn run_phases(
        &self,
        plan: &Plan,
        options: &ActivateOptions,
        report: &mut ActivateReport,
    ) -> Result<(), Phase> {
        self.checkpoint(Phase::Files)?;
        for operation in plan.file_operations(options.install_method) {
            self.apply(&operation, options.dry_run, report);
        }

        self.checkpoint(Phase::Stop)?;
        for operation in plan.bootout_operations() {
            self.apply(&operation, options.dry_run, report);
        }

        // Every stop target is confirmed, whether or not its stop call
        // succeeded: the service may have gone away on its own.
        self.checkpoint(Phase::ConfirmStop)?;
        if !options.dry_run {
            for service in &plan.bootout {
                self.confirm(
                    Phase::ConfirmStop,
                    service,
                    LoadState::Unloaded,
                    options,
                    report,
                );
            }
        }

        self.checkpoint(Phase::Start)?;
        let mut started = Vec::new();
        for operation in plan.bootstrap_operations() {
            if self.apply(&operation, options.dry_run, report) {
                if let Some(service) = operation.service() {
                    started.push(service.clone());
                }
            }
        }
        // A failed start is already counted; waiting on it could only time out
        if !options.dry_run {
            for service in &started {
                self.confirm(Phase::Start, service, LoadState::Loaded, options, report);
            }
        }

        Ok(())
    }

    fn checkpoint(&self, next: Phase) -> Result<(), Phase> {
        match self.interrupt {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(next),
            _ => Ok(()),
        }
    }

    /// Run (or report) one operation. Returns whether it succeeded.
    fn apply(&self, operation: &Operation, dry_run: bool, report: &mut ActivateReport) -> bool {
        if dry_run {
            self.events.on_event(ActivateEvent::DryRun {
                operation: operation.clone(),
            });
            report.add_success();
            return true;
        }

        let outcome = match operation {
            Operation::Remove { destination } if !self.fs.exists(destination.path()) => {
                log::debug!("{} already gone", destination);
                return true;
            }
            Operation::Install { .. } | Operation::Remove { .. } => self
                .apply_file(operation)
                .map_err(ActivateError::from),
            Operation::Bootout { service } => {
                self.manager.bootout(service).map_err(ActivateError::from)
            }
            Operation::Bootstrap { service, path } => self
                .manager
                .bootstrap(service.domain(), path)
                .map_err(ActivateError::from),
        };

        match outcome {
            Ok(()) => {
                report.add_success();
                self.events.on_event(ActivateEvent::OperationSucceeded {
                    operation: operation.clone(),
                });
                true
            }
            Err(e) => {
                log::error!("{}: {}", operation, e);
                report.add_failure(operation.phase(), operation.to_string(), &e);
                self.events.on_event(ActivateEvent::OperationFailed {
                    operation: operation.clone(),
                    error: e.to_string(),
                });
                false
            }
        }
    }

    fn apply_file(&self, operation: &Operation) -> FsResult<()> {
        let privileged = operation.needs_privilege();
        match operation {
            Operation::Install {
                source,
                destination,
                method,
            } => match method {
                InstallMethod::Symlink => {
                    self.fs
                        .symlink(source.path(), destination.path(), privileged)
                }
                InstallMethod::Copy => self.fs.copy(source.path(), destination.path(), privileged),
            },
            Operation::Remove { destination } => self.fs.remove(destination.path(), privileged),
            Operation::Bootout { .. } | Operation::Bootstrap { .. } => Ok(()),
        }
    }

    fn confirm(
        &self,
        phase: Phase,
        service: &ServiceTarget,
        state: LoadState,
        options: &ActivateOptions,
        report: &mut ActivateReport,
    ) {
        let timeout = match state {
            LoadState::Unloaded => options.bootout_timeout,
            LoadState::Loaded => options.bootstrap_timeout,
        };

        match self.wait_for(service, state, timeout, options.poll_interval) {
            Ok(()) => {
                self.events.on_event(ActivateEvent::Confirmed {
                    service: service.clone(),
                    state,
                });
            }
            Err(e) => {
                log::error!("{}", e);
                report.add_failure(phase, service.to_string(), &e);
                self.events.on_event(ActivateEvent::ConfirmTimedOut {
                    service: service.clone(),
                    state,
                    timeout_secs: timeout.as_secs(),
                });
            }
        }
    }

    /// Poll until `service` is in `state` or `timeout` has elapsed
    pub fn wait_for(
        &self,
        service: &ServiceTarget,
        state: LoadState,
        timeout: Duration,
        poll_interval: Duration,
    ) -> ActivateResult<()> {
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        let start = self.clock.now();
        loop {
            if LoadState::from_loaded(self.manager.is_loaded(service)) == state {
                return Ok(());
            }
            if self.clock.now().duration_since(start) > timeout {
                return Err(ActivateError::Timeout {
                    service: service.clone(),
                    state,
                    timeout,
                });
            }
            log::trace!("waiting for {} to {}", service, state.verb());
            self.clock.sleep(poll_interval);
        }
    }
}
