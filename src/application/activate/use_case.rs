//! Activate Use Case
//!
//! Plans against the live state, then hands the plan to the executor.
//! The two halves are exposed separately so the caller can show the plan
//! before anything is applied.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::domain::entities::Plan;
use crate::domain::ports::{ActivateEventSink, Clock, FileSystem, NoopEventSink, ServiceManager};
use crate::domain::services::Planner;
use crate::error::ActivateResult;

use super::executor::PlanExecutor;
use super::options::ActivateOptions;
use super::report::ActivateReport;

/// Activate use case - reconciles installed services with a declared directory
pub struct ActivateUseCase<FS, SM, C>
where
    FS: FileSystem,
    SM: ServiceManager,
    C: Clock,
{
    fs: FS,
    manager: SM,
    clock: C,
    events: Arc<dyn ActivateEventSink>,
}

impl<FS, SM, C> ActivateUseCase<FS, SM, C>
where
    FS: FileSystem,
    SM: ServiceManager,
    C: Clock,
{
    pub fn new(fs: FS, manager: SM, clock: C) -> Self {
        Self {
            fs,
            manager,
            clock,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn ActivateEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Compute the plan without changing anything
    pub fn plan(&self, options: &ActivateOptions) -> ActivateResult<Plan> {
        Planner::new(&self.fs, &self.manager, self.events.as_ref())
            .prepare(&options.plan_request())
    }

    /// Apply a previously computed plan
    pub fn apply(
        &self,
        plan: &Plan,
        options: &ActivateOptions,
        interrupt: Option<&AtomicBool>,
    ) -> ActivateReport {
        let executor =
            PlanExecutor::new(&self.fs, &self.manager, &self.clock, self.events.as_ref());
        match interrupt {
            Some(flag) => executor.with_interrupt(flag).execute(plan, options),
            None => executor.execute(plan, options),
        }
    }

    /// Plan and apply in one step
    pub fn execute(&self, options: &ActivateOptions) -> ActivateResult<ActivateReport> {
        let plan = self.plan(options)?;
        Ok(self.apply(&plan, options, None))
    }

    pub fn file_system(&self) -> &FS {
        &self.fs
    }

    pub fn service_manager(&self) -> &SM {
        &self.manager
    }
}
