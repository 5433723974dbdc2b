//! Activate options

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::services::PlanRequest;
use crate::domain::value_objects::{DomainTarget, InstallMethod, ServiceDirectory};

/// Default deadline for a service to reach its expected load state
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between load-state queries while confirming
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest delay between load-state queries; shorter intervals are raised to it
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Options for one activation run
#[derive(Debug, Clone)]
pub struct ActivateOptions {
    /// Domain services are loaded into
    pub domain: DomainTarget,
    /// Directory definitions are installed into
    pub directory: ServiceDirectory,
    /// Declared definitions to activate
    pub new_source: PathBuf,
    /// Previously activated definitions, if any
    pub old_source: Option<PathBuf>,
    pub install_method: InstallMethod,
    /// Report operations instead of running them
    pub dry_run: bool,
    /// Deadline for stopped services to unload
    pub bootout_timeout: Duration,
    /// Deadline for started services to load
    pub bootstrap_timeout: Duration,
    pub poll_interval: Duration,
}

impl ActivateOptions {
    /// Options with the directory's default install method and default timings
    pub fn new(
        domain: DomainTarget,
        directory: ServiceDirectory,
        new_source: impl Into<PathBuf>,
    ) -> Self {
        let install_method = directory.default_install_method();
        Self {
            domain,
            directory,
            new_source: new_source.into(),
            old_source: None,
            install_method,
            dry_run: false,
            bootout_timeout: DEFAULT_TIMEOUT,
            bootstrap_timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_old_source(mut self, old_source: Option<PathBuf>) -> Self {
        self.old_source = old_source;
        self
    }

    pub fn with_install_method(mut self, install_method: InstallMethod) -> Self {
        self.install_method = install_method;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set both confirmation deadlines
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.bootout_timeout = timeout;
        self.bootstrap_timeout = timeout;
        self
    }

    pub fn with_bootstrap_timeout(mut self, timeout: Duration) -> Self {
        self.bootstrap_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub(super) fn plan_request(&self) -> PlanRequest<'_> {
        PlanRequest {
            domain: self.domain,
            directory: &self.directory,
            new_source: &self.new_source,
            old_source: self.old_source.as_deref(),
            install_method: self.install_method,
        }
    }
}
