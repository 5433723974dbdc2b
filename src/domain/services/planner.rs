//! Reconciliation planning service
//!
//! Turns two snapshots of declared service definitions (previous and new)
//! plus the observed installed state into a [`Plan`].
//!
//! Decision per service name:
//! - Added (new only) → install, bootout if already loaded, bootstrap
//! - Removed (old only) → remove if installed, bootout if loaded
//! - Changed (both) → nothing if installed unchanged and loaded; otherwise
//!   install when the installed copy differs, bootout when loaded and
//!   bootstrap
//!
//! Planning only reads: directory listings, links, contents and load
//! states. Every mutation is left to the executor, so planning can run any
//! number of times (dry-run) without observable effect.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::entities::Plan;
use crate::domain::ports::{
    ActivateEvent, ActivateEventSink, FileSystem, FsResult, ServiceManager,
};
use crate::domain::value_objects::{
    DomainTarget, InstallMethod, ServiceDirectory, ServicePath, DEFINITION_EXTENSION,
};
use crate::error::{ActivateError, ActivateResult};

/// Definition files of one directory, keyed by service name
pub type Snapshot = BTreeMap<String, ServicePath>;

/// Three-way split of service names between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDiff {
    /// In new only
    pub added: Snapshot,
    /// In old only
    pub removed: Snapshot,
    /// In both; paths are the new sources
    pub changed: Snapshot,
}

impl ServiceDiff {
    /// Split `new` and `old` by service name
    pub fn between(new: &Snapshot, old: &Snapshot) -> Self {
        let mut diff = ServiceDiff::default();
        for (name, path) in new {
            if old.contains_key(name) {
                diff.changed.insert(name.clone(), path.clone());
            } else {
                diff.added.insert(name.clone(), path.clone());
            }
        }
        for (name, path) in old {
            if !new.contains_key(name) {
                diff.removed.insert(name.clone(), path.clone());
            }
        }
        diff
    }
}

/// Inputs of one planning run
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub domain: DomainTarget,
    pub directory: &'a ServiceDirectory,
    pub new_source: &'a Path,
    pub old_source: Option<&'a Path>,
    pub install_method: InstallMethod,
}

/// Planning service
///
/// Reads state through the [`FileSystem`] and [`ServiceManager`] ports and
/// reports planning-soft conditions as [`ActivateEvent::Warning`].
pub struct Planner<'a, FS: ?Sized, SM: ?Sized> {
    fs: &'a FS,
    manager: &'a SM,
    events: &'a dyn ActivateEventSink,
}

impl<'a, FS, SM> Planner<'a, FS, SM>
where
    FS: FileSystem + ?Sized,
    SM: ServiceManager + ?Sized,
{
    pub fn new(fs: &'a FS, manager: &'a SM, events: &'a dyn ActivateEventSink) -> Self {
        Self {
            fs,
            manager,
            events,
        }
    }

    /// Compute the plan for `request`.
    ///
    /// Fails only when the new source directory cannot be listed; without
    /// it the desired state is unknown. An unreadable old directory is
    /// reported and treated as empty.
    pub fn prepare(&self, request: &PlanRequest<'_>) -> ActivateResult<Plan> {
        let new = self
            .scan(request.new_source)
            .map_err(|e| ActivateError::SourceUnreadable {
                path: request.new_source.to_path_buf(),
                message: e.to_string(),
            })?;

        let old = match request.old_source {
            Some(dir) => self.scan(dir).unwrap_or_else(|e| {
                self.warn(format!("reading {}: {}", dir.display(), e));
                Snapshot::new()
            }),
            None => Snapshot::new(),
        };

        let diff = ServiceDiff::between(&new, &old);
        log::debug!(
            "diff: {} added, {} removed, {} changed",
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len()
        );

        let mut plan = Plan::new();
        for (name, source) in &diff.added {
            self.plan_added(&mut plan, request, name, source);
        }
        for name in diff.removed.keys() {
            self.plan_removed(&mut plan, request, name);
        }
        for (name, source) in &diff.changed {
            self.plan_changed(&mut plan, request, name, source);
        }

        self.events.on_event(ActivateEvent::Planned {
            installs: plan.enable.len(),
            removals: plan.disable.len(),
            bootouts: plan.bootout.len(),
            bootstraps: plan.bootstrap.len(),
        });

        Ok(plan)
    }

    /// Definition files in `dir`, keyed by service name.
    ///
    /// Files without the definition extension are ignored; definition
    /// files whose stem is not a valid service name are skipped with a
    /// warning.
    pub fn scan(&self, dir: &Path) -> FsResult<Snapshot> {
        let mut snapshot = Snapshot::new();
        for entry in self.fs.list_dir(dir)? {
            match ServicePath::from_path(entry.clone()) {
                Some(path) => {
                    snapshot.insert(path.name().to_string(), path);
                }
                None if has_definition_extension(&entry) => {
                    self.warn(format!(
                        "skipping {}: not a valid service name",
                        entry.display()
                    ));
                }
                None => {}
            }
        }
        log::debug!("{}: {} definitions", dir.display(), snapshot.len());
        Ok(snapshot)
    }

    fn plan_added(
        &self,
        plan: &mut Plan,
        request: &PlanRequest<'_>,
        name: &str,
        source: &ServicePath,
    ) {
        let service = source.service_target(request.domain);
        let destination = request.directory.service_path(name);

        if self.fs.exists(destination.path()) {
            self.warn(format!("{} already exists", destination));
        }
        plan.enable.insert(destination.clone(), source.clone());

        // Leftover from an interrupted run: restart from a clean state
        if self.manager.is_loaded(&service) {
            self.warn(format!("{} already loaded", service));
            plan.bootout.insert(service.clone());
        }
        plan.bootstrap.insert(service, destination);
    }

    fn plan_removed(&self, plan: &mut Plan, request: &PlanRequest<'_>, name: &str) {
        let service = request.domain.service(name);
        let destination = request.directory.service_path(name);

        if self.fs.exists(destination.path()) {
            plan.disable.insert(destination);
        } else {
            self.warn(format!("{} does not exist", destination));
        }

        if self.manager.is_loaded(&service) {
            plan.bootout.insert(service);
        } else {
            self.warn(format!("{} already unloaded", service));
        }
    }

    fn plan_changed(
        &self,
        plan: &mut Plan,
        request: &PlanRequest<'_>,
        name: &str,
        source: &ServicePath,
    ) {
        let service = source.service_target(request.domain);
        let destination = request.directory.service_path(name);

        let unchanged = if self.fs.exists(destination.path()) {
            self.destination_matches(source, &destination, request.install_method)
        } else {
            self.warn(format!("{} does not exist", destination));
            false
        };
        let loaded = self.manager.is_loaded(&service);

        if unchanged && loaded {
            log::debug!("{} is up to date", service);
            return;
        }

        if !unchanged {
            plan.enable.insert(destination.clone(), source.clone());
        }

        if loaded {
            plan.bootout.insert(service.clone());
        } else {
            self.warn(format!("{} not loaded", service));
        }
        plan.bootstrap.insert(service, destination);
    }

    /// Whether the installed definition already is `source`.
    ///
    /// Symlink installs compare the link target, copy installs compare
    /// bytes. Anything unreadable counts as different.
    fn destination_matches(
        &self,
        source: &ServicePath,
        destination: &ServicePath,
        method: InstallMethod,
    ) -> bool {
        match method {
            InstallMethod::Symlink => self
                .fs
                .read_link(destination.path())
                .map(|target| target == source.path())
                .unwrap_or(false),
            InstallMethod::Copy => {
                match (self.fs.read(source.path()), self.fs.read(destination.path())) {
                    (Ok(expected), Ok(actual)) => expected == actual,
                    _ => false,
                }
            }
        }
    }

    fn warn(&self, message: String) {
        log::warn!("{}", message);
        self.events.on_event(ActivateEvent::Warning { message });
    }
}

fn has_definition_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == DEFINITION_EXTENSION)
}
