//! In-memory port implementations
//!
//! Drive the planner and executor without a real launchd, real files or
//! real sleeps. Shared by unit tests and the integration tests in `tests/`.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::entities::Operation;
use crate::domain::ports::{
    ActivateEvent, ActivateEventSink, Clock, FileSystem, FsError, FsResult, ServiceManager,
    ServiceManagerError, ServiceManagerResult,
};
use crate::domain::value_objects::{CommandLine, DomainTarget, ServicePath, ServiceTarget};
use crate::infrastructure::shell::{CommandOutput, CommandRunner};

const MAX_SYMLINK_HOPS: usize = 8;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Node of a [`MemoryFs`] tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNode {
    Dir,
    File(Vec<u8>),
    Symlink(PathBuf),
}

/// In-memory file system
///
/// `add_*` helpers set up state and are not counted as mutations; only
/// calls through the [`FileSystem`] port are.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<PathBuf, MemoryNode>>,
    mutations: Mutex<usize>,
    read_only: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = lock(&self.nodes);
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryNode::Dir);
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        self.add_parent(path);
        lock(&self.nodes).insert(
            path.to_path_buf(),
            MemoryNode::File(contents.as_ref().to_vec()),
        );
    }

    pub fn add_symlink(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        let link = link.as_ref();
        self.add_parent(link);
        lock(&self.nodes).insert(
            link.to_path_buf(),
            MemoryNode::Symlink(target.as_ref().to_path_buf()),
        );
    }

    /// Make every mutation of `path` fail with permission denied
    pub fn deny_writes(&self, path: impl AsRef<Path>) {
        lock(&self.read_only).insert(path.as_ref().to_path_buf());
    }

    /// Copy of the whole tree
    pub fn snapshot(&self) -> BTreeMap<PathBuf, MemoryNode> {
        lock(&self.nodes).clone()
    }

    /// Number of mutations made through the port
    pub fn mutation_count(&self) -> usize {
        *lock(&self.mutations)
    }

    fn add_parent(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
    }

    fn begin_mutation(&self, path: &Path) -> FsResult<()> {
        if lock(&self.read_only).contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        *lock(&self.mutations) += 1;
        Ok(())
    }

    fn not_a(kind: &str, path: &Path) -> FsError {
        FsError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, format!("not a {}", kind)),
        }
    }
}

impl FileSystem for MemoryFs {
    fn list_dir(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let nodes = lock(&self.nodes);
        match nodes.get(dir) {
            Some(MemoryNode::Dir) => Ok(nodes
                .keys()
                .filter(|path| path.parent() == Some(dir))
                .cloned()
                .collect()),
            Some(_) => Err(Self::not_a("directory", dir)),
            None => Err(FsError::NotFound(dir.to_path_buf())),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        lock(&self.nodes).contains_key(path)
    }

    fn read_link(&self, path: &Path) -> FsResult<PathBuf> {
        match lock(&self.nodes).get(path) {
            Some(MemoryNode::Symlink(target)) => Ok(target.clone()),
            Some(_) => Err(Self::not_a("symlink", path)),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }

    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        let nodes = lock(&self.nodes);
        let mut current = path.to_path_buf();
        for _ in 0..MAX_SYMLINK_HOPS {
            match nodes.get(&current) {
                Some(MemoryNode::File(contents)) => return Ok(contents.clone()),
                Some(MemoryNode::Symlink(target)) => current = target.clone(),
                Some(MemoryNode::Dir) => return Err(Self::not_a("file", &current)),
                None => return Err(FsError::NotFound(current)),
            }
        }
        Err(Self::not_a("resolvable link", path))
    }

    fn symlink(&self, source: &Path, destination: &Path, _privileged: bool) -> FsResult<()> {
        self.begin_mutation(destination)?;
        self.add_symlink(destination, source);
        Ok(())
    }

    fn copy(&self, source: &Path, destination: &Path, _privileged: bool) -> FsResult<()> {
        let contents = self.read(source)?;
        self.begin_mutation(destination)?;
        self.add_file(destination, contents);
        Ok(())
    }

    fn remove(&self, path: &Path, _privileged: bool) -> FsResult<()> {
        if !self.exists(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        self.begin_mutation(path)?;
        lock(&self.nodes).remove(path);
        Ok(())
    }
}

/// Mutating call received by a [`FakeServiceManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerCall {
    Bootstrap(ServiceTarget),
    Bootout(ServiceTarget),
}

#[derive(Debug, Default)]
struct ManagerState {
    loaded: BTreeSet<ServiceTarget>,
    calls: Vec<ManagerCall>,
    failing_bootouts: BTreeSet<ServiceTarget>,
    failing_bootstraps: BTreeSet<ServiceTarget>,
    stuck_loaded: BTreeSet<ServiceTarget>,
    stuck_unloaded: BTreeSet<ServiceTarget>,
}

/// In-memory service manager
///
/// Successful bootstraps load a service and bootouts unload it, unless the
/// service was told to get stuck. Load-state queries are not recorded.
#[derive(Debug, Default)]
pub struct FakeServiceManager {
    state: Mutex<ManagerState>,
}

impl FakeServiceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loaded(&self, service: &ServiceTarget) {
        lock(&self.state).loaded.insert(service.clone());
    }

    pub fn fail_bootout(&self, service: &ServiceTarget) {
        lock(&self.state).failing_bootouts.insert(service.clone());
    }

    pub fn fail_bootstrap(&self, service: &ServiceTarget) {
        lock(&self.state).failing_bootstraps.insert(service.clone());
    }

    /// Accept bootouts of `service` but keep it loaded
    pub fn never_unload(&self, service: &ServiceTarget) {
        lock(&self.state).stuck_loaded.insert(service.clone());
    }

    /// Accept bootstraps of `service` but never report it loaded
    pub fn never_load(&self, service: &ServiceTarget) {
        lock(&self.state).stuck_unloaded.insert(service.clone());
    }

    pub fn calls(&self) -> Vec<ManagerCall> {
        lock(&self.state).calls.clone()
    }

    pub fn loaded(&self) -> BTreeSet<ServiceTarget> {
        lock(&self.state).loaded.clone()
    }

    fn rejected(operation: Operation) -> ServiceManagerError {
        ServiceManagerError::Rejected {
            command: operation.to_string(),
            code: 5,
            detail: "Input/output error".to_string(),
        }
    }
}

impl ServiceManager for FakeServiceManager {
    fn is_loaded(&self, service: &ServiceTarget) -> bool {
        lock(&self.state).loaded.contains(service)
    }

    fn bootstrap(&self, domain: DomainTarget, path: &ServicePath) -> ServiceManagerResult<()> {
        let service = path.service_target(domain);
        let mut state = lock(&self.state);
        state.calls.push(ManagerCall::Bootstrap(service.clone()));

        if state.failing_bootstraps.contains(&service) {
            return Err(Self::rejected(Operation::Bootstrap {
                service,
                path: path.clone(),
            }));
        }
        if !state.stuck_unloaded.contains(&service) {
            state.loaded.insert(service);
        }
        Ok(())
    }

    fn bootout(&self, service: &ServiceTarget) -> ServiceManagerResult<()> {
        let mut state = lock(&self.state);
        state.calls.push(ManagerCall::Bootout(service.clone()));

        if state.failing_bootouts.contains(service) {
            return Err(Self::rejected(Operation::Bootout {
                service: service.clone(),
            }));
        }
        if !state.stuck_loaded.contains(service) {
            state.loaded.remove(service);
        }
        Ok(())
    }
}

/// Clock that only moves when slept on or advanced
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<usize>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(0),
        }
    }

    pub fn advance(&self, duration: Duration) {
        *lock(&self.elapsed) += duration;
    }

    pub fn elapsed(&self) -> Duration {
        *lock(&self.elapsed)
    }

    /// Number of `sleep` calls so far
    pub fn sleeps(&self) -> usize {
        *lock(&self.sleeps)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        *lock(&self.sleeps) += 1;
        self.advance(duration);
    }
}

/// Event sink that keeps every event
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<ActivateEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ActivateEvent> {
        lock(&self.events).clone()
    }

    /// Messages of all `Warning` events
    pub fn warnings(&self) -> Vec<String> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                ActivateEvent::Warning { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ActivateEventSink for RecordingEventSink {
    fn on_event(&self, event: ActivateEvent) {
        lock(&self.events).push(event);
    }
}

#[derive(Debug, Clone)]
enum Response {
    Output(CommandOutput),
    LaunchFailure,
}

/// Command runner that records commands instead of spawning them
///
/// Commands succeed with empty output unless a response was registered.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<CommandLine>>,
    responses: Mutex<Vec<(CommandLine, Response)>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, command: &CommandLine, output: CommandOutput) {
        lock(&self.responses).push((command.clone(), Response::Output(output)));
    }

    pub fn fail_to_launch(&self, command: &CommandLine) {
        lock(&self.responses).push((command.clone(), Response::LaunchFailure));
    }

    pub fn commands(&self) -> Vec<CommandLine> {
        lock(&self.commands).clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn output(&self, command: &CommandLine) -> io::Result<CommandOutput> {
        lock(&self.commands).push(command.clone());
        let response = lock(&self.responses)
            .iter()
            .rev()
            .find(|(expected, _)| expected == command)
            .map(|(_, response)| response.clone());

        match response {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::LaunchFailure) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
            None => Ok(CommandOutput::success()),
        }
    }
}
