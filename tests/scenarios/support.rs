//! Shared setup for scenarios: a fake machine with one user.

use std::path::PathBuf;
use std::time::Duration;

use launchd_activate::testing::{FakeServiceManager, ManualClock, MemoryFs};
use launchd_activate::{
    ActivateOptions, ActivateUseCase, DomainTarget, ServiceDirectory, ServiceTarget,
};

pub type FakeUseCase = ActivateUseCase<MemoryFs, FakeServiceManager, ManualClock>;

pub const DOMAIN: DomainTarget = DomainTarget::Gui(501);
pub const AGENTS: &str = "/Users/me/Library/LaunchAgents";

pub fn machine() -> FakeUseCase {
    let fs = MemoryFs::new();
    fs.add_dir(AGENTS);
    ActivateUseCase::new(fs, FakeServiceManager::new(), ManualClock::new())
}

/// Write generation `generation` containing `services` as (name, contents)
pub fn generation(uc: &FakeUseCase, generation: u32, services: &[(&str, &str)]) -> PathBuf {
    let dir = PathBuf::from(format!("/generations/{}/agents", generation));
    uc.file_system().add_dir(&dir);
    for (name, contents) in services {
        uc.file_system()
            .add_file(dir.join(format!("{}.plist", name)), contents);
    }
    dir
}

pub fn options(new: &PathBuf, old: Option<&PathBuf>) -> ActivateOptions {
    ActivateOptions::new(
        DOMAIN,
        ServiceDirectory::User(PathBuf::from("/Users/me")),
        new.clone(),
    )
    .with_old_source(old.cloned())
    .with_timeout(Duration::from_secs(3))
}

pub fn service(name: &str) -> ServiceTarget {
    DOMAIN.service(name)
}

pub fn installed(name: &str) -> PathBuf {
    PathBuf::from(AGENTS).join(format!("{}.plist", name))
}
