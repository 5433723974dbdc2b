//! Property tests for reconciliation against in-memory ports.

use std::collections::BTreeSet;
use std::path::PathBuf;

use proptest::prelude::*;

use launchd_activate::domain::ports::{FileSystem, ServiceManager};
use launchd_activate::testing::{FakeServiceManager, ManualClock, MemoryFs};
use launchd_activate::{ActivateOptions, ActivateUseCase, DomainTarget, ServiceDirectory};

const NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const DOMAIN: DomainTarget = DomainTarget::Gui(501);

fn subset() -> impl Strategy<Value = BTreeSet<&'static str>> {
    proptest::sample::subsequence(NAMES, 0..=NAMES.len())
        .prop_map(|names| names.into_iter().collect())
}

/// Starting state: which services are declared now, were declared last
/// time, are currently loaded and have a definition installed.
#[derive(Debug, Clone)]
struct World {
    new: BTreeSet<&'static str>,
    old: BTreeSet<&'static str>,
    loaded: BTreeSet<&'static str>,
    installed: BTreeSet<&'static str>,
}

fn world() -> impl Strategy<Value = World> {
    (subset(), subset(), subset(), subset()).prop_map(|(new, old, loaded, installed)| World {
        new,
        old,
        loaded,
        installed,
    })
}

fn build(world: &World) -> ActivateUseCase<MemoryFs, FakeServiceManager, ManualClock> {
    let fs = MemoryFs::new();
    fs.add_dir("/new");
    fs.add_dir("/old");
    fs.add_dir("/Users/me/Library/LaunchAgents");
    for name in &world.new {
        fs.add_file(format!("/new/{}.plist", name), format!("new {}", name));
    }
    for name in &world.old {
        fs.add_file(format!("/old/{}.plist", name), format!("old {}", name));
    }
    for name in &world.installed {
        fs.add_symlink(
            format!("/Users/me/Library/LaunchAgents/{}.plist", name),
            format!("/old/{}.plist", name),
        );
    }

    let manager = FakeServiceManager::new();
    for name in &world.loaded {
        manager.set_loaded(&DOMAIN.service(*name));
    }
    ActivateUseCase::new(fs, manager, ManualClock::new())
}

fn options(new: &str, old: &str) -> ActivateOptions {
    ActivateOptions::new(
        DOMAIN,
        ServiceDirectory::User(PathBuf::from("/Users/me")),
        new,
    )
    .with_old_source(Some(PathBuf::from(old)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After a successful activation, activating the same
    /// directory again plans nothing.
    #[test]
    fn property_second_activation_is_a_no_op(world in world()) {
        let uc = build(&world);

        let report = uc.execute(&options("/new", "/old")).unwrap();
        prop_assert!(report.is_success(), "failures: {:?}", report.failures);

        let plan = uc.plan(&options("/new", "/new")).unwrap();
        prop_assert!(plan.is_empty(), "second plan:\n{}", plan);
    }

    /// PROPERTY: Every declared service ends up installed and loaded; every
    /// service dropped since last time ends up gone.
    #[test]
    fn property_activation_converges(world in world()) {
        let uc = build(&world);

        uc.execute(&options("/new", "/old")).unwrap();

        for name in NAMES {
            let installed = PathBuf::from(format!("/Users/me/Library/LaunchAgents/{}.plist", name));
            let loaded = uc.service_manager().is_loaded(&DOMAIN.service(*name));
            if world.new.contains(name) {
                prop_assert_eq!(
                    uc.file_system().read_link(&installed).unwrap(),
                    PathBuf::from(format!("/new/{}.plist", name))
                );
                prop_assert!(loaded, "{} should be loaded", name);
            } else if world.old.contains(name) {
                prop_assert!(!uc.file_system().exists(&installed));
                prop_assert!(!loaded, "{} should be unloaded", name);
            } else {
                prop_assert_eq!(uc.file_system().exists(&installed), world.installed.contains(name));
                prop_assert_eq!(loaded, world.loaded.contains(name));
            }
        }
    }

    /// PROPERTY: A dry run never changes files or service state.
    #[test]
    fn property_dry_run_changes_nothing(world in world()) {
        let uc = build(&world);
        let files = uc.file_system().snapshot();
        let loaded = uc.service_manager().loaded();

        let report = uc
            .execute(&options("/new", "/old").with_dry_run(true))
            .unwrap();

        prop_assert!(report.is_success());
        prop_assert_eq!(uc.file_system().snapshot(), files);
        prop_assert_eq!(uc.service_manager().loaded(), loaded);
        prop_assert!(uc.service_manager().calls().is_empty());
    }
}
