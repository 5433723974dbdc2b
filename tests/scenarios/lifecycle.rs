//! Scenario: a service set evolving over several generations.

use std::path::PathBuf;

use launchd_activate::domain::ports::{FileSystem, ServiceManager};
use launchd_activate::testing::ManagerCall;
use launchd_activate::InstallMethod;

use crate::support::*;

/// SCENARIO: first activation, then an identical re-activation
#[test]
fn scenario_first_activation_then_no_op() {
    let uc = machine();
    let gen1 = generation(&uc, 1, &[("org.example.a", "a1"), ("org.example.b", "b1")]);

    let report = uc.execute(&options(&gen1, None)).unwrap();

    assert!(report.is_success(), "failures: {:?}", report.failures);
    for name in ["org.example.a", "org.example.b"] {
        assert_eq!(
            uc.file_system().read_link(&installed(name)).unwrap(),
            gen1.join(format!("{}.plist", name))
        );
        assert!(uc.service_manager().is_loaded(&service(name)));
    }

    // Same generation again, now also as the old one
    let plan = uc.plan(&options(&gen1, Some(&gen1))).unwrap();
    assert!(plan.is_empty(), "expected empty plan, got:\n{}", plan);
}

/// SCENARIO: a new generation changes one copied service and keeps another
#[test]
fn scenario_upgrade_restarts_only_changed_service() {
    let uc = machine();
    let copy = |new: &PathBuf, old: Option<&PathBuf>| options(new, old).with_install_method(InstallMethod::Copy);
    let gen1 = generation(&uc, 1, &[("org.example.a", "a1"), ("org.example.b", "b1")]);
    uc.execute(&copy(&gen1, None)).unwrap();
    let gen2 = generation(&uc, 2, &[("org.example.a", "a2"), ("org.example.b", "b1")]);
    let calls_before = uc.service_manager().calls().len();

    let report = uc.execute(&copy(&gen2, Some(&gen1))).unwrap();

    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert_eq!(uc.file_system().read(&installed("org.example.a")).unwrap(), b"a2");
    assert_eq!(
        uc.service_manager().calls()[calls_before..].to_vec(),
        vec![
            ManagerCall::Bootout(service("org.example.a")),
            ManagerCall::Bootstrap(service("org.example.a")),
        ]
    );
}

/// SCENARIO: symlinked service repointed at a new generation
#[test]
fn scenario_symlink_upgrade_repoints_link() {
    let uc = machine();
    let gen1 = generation(&uc, 1, &[("org.example.a", "a")]);
    uc.execute(&options(&gen1, None)).unwrap();
    let gen2 = generation(&uc, 2, &[("org.example.a", "a")]);

    let report = uc.execute(&options(&gen2, Some(&gen1))).unwrap();

    assert!(report.is_success());
    assert_eq!(
        uc.file_system().read_link(&installed("org.example.a")).unwrap(),
        gen2.join("org.example.a.plist")
    );
    assert!(uc.service_manager().is_loaded(&service("org.example.a")));
}

/// SCENARIO: a service dropped from the configuration
#[test]
fn scenario_removed_service_is_stopped_and_deleted() {
    let uc = machine();
    let gen1 = generation(&uc, 1, &[("org.example.a", "a"), ("org.example.b", "b")]);
    uc.execute(&options(&gen1, None)).unwrap();
    let gen2 = generation(&uc, 2, &[("org.example.a", "a")]);

    let report = uc.execute(&options(&gen2, Some(&gen1))).unwrap();

    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert!(!uc.file_system().exists(&installed("org.example.b")));
    assert!(!uc.service_manager().is_loaded(&service("org.example.b")));
    assert!(uc.service_manager().is_loaded(&service("org.example.a")));
}

/// SCENARIO: previewing an upgrade leaves everything in place
#[test]
fn scenario_dry_run_upgrade_changes_nothing() {
    let uc = machine();
    let gen1 = generation(&uc, 1, &[("org.example.a", "a"), ("org.example.b", "b")]);
    uc.execute(&options(&gen1, None)).unwrap();
    let gen2 = generation(&uc, 2, &[("org.example.a", "a"), ("org.example.c", "c")]);
    let files_before = uc.file_system().snapshot();
    let mutations_before = uc.file_system().mutation_count();
    let calls_before = uc.service_manager().calls().len();

    let report = uc
        .execute(&options(&gen2, Some(&gen1)).with_dry_run(true))
        .unwrap();

    assert!(report.is_success());
    assert!(!report.plan.is_empty());
    assert_eq!(uc.file_system().snapshot(), files_before);
    assert_eq!(uc.file_system().mutation_count(), mutations_before);
    assert_eq!(uc.service_manager().calls().len(), calls_before);
}
