//! Scenario: activations where parts of the system misbehave.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use launchd_activate::domain::ports::{ActivateEvent, ActivateEventSink, FileSystem, ServiceManager};
use launchd_activate::testing::ManagerCall;
use launchd_activate::Phase;

use crate::support::*;

/// SCENARIO: one service refuses to start, the others still come up
#[test]
fn scenario_failed_start_does_not_block_others() {
    let uc = machine();
    let gen1 = generation(
        &uc,
        1,
        &[("org.example.a", "a"), ("org.example.b", "b"), ("org.example.c", "c")],
    );
    uc.service_manager().fail_bootstrap(&service("org.example.b"));

    let report = uc.execute(&options(&gen1, None)).unwrap();

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.failures[0].phase, Phase::Start);
    assert!(uc.service_manager().is_loaded(&service("org.example.a")));
    assert!(uc.service_manager().is_loaded(&service("org.example.c")));
    // Installed anyway: the file phase does not depend on launchd
    assert!(uc.file_system().exists(&installed("org.example.b")));
}

/// SCENARIO: a service ignores bootout and never unloads
#[test]
fn scenario_stuck_service_times_out_without_blocking_start() {
    let uc = machine();
    let gen1 = generation(&uc, 1, &[("org.example.a", "a"), ("org.example.b", "b")]);
    uc.execute(&options(&gen1, None)).unwrap();
    let gen2 = generation(&uc, 2, &[("org.example.a", "a"), ("org.example.b", "b")]);
    uc.service_manager().never_unload(&service("org.example.a"));

    let report = uc.execute(&options(&gen2, Some(&gen1))).unwrap();

    assert_eq!(report.error_count(), 1, "failures: {:?}", report.failures);
    assert_eq!(report.failures[0].phase, Phase::ConfirmStop);
    assert!(report.failures[0].error.contains("timed out"));
    let calls = uc.service_manager().calls();
    assert!(calls.contains(&ManagerCall::Bootstrap(service("org.example.a"))));
    assert!(calls.contains(&ManagerCall::Bootstrap(service("org.example.b"))));
}

/// SCENARIO: an install fails for lack of permission
#[test]
fn scenario_unwritable_destination_is_counted() {
    let uc = machine();
    let gen1 = generation(&uc, 1, &[("org.example.a", "a"), ("org.example.b", "b")]);
    uc.file_system().deny_writes(installed("org.example.a"));

    let report = uc.execute(&options(&gen1, None)).unwrap();

    assert!(report.failures.iter().any(|f| f.phase == Phase::Files));
    assert!(uc.file_system().exists(&installed("org.example.b")));
    assert!(uc.service_manager().is_loaded(&service("org.example.b")));
}

/// Raises the interrupt flag once the first file is installed
struct InterruptAfterFirstOperation {
    flag: Arc<AtomicBool>,
}

impl ActivateEventSink for InterruptAfterFirstOperation {
    fn on_event(&self, event: ActivateEvent) {
        if let ActivateEvent::OperationSucceeded { .. } = event {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

/// SCENARIO: Ctrl-C while files are being installed
#[test]
fn scenario_interrupt_stops_before_next_phase() {
    let flag = Arc::new(AtomicBool::new(false));
    let uc = machine().with_events(Arc::new(InterruptAfterFirstOperation {
        flag: flag.clone(),
    }));
    let gen1 = generation(&uc, 1, &[("org.example.a", "a"), ("org.example.b", "b")]);
    let options = options(&gen1, None);

    let plan = uc.plan(&options).unwrap();
    let report = uc.apply(&plan, &options, Some(&*flag));

    // The running phase finishes, the next one never starts
    assert_eq!(report.interrupted, Some(Phase::Stop));
    assert!(!report.is_success());
    assert_eq!(report.exit_code(), 0);
    assert!(uc.file_system().exists(&installed("org.example.a")));
    assert!(uc.file_system().exists(&installed("org.example.b")));
    assert!(uc.service_manager().calls().is_empty());
}

/// SCENARIO: the new generation points at a directory that is gone
#[test]
fn scenario_unreadable_new_generation_is_fatal() {
    let uc = machine();
    let missing = std::path::PathBuf::from("/generations/9/agents");

    let err = uc.execute(&options(&missing, None)).unwrap_err();

    assert!(err.to_string().contains("/generations/9/agents"));
    assert_eq!(uc.file_system().mutation_count(), 0);
}
