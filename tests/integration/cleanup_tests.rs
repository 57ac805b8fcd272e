//! Teardown behavior: idempotency, failure aggregation, RAII.

use std::sync::Arc;

use deskdriver::backend::scripted::ScriptedAutomation;
use deskdriver::capability::document::DocumentOps;
use deskdriver::{AutomationConfig, ServiceError, Session, SessionState};

use super::test_helpers::word_service;

#[test]
fn cleanup_closes_document_quits_and_releases() {
    let (backend, mut service) = word_service();
    service.initialize().expect("initialize");
    service.create_document().expect("create");

    service.cleanup().expect("cleanup succeeds");

    assert_eq!(service.state(), SessionState::Closed);
    assert_eq!(backend.call_count("Close"), 1);
    assert_eq!(backend.call_count("Quit"), 1);
    assert_eq!(backend.release_count(), 1);
}

#[test]
fn cleanup_is_idempotent() {
    let (backend, mut service) = word_service();
    service.initialize().expect("initialize");

    service.cleanup().expect("first cleanup");
    service.cleanup().expect("second cleanup never raises");

    assert_eq!(service.state(), SessionState::Closed);
    assert_eq!(backend.call_count("Quit"), 1, "steps run once");
    assert_eq!(backend.release_count(), 1);
}

#[test]
fn cleanup_before_initialize_is_a_quiet_no_op() {
    let (backend, mut service) = word_service();
    service.cleanup().expect("nothing to tear down");
    assert_eq!(service.state(), SessionState::Closed);
    assert_eq!(backend.release_count(), 0, "never-acquired subsystem not released");
}

#[test]
fn cleanup_aggregates_partial_failures_and_still_closes() {
    let (backend, mut service) = word_service();
    service.initialize().expect("initialize");
    service.create_document().expect("create");
    backend.fail_on("Close");

    let err = service.cleanup().expect_err("document close failed");

    // State reset happens before the error is raised.
    assert_eq!(service.state(), SessionState::Closed);
    match &err {
        ServiceError::Cleanup(msg) => {
            assert!(msg.contains("close document"), "missing step detail: {msg}");
        }
        other => panic!("expected Cleanup, got {other:?}"),
    }
    // Later steps still ran despite the earlier failure.
    assert_eq!(backend.call_count("Quit"), 1);
    assert_eq!(backend.release_count(), 1);

    // Both handles are cleared; a second cleanup is a no-op.
    service.cleanup().expect("idempotent after failure");
}

#[test]
fn cleanup_aggregates_multiple_step_failures() {
    let (backend, mut service) = word_service();
    service.initialize().expect("initialize");
    service.create_document().expect("create");
    backend.fail_on("Close");
    backend.fail_on("Quit");

    let err = service.cleanup().expect_err("two steps failed");
    let msg = err.to_string();
    assert!(msg.contains("close document"));
    assert!(msg.contains("quit application"));
    assert_eq!(service.state(), SessionState::Closed);
}

#[test]
fn dropping_a_live_session_tears_it_down() {
    let backend = ScriptedAutomation::new();
    {
        let mut session = Session::new(
            Arc::new(backend.clone()),
            "Word.Application",
            &AutomationConfig::default(),
        );
        session.initialize().expect("initialize");
    }
    assert_eq!(backend.call_count("Quit"), 1, "drop quit the application");
    assert_eq!(backend.release_count(), 1);
}

#[test]
fn dropping_a_closed_session_does_nothing() {
    let backend = ScriptedAutomation::new();
    {
        let mut session = Session::new(
            Arc::new(backend.clone()),
            "Word.Application",
            &AutomationConfig::default(),
        );
        session.initialize().expect("initialize");
        session.cleanup().expect("explicit cleanup");
    }
    assert_eq!(backend.call_count("Quit"), 1, "no second teardown on drop");
}
