//! Unit tests for the `ServiceError` taxonomy display and cause chain.

use std::error::Error;

use deskdriver::backend::Fault;
use deskdriver::{CompositionError, ServiceError};

#[test]
fn init_error_display_has_prefix() {
    let err = ServiceError::Init("cannot acquire 'Word.Application'".into());
    assert_eq!(
        err.to_string(),
        "initialization: cannot acquire 'Word.Application'"
    );
}

#[test]
fn missing_resource_display_has_prefix() {
    let err = ServiceError::MissingResource("no current document".into());
    assert!(err.to_string().starts_with("missing resource:"));
}

#[test]
fn invalid_input_display_has_prefix() {
    let err = ServiceError::InvalidInput("'subject' must not be empty".into());
    assert!(err.to_string().starts_with("invalid input:"));
}

#[test]
fn cleanup_display_has_prefix() {
    let err = ServiceError::Cleanup("close document: Close: scripted fault".into());
    assert!(err.to_string().starts_with("cleanup:"));
}

#[test]
fn error_messages_have_no_trailing_period() {
    let errors = [
        ServiceError::Init("a".into()),
        ServiceError::MissingResource("b".into()),
        ServiceError::InvalidInput("c".into()),
        ServiceError::Cleanup("d".into()),
    ];
    for err in errors {
        let s = err.to_string();
        assert!(!s.ends_with('.'), "unexpected trailing period: {s}");
    }
}

#[test]
fn operation_error_names_the_operation() {
    let err = ServiceError::Operation {
        operation: "insert_text".into(),
        source: Fault::new("InsertText", "RPC server unavailable"),
    };
    let s = err.to_string();
    assert!(s.contains("insert_text"), "missing operation name: {s}");
    assert!(s.contains("RPC server unavailable"), "missing detail: {s}");
}

#[test]
fn operation_error_preserves_fault_as_source() {
    let err = ServiceError::Operation {
        operation: "set_cell".into(),
        source: Fault::new("SetCell", "exception occurred"),
    };
    let source = err.source().expect("operation error carries a cause");
    let fault = source.downcast_ref::<Fault>().expect("cause is a Fault");
    assert_eq!(fault.method(), "SetCell");
    assert_eq!(fault.detail(), "exception occurred");
}

#[test]
fn non_operation_errors_have_no_source() {
    assert!(ServiceError::Init("x".into()).source().is_none());
    assert!(ServiceError::MissingResource("x".into()).source().is_none());
    assert!(ServiceError::InvalidInput("x".into()).source().is_none());
    assert!(ServiceError::Cleanup("x".into()).source().is_none());
}

#[test]
fn composition_error_names_both_groups() {
    let err = CompositionError {
        operation: "create_document".into(),
        first: "document",
        second: "sheet",
    };
    let s = err.to_string();
    assert!(s.contains("create_document"));
    assert!(s.contains("'document'"));
    assert!(s.contains("'sheet'"));
}
