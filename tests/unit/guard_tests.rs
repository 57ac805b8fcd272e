//! Unit tests for the operation guard and the validation helpers.

use std::error::Error;

use deskdriver::backend::Fault;
use deskdriver::ops::{
    guard, non_empty, optional_bool, optional_str, parse_timestamp, required_f64,
    required_index, required_str,
};
use deskdriver::ServiceError;
use serde_json::{json, Map, Value};

fn args(value: Value) -> Map<String, Value> {
    value.as_object().expect("object literal").clone()
}

// ── guard ─────────────────────────────────────────────────────────────────────

#[test]
fn guard_passes_success_through() {
    let result = guard("noop", || Ok(7));
    assert_eq!(result.expect("guarded success"), 7);
}

#[test]
fn guard_translates_faults_into_operation_errors() {
    let err = guard::<()>("insert_text", || {
        Err(Fault::new("InsertText", "call rejected").into())
    })
    .expect_err("fault translated");

    match &err {
        ServiceError::Operation { operation, source } => {
            assert_eq!(operation, "insert_text");
            assert_eq!(source.method(), "InsertText");
        }
        other => panic!("expected Operation, got {other:?}"),
    }
    let cause = err.source().expect("cause preserved");
    assert!(cause.downcast_ref::<Fault>().is_some());
}

#[test]
fn guard_does_not_rewrap_invalid_input() {
    let err = guard::<()>("send_mail", || {
        Err(ServiceError::InvalidInput("'to' must not be empty".into()).into())
    })
    .expect_err("validation error propagates");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[test]
fn guard_does_not_rewrap_missing_resource() {
    let err = guard::<()>("get_mail", || {
        Err(ServiceError::MissingResource("no mail item with id 'x'".into()).into())
    })
    .expect_err("lookup error propagates");
    assert!(matches!(err, ServiceError::MissingResource(_)));
}

// ── validation helpers ────────────────────────────────────────────────────────

#[test]
fn non_empty_rejects_whitespace() {
    let err = non_empty("subject", "   ").expect_err("whitespace rejected");
    assert!(err.to_string().contains("'subject'"));
    assert!(non_empty("subject", "hello").is_ok());
}

#[test]
fn parse_timestamp_accepts_rfc3339() {
    let parsed = parse_timestamp("start", "2026-08-25T09:00:00Z").expect("parses");
    assert_eq!(parsed.to_rfc3339(), "2026-08-25T09:00:00+00:00");
}

#[test]
fn parse_timestamp_rejects_garbage() {
    let err = parse_timestamp("start", "next tuesday").expect_err("rejected");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(err.to_string().contains("'start'"));
}

// ── argument extraction ───────────────────────────────────────────────────────

#[test]
fn required_str_extracts_values() {
    let map = args(json!({ "path": "report.docx" }));
    assert_eq!(required_str(&map, "path").expect("present"), "report.docx");
}

#[test]
fn required_str_rejects_missing_and_empty() {
    let map = args(json!({ "path": "" }));
    assert!(matches!(
        required_str(&map, "path"),
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        required_str(&map, "other"),
        Err(ServiceError::InvalidInput(_))
    ));
}

#[test]
fn optional_str_distinguishes_absent_from_wrong_type() {
    let map = args(json!({ "title": 3 }));
    assert!(matches!(
        optional_str(&map, "title"),
        Err(ServiceError::InvalidInput(_))
    ));
    assert_eq!(optional_str(&map, "missing").expect("absent is fine"), None);
}

#[test]
fn optional_bool_defaults_when_absent() {
    let map = args(json!({ "save": true }));
    assert!(optional_bool(&map, "save", false).expect("present"));
    assert!(optional_bool(&map, "missing", true).expect("default"));
}

#[test]
fn required_index_rejects_zero() {
    let map = args(json!({ "index": 0 }));
    assert!(matches!(
        required_index(&map, "index"),
        Err(ServiceError::InvalidInput(_))
    ));
    let map = args(json!({ "index": 2 }));
    assert_eq!(required_index(&map, "index").expect("positive"), 2);
}

#[test]
fn required_f64_rejects_non_numbers() {
    let map = args(json!({ "size": "big" }));
    assert!(matches!(
        required_f64(&map, "size"),
        Err(ServiceError::InvalidInput(_))
    ));
}
