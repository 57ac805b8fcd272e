//! Flat-namespace dispatch through `call()` for every service.

use deskdriver::ServiceError;
use serde_json::{json, Map};

use super::test_helpers::{args, excel_service, mail_service, slides_service, word_service};

#[test]
fn unknown_operation_is_missing_resource() {
    let (_backend, mut service) = word_service();
    service.initialize().expect("initialize");

    let err = service
        .call("summon_paperclip", &Map::new())
        .expect_err("unknown operation");
    match &err {
        ServiceError::MissingResource(msg) => assert!(msg.contains("summon_paperclip")),
        other => panic!("expected MissingResource, got {other:?}"),
    }
}

#[test]
fn word_dispatch_covers_a_full_editing_flow() {
    let (_backend, mut service) = word_service();
    service.initialize().expect("initialize");

    service.call("create_document", &Map::new()).expect("create");
    service
        .call("insert_text", &args(json!({ "text": "hello world" })))
        .expect("insert");
    service
        .call("set_font", &args(json!({ "name": "Garamond", "size": 11.5 })))
        .expect("font");

    let counted = service.call("word_count", &Map::new()).expect("count");
    assert_eq!(counted.fields["words"], json!(2));

    service
        .call("close_document", &args(json!({ "save": false })))
        .expect("close");
}

#[test]
fn dispatch_rejects_missing_required_arguments() {
    let (backend, mut service) = word_service();
    service.initialize().expect("initialize");
    service.call("create_document", &Map::new()).expect("create");

    let err = service
        .call("insert_text", &Map::new())
        .expect_err("'text' is required");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(backend.call_count("InsertText"), 0);
}

#[test]
fn excel_dispatch_round_trips_a_cell() {
    let (_backend, mut service) = excel_service();
    service.initialize().expect("initialize");
    service.call("create_document", &Map::new()).expect("create");

    service
        .call(
            "set_cell",
            &args(json!({ "sheet": "Sheet1", "cell": "B2", "value": 42 })),
        )
        .expect("set");

    let read = service
        .call("get_cell", &args(json!({ "sheet": "Sheet1", "cell": "B2" })))
        .expect("get");
    assert_eq!(read.fields["value"], json!(42));
}

#[test]
fn excel_dispatch_rejects_malformed_cell_references() {
    let (backend, mut service) = excel_service();
    service.initialize().expect("initialize");
    service.call("create_document", &Map::new()).expect("create");

    let err = service
        .call("set_cell", &args(json!({ "sheet": "Sheet1", "cell": "2B", "value": 1 })))
        .expect_err("reversed reference rejected");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(backend.call_count("SetCell"), 0);
}

#[test]
fn slides_dispatch_builds_a_deck() {
    let (_backend, mut service) = slides_service();
    service.initialize().expect("initialize");
    service.call("create_document", &Map::new()).expect("create");

    service
        .call("add_slide", &args(json!({ "title": "Agenda" })))
        .expect("first slide");
    service.call("add_slide", &Map::new()).expect("second slide");
    service
        .call("set_slide_title", &args(json!({ "index": 2, "title": "Roadmap" })))
        .expect("retitle");

    let counted = service.call("slide_count", &Map::new()).expect("count");
    assert_eq!(counted.fields["slides"], json!(2));
}

#[test]
fn slides_dispatch_rejects_zero_index() {
    let (_backend, mut service) = slides_service();
    service.initialize().expect("initialize");
    service.call("create_document", &Map::new()).expect("create");

    let err = service
        .call("set_slide_title", &args(json!({ "index": 0, "title": "x" })))
        .expect_err("index is 1-based");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[test]
fn mail_dispatch_has_no_document_operations() {
    let (_backend, mut service) = mail_service();
    service.initialize().expect("initialize");

    let err = service
        .call("create_document", &Map::new())
        .expect_err("mail target has no documents");
    assert!(matches!(err, ServiceError::MissingResource(_)));

    let sent = service
        .call(
            "send_mail",
            &args(json!({ "to": "ops@example.com", "subject": "ping" })),
        )
        .expect("mail operations dispatch");
    assert!(sent.success);
}

#[test]
fn every_cataloged_operation_dispatches() {
    // The catalog and the dispatch table are maintained separately;
    // this keeps them from drifting apart. Arguments are the minimal
    // valid set per operation.
    let (backend, mut service) = mail_service();
    backend.insert_item("m1", json!({ "subject": "hi" }));
    service.initialize().expect("initialize");

    let calls: Vec<(&str, Map<String, serde_json::Value>)> = vec![
        ("send_mail", args(json!({ "to": "a@b.example", "subject": "s" }))),
        ("get_mail", args(json!({ "id": "m1" }))),
        ("flag_mail", args(json!({ "id": "m1" }))),
        ("search_mail", args(json!({ "query": "hi" }))),
        ("list_folders", Map::new()),
        ("create_folder", args(json!({ "name": "Archive" }))),
        (
            "create_event",
            args(json!({
                "subject": "standup",
                "start": "2026-08-26T09:00:00Z",
                "end": "2026-08-26T09:15:00Z"
            })),
        ),
        ("list_events", args(json!({ "date": "2026-08-26T00:00:00Z" }))),
    ];

    let catalog = service.catalog().clone();
    for (operation, arguments) in &calls {
        assert!(catalog.contains(operation), "{operation} not in catalog");
        service
            .call(operation, arguments)
            .unwrap_or_else(|err| panic!("{operation} failed: {err}"));
    }
    assert_eq!(catalog.len(), calls.len(), "catalog has undispatched operations");
}
