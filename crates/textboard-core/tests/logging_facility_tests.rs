#![allow(clippy::unwrap_used, clippy::expect_used)]

use textboard_core::errors::BoardError;
use textboard_core::logging_facility::test_capture::init_test_capture;
use textboard_core::{log_op_end, log_op_error, log_op_start};
use textboard_core::{ArticleService, MemoryArticleRepository};
use textboard_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = BoardError::ArticleNotFound { article_id: 1 };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1);
    assert_eq!(error_events[0].field("err_code"), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].field("err_kind"), Some("NotFound"));
}

#[test]
fn test_service_write_emits_start_and_end() {
    let capture = init_test_capture();
    let mut svc = ArticleService::new(Box::new(MemoryArticleRepository::new()));

    svc.write("logged", "body").unwrap();

    capture.assert_event_exists("article_write", EVENT_START);
    capture.assert_event_exists("article_write", EVENT_END);
}

#[test]
fn test_service_delete_failure_emits_error_event() {
    let capture = init_test_capture();
    let mut svc = ArticleService::new(Box::new(MemoryArticleRepository::new()));

    assert!(svc.delete(77).is_err());

    let found = capture.events_for_op("article_delete").into_iter().any(|e| {
        e.event.as_deref() == Some(EVENT_END_ERROR) && e.field("article_id") == Some("77")
    });
    assert!(found, "expected an end_error event for article 77");
}
