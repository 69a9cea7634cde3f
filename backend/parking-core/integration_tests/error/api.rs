use parking_core::error::{ApiError, StorageError};

use common::HttpStatusCode;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};

/// **VALUE**: Errors built through the constructors carry the caller's location.
///
/// **WHY THIS MATTERS**: Log lines show the file and line that raised the error, so a
/// failed fetch can be traced without a debugger.
///
/// **BUG THIS CATCHES**: Would catch a dropped `#[track_caller]` on a constructor, which
/// would point every location at `error/api.rs` instead of the caller.
#[test]
fn given_constructed_errors_when_formatted_then_include_caller_location() {
    let errors = [
        ApiError::empty_response(5),
        ApiError::from_status(HttpStatusCode(503)),
        ApiError::no_file_found("resources/secret.txt"),
        ApiError::timeout(1000),
        ApiError::invalid_credential(),
    ];

    for err in errors {
        let text = err.to_string();
        assert!(text.contains("api.rs"), "{text}");
        assert!(text.contains("integration_tests"), "{text}");
    }
}

#[test]
fn given_statuses_when_mapped_then_variant_and_retry_policy_follow() {
    let unauthorized = ApiError::from_status(HttpStatusCode::UNAUTHORIZED);
    let not_ready = ApiError::from_status(HttpStatusCode::SERVICE_UNAVAILABLE);
    let unknown = ApiError::from_status(HttpStatusCode(418));

    assert!(matches!(unauthorized, ApiError::Unauthorized { .. }));
    assert!(!unauthorized.is_retryable());
    assert!(matches!(not_ready, ApiError::ServerNotReady { .. }));
    assert!(not_ready.is_retryable());
    assert!(matches!(unknown, ApiError::UnknownResponse { .. }));
    assert!(unknown.is_retryable());
    assert_eq!(unknown.status_code(), Some(418));
}

#[test]
fn given_any_error_when_shown_to_user_then_no_location_leaks() {
    let errors = [
        ApiError::transport("connection reset"),
        ApiError::from_status(HttpStatusCode::UNAUTHORIZED),
        ApiError::empty_response(5),
        ApiError::empty_secret_file("resources/secret.txt"),
        ApiError::invalid_credential(),
        ApiError::timeout(300),
    ];

    for err in errors {
        let message = err.user_message();
        assert!(!message.contains(".rs:"), "{message}");
        assert!(!message.is_empty());
    }
}

#[test]
fn given_file_write_error_when_inspected_then_storage_source_is_chained() {
    let storage = StorageError::write(
        "resources/ltaData.json",
        IoError::new(ErrorKind::PermissionDenied, "read-only"),
    );

    let err = ApiError::file_write(storage);

    assert_eq!(err.error_category(), "file_write");
    let source = err.source().expect("FileWrite should expose its source");
    assert!(source.to_string().contains("ltaData.json"));
}

#[test]
fn given_key_that_cannot_be_sent_when_classified_then_not_retried() {
    let err = ApiError::invalid_credential();

    assert!(!err.is_retryable());
    assert_eq!(err.error_category(), "invalid_credential");
    assert_eq!(err.status_code(), None);
}

#[test]
fn given_side_channel_failures_when_classified_then_retryable() {
    assert!(ApiError::timeout(300).is_retryable());
    assert_eq!(ApiError::timeout(300).user_message(), "Fetch Timeout.");
    assert!(ApiError::transport("connection reset").is_retryable());
    assert_eq!(ApiError::transport("connection reset").error_category(), "transport");
}
