use crate::api::helpers::{
    SAMPLE_BODY, SECRET_FILE, data_request, data_request_with_key, engine_for, read_persisted,
    write_secret,
};

use parking_core::DEFAULT_API_KEY;
use parking_core::api::AuthenticationStatus;
use parking_core::error::ApiError;

use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

/// **VALUE**: A key the API accepts replaces the old one and is marked successful.
///
/// **BUG THIS CATCHES**: Would catch if the candidate key were never sent in the
/// account header, since the mock only answers 200 to that exact header value.
#[tokio::test]
async fn given_valid_new_key_when_authenticating_then_success_and_data_persisted() {
    // GIVEN: The server accepts only "newkey"
    let server = MockServer::start().await;
    data_request_with_key("newkey")
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    // WHEN
    let accepted = engine.authenticate("newkey").await;

    // THEN
    assert!(accepted);
    assert_eq!(engine.api_key(), "newkey");
    assert_eq!(engine.status(), AuthenticationStatus::Success);
    assert_eq!(read_persisted(temp.path()).as_deref(), Some(SAMPLE_BODY));
}

/// **VALUE**: A rejected key never replaces the key that was active before.
///
/// **WHY THIS MATTERS**: A typo in `auth` must not lock users out of data they could
/// fetch a moment ago.
///
/// **BUG THIS CATCHES**: Would catch if the candidate were installed before the
/// fetch and not rolled back on failure.
#[tokio::test]
async fn given_rejected_key_when_authenticating_then_previous_key_restored() {
    // GIVEN: A loaded key, and a server that rejects "badkey"
    let server = MockServer::start().await;
    data_request_with_key("badkey")
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "goodkey");
    let mut engine = engine_for(&server.uri(), temp.path());
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();

    // WHEN
    let err = engine.try_authenticate("badkey").await.unwrap_err();

    // THEN: Old key back in place, status reflects the rejection
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(engine.api_key(), "goodkey");
    assert_eq!(engine.status(), AuthenticationStatus::Fail);
    assert_eq!(read_persisted(temp.path()), None);
}

#[tokio::test]
async fn given_unreachable_server_when_authenticating_then_false_and_key_unchanged() {
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(503))
        .expect(5)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());
    engine.load_default_credential();

    let accepted = engine.authenticate("another").await;

    assert!(!accepted);
    assert_eq!(engine.api_key(), DEFAULT_API_KEY);
    assert_eq!(engine.status(), AuthenticationStatus::Default);
}

/// **VALUE**: Re-authenticating with the key already in use still validates it.
///
/// **BUG THIS CATCHES**: Would catch if a loaded-but-unvalidated key stayed in
/// `ApiChanged` after the API accepted it.
#[tokio::test]
async fn given_same_key_when_authenticating_then_validated_by_response() {
    let server = MockServer::start().await;
    data_request_with_key("samekey")
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "samekey");
    let mut engine = engine_for(&server.uri(), temp.path());
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();
    assert_eq!(engine.status(), AuthenticationStatus::ApiChanged);

    assert!(engine.authenticate("samekey").await);

    assert_eq!(engine.status(), AuthenticationStatus::Success);
}

#[tokio::test]
async fn given_default_key_when_authenticating_then_status_stays_default() {
    let server = MockServer::start().await;
    data_request_with_key(DEFAULT_API_KEY)
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    // From a failed personal key to the default one
    assert!(engine.authenticate(DEFAULT_API_KEY).await);
    assert_eq!(engine.status(), AuthenticationStatus::Default);

    // And replaying it keeps it default
    assert!(engine.authenticate(DEFAULT_API_KEY).await);
    assert_eq!(engine.status(), AuthenticationStatus::Default);
}

#[tokio::test]
async fn given_loaded_key_when_refreshing_then_uses_it_and_validates() {
    let server = MockServer::start().await;
    data_request_with_key("filekey")
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "filekey\n");
    let mut engine = engine_for(&server.uri(), temp.path());
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();

    let body = engine.refresh().await.unwrap();

    assert_eq!(body, SAMPLE_BODY);
    assert_eq!(engine.status(), AuthenticationStatus::Success);
    assert!(engine.status_message().contains("filekey"));
}

/// **VALUE**: A failure after the API accepted the candidate puts back both the old
/// key and the status it had.
///
/// **WHY THIS MATTERS**: The console prints the status line next to the error. Showing
/// "Success" for a key that was never validated misleads the user about which key works.
///
/// **BUG THIS CATCHES**: Would catch if only the key were rolled back, leaving the
/// `Success` that the 200 had set on the candidate.
#[tokio::test]
async fn given_file_write_failure_when_authenticating_then_key_and_status_restored() {
    // GIVEN: "oldkey" loaded from disk, data dir blocked by a regular file
    let server = MockServer::start().await;
    data_request_with_key("newkey")
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "oldkey");
    let blocked = temp.path().join("resources");
    std::fs::write(&blocked, "not a directory").unwrap();
    let mut engine = engine_for(&server.uri(), &blocked);
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();
    assert_eq!(engine.status(), AuthenticationStatus::ApiChanged);

    // WHEN
    let err = engine.try_authenticate("newkey").await.unwrap_err();

    // THEN: Both halves of the key store are back to what they were
    assert!(matches!(err, ApiError::FileWrite { .. }));
    assert_eq!(engine.api_key(), "oldkey");
    assert_eq!(engine.status(), AuthenticationStatus::ApiChanged);
}

/// **VALUE**: Replaying the key that was just rejected lifts `Fail` once the API
/// accepts it again.
///
/// **BUG THIS CATCHES**: Would catch if an identical key skipped classification and
/// stayed stuck in `Fail` after a good response.
#[tokio::test]
async fn given_failed_key_when_same_key_accepted_then_status_becomes_success() {
    // GIVEN: One 401, then 200s, for the same key
    let server = MockServer::start().await;
    data_request_with_key("samekey")
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    data_request_with_key("samekey")
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "samekey");
    let mut engine = engine_for(&server.uri(), temp.path());
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();

    let err = engine.refresh().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(engine.status(), AuthenticationStatus::Fail);

    // WHEN
    let accepted = engine.authenticate("samekey").await;

    // THEN
    assert!(accepted);
    assert_eq!(engine.api_key(), "samekey");
    assert_eq!(engine.status(), AuthenticationStatus::Success);
}

/// **VALUE**: A key that cannot travel in a header is refused without a request.
///
/// **WHY THIS MATTERS**: Such a key fails inside the HTTP client on every attempt. The
/// user would wait through the whole retry budget and then be told to check their
/// internet connection.
///
/// **BUG THIS CATCHES**: Would catch if the candidate were installed and fetched before
/// being checked, spending attempts and disturbing the active key.
#[tokio::test]
async fn given_non_ascii_key_when_authenticating_then_refused_before_any_request() {
    // GIVEN: A loaded key and a server that must not be contacted
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "goodkey");
    let mut engine = engine_for(&server.uri(), temp.path());
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();

    // WHEN
    let err = engine.try_authenticate("ключ").await.unwrap_err();

    // THEN: Specific diagnostic, nothing changed
    assert!(matches!(err, ApiError::InvalidCredential { .. }));
    assert!(err.user_message().contains("cannot be sent"));
    assert!(!err.user_message().contains("internet connection"));
    assert_eq!(engine.api_key(), "goodkey");
    assert_eq!(engine.status(), AuthenticationStatus::ApiChanged);
    assert!(!engine.has_pending_request());
}
