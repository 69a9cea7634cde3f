use crate::api::helpers::{
    SAMPLE_BODY, SECRET_FILE, TEST_TIMEOUT_MS, data_request, engine_for, read_persisted,
    refused_base_url, write_secret,
};

use parking_core::api::{AttemptOutcome, AuthenticationStatus};
use parking_core::error::ApiError;

use common::HttpStatusCode;

use std::time::Duration;

use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

/// **VALUE**: Four 503s followed by a 200 still succeeds within the five-attempt budget.
///
/// **WHY THIS MATTERS**: The LTA endpoint answers 503 while it rebuilds its dataset. Users
/// should get data as long as the server recovers before the budget runs out.
///
/// **BUG THIS CATCHES**: Would catch if 503 were treated as fatal, or if the retry loop
/// stopped one attempt early.
#[tokio::test]
async fn given_four_server_not_ready_then_ok_when_fetching_then_fifth_attempt_persists_body() {
    // GIVEN: 503 four times, then 200
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(4)
        .expect(4)
        .mount(&server)
        .await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    // WHEN: Fetching with retry
    let body = engine.fetch_with_retry().await.unwrap();

    // THEN: Fifth attempt's body is returned and persisted
    assert_eq!(body, SAMPLE_BODY);
    assert_eq!(read_persisted(temp.path()).as_deref(), Some(SAMPLE_BODY));
    assert_eq!(engine.attempts().len(), 5);
    assert_eq!(
        engine.attempts()[0].outcome,
        AttemptOutcome::Http(HttpStatusCode::SERVICE_UNAVAILABLE)
    );
    assert_eq!(engine.attempts()[4].outcome, AttemptOutcome::Body);
    assert!(!engine.has_pending_request());
}

#[tokio::test]
async fn given_unknown_status_when_fetching_then_retries_until_exhausted() {
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    let err = engine.fetch_with_retry().await.unwrap_err();

    assert!(matches!(err, ApiError::EmptyResponse { attempts: 5, .. }));
    assert!(
        engine
            .attempts()
            .iter()
            .all(|a| a.outcome == AttemptOutcome::Http(HttpStatusCode(500)))
    );
    assert_eq!(read_persisted(temp.path()), None);
}

/// **VALUE**: A 401 ends the loop after exactly one request.
///
/// **BUG THIS CATCHES**: Would catch if Unauthorized were classed as retryable and an
/// invalid key hammered the API five times per command.
#[tokio::test]
async fn given_unauthorized_when_fetching_then_aborts_after_one_attempt() {
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    let err = engine.fetch_with_retry().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(engine.attempts().len(), 1);
    assert_eq!(engine.status(), AuthenticationStatus::Fail);
}

#[tokio::test]
async fn given_blank_bodies_when_fetching_then_treated_as_empty_and_retried() {
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .expect(5)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    let err = engine.fetch_with_retry().await.unwrap_err();

    assert!(matches!(err, ApiError::EmptyResponse { .. }));
    assert_eq!(read_persisted(temp.path()), None);
}

/// **VALUE**: A server slower than the timeout yields five timeouts and no data file.
///
/// **WHY THIS MATTERS**: The console must stay responsive. Each attempt waits at most
/// the configured timeout, however slow the server is.
///
/// **BUG THIS CATCHES**: Would catch if the timeout were applied to the whole loop
/// instead of per attempt, or if a late response were written after giving up.
#[tokio::test]
async fn given_slow_server_when_fetching_then_every_attempt_times_out() {
    // GIVEN: Responses arrive well after the per-attempt timeout
    let server = MockServer::start().await;
    data_request()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE_BODY)
                .set_delay(Duration::from_millis(TEST_TIMEOUT_MS * 10)),
        )
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    // WHEN
    let started = std::time::Instant::now();
    let err = engine.fetch_with_retry().await.unwrap_err();
    let elapsed = started.elapsed();

    // THEN: Five timeouts, bounded by the per-attempt budget
    assert!(matches!(err, ApiError::EmptyResponse { attempts: 5, .. }));
    assert!(
        engine
            .attempts()
            .iter()
            .all(|a| a.outcome == AttemptOutcome::Timeout)
    );
    assert!(elapsed < Duration::from_millis(TEST_TIMEOUT_MS * 10));
    assert_eq!(read_persisted(temp.path()), None);
}

#[tokio::test]
async fn given_connection_refused_when_fetching_then_empty_response_after_budget() {
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&refused_base_url(), temp.path());

    let err = engine.fetch_with_retry().await.unwrap_err();

    assert!(matches!(err, ApiError::EmptyResponse { attempts: 5, .. }));
    assert!(
        engine
            .attempts()
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::Transport(_)))
    );
    assert_eq!(
        err.user_message(),
        "Unable to fetch data from the API. Please check your internet connection."
    );
}

#[tokio::test]
async fn given_unwritable_data_dir_when_fetch_succeeds_then_file_write_error() {
    // GIVEN: The data dir path is occupied by a regular file
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let blocked = temp.path().join("resources");
    std::fs::write(&blocked, "not a directory").unwrap();
    let mut engine = engine_for(&server.uri(), &blocked);

    // WHEN
    let err = engine.fetch_with_retry().await.unwrap_err();

    // THEN
    assert!(matches!(err, ApiError::FileWrite { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn given_begin_then_await_when_server_ok_then_body_returned_without_persisting() {
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    engine.begin_fetch();
    assert!(engine.has_pending_request());
    let body = engine.await_response().await.unwrap();

    assert_eq!(body, SAMPLE_BODY);
    assert!(!engine.has_pending_request());
    assert_eq!(engine.status(), AuthenticationStatus::Success);
    assert_eq!(read_persisted(temp.path()), None);
}

#[tokio::test]
async fn given_nothing_in_flight_when_awaiting_then_empty_string() {
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&refused_base_url(), temp.path());

    let body = engine.await_response().await.unwrap();

    assert!(body.is_empty());
}

/// **VALUE**: A response that lands after its attempt timed out never reaches the
/// caller or the data file.
///
/// **WHY THIS MATTERS**: The timed-out request is not cancelled. If its late body could
/// win, users would see older availability than the retry just fetched.
///
/// **BUG THIS CATCHES**: Would catch if the retry kept listening on the superseded
/// channel, or if the abandoned task could still persist what it received.
#[tokio::test]
async fn given_late_first_response_when_retry_answers_in_time_then_fresh_body_wins() {
    // GIVEN: First answer is stale and late, second is fresh and prompt
    let delay = Duration::from_millis(TEST_TIMEOUT_MS * 5);
    let server = MockServer::start().await;
    data_request()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("stale")
                .set_delay(delay),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&server.uri(), temp.path());

    // WHEN
    let body = engine.fetch_with_retry().await.unwrap();

    // THEN: Fresh body, one timeout before it
    assert_eq!(body, SAMPLE_BODY);
    let outcomes: Vec<_> = engine.attempts().iter().map(|a| a.outcome.clone()).collect();
    assert_eq!(outcomes, vec![AttemptOutcome::Timeout, AttemptOutcome::Body]);

    // AND: Once the stale answer has arrived, nothing has changed
    tokio::time::sleep(delay).await;
    assert_eq!(read_persisted(temp.path()).as_deref(), Some(SAMPLE_BODY));
    assert!(!engine.has_pending_request());
}

#[tokio::test]
async fn given_loaded_key_not_a_header_value_when_refreshing_then_aborts_after_one_attempt() {
    let server = MockServer::start().await;
    data_request()
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_BODY))
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "auth ключ");
    let mut engine = engine_for(&server.uri(), temp.path());
    engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap();

    let err = engine.refresh().await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidCredential { .. }));
    assert!(!err.is_retryable());
    assert_eq!(engine.attempts().len(), 1);
    assert_eq!(engine.attempts()[0].outcome, AttemptOutcome::InvalidCredential);
    assert_eq!(engine.status(), AuthenticationStatus::ApiChanged);
    assert_eq!(read_persisted(temp.path()), None);
}
