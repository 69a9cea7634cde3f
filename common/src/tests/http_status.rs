use crate::{HttpStatusCode, StatusClass};

#[test]
fn given_known_codes_when_classified_then_maps_to_fetch_policy() {
    assert_eq!(HttpStatusCode(200).class(), StatusClass::Valid);
    assert_eq!(HttpStatusCode(401).class(), StatusClass::Unauthorized);
    assert_eq!(HttpStatusCode(503).class(), StatusClass::ServerNotReady);
}

#[test]
fn given_other_codes_when_classified_then_unknown() {
    for code in [201, 204, 400, 403, 404, 429, 500, 502] {
        assert_eq!(
            HttpStatusCode(code).class(),
            StatusClass::Unknown,
            "{code} should be unknown"
        );
    }
}

/// **VALUE**: An invalid key must never be retried.
///
/// **BUG THIS CATCHES**: Would catch if 401 became retryable, which would hammer the
/// API five times with a key that cannot work.
#[test]
fn given_unauthorized_when_checking_retry_then_not_retryable() {
    assert!(!HttpStatusCode::UNAUTHORIZED.is_retryable());
    assert!(!HttpStatusCode::OK.is_retryable());
    assert!(HttpStatusCode::SERVICE_UNAVAILABLE.is_retryable());
    assert!(HttpStatusCode(418).is_retryable());
}

#[test]
fn given_status_when_displayed_then_shows_bare_number() {
    assert_eq!(HttpStatusCode::from(503).to_string(), "503");
}
