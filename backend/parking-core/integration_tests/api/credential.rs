use crate::api::helpers::{SECRET_FILE, engine_for, refused_base_url, write_secret};

use parking_core::DEFAULT_API_KEY;
use parking_core::api::AuthenticationStatus;
use parking_core::error::ApiError;

use tempfile::TempDir;

#[test]
fn given_missing_secret_file_when_loading_then_no_file_found() {
    let temp = TempDir::new().unwrap();
    let mut engine = engine_for(&refused_base_url(), temp.path());

    let err = engine
        .load_credential(SECRET_FILE, temp.path(), true)
        .unwrap_err();

    assert!(matches!(err, ApiError::NoFileFound { .. }));
    assert_eq!(engine.status(), AuthenticationStatus::Fail);
    assert!(engine.api_key().is_empty());
}

/// **VALUE**: A blank secret file falls back to the default key when asked to.
///
/// **BUG THIS CATCHES**: Would catch if the fallback were skipped, leaving first-time
/// users with no key at all and every fetch rejected.
#[test]
fn given_blank_secret_file_when_loading_with_fallback_then_default_key_and_error() {
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "  \n");
    let mut engine = engine_for(&refused_base_url(), temp.path());

    let err = engine
        .load_credential(SECRET_FILE, temp.path(), true)
        .unwrap_err();

    assert!(matches!(err, ApiError::EmptySecretFile { .. }));
    assert_eq!(engine.api_key(), DEFAULT_API_KEY);
    assert_eq!(engine.status(), AuthenticationStatus::Default);
}

#[test]
fn given_blank_secret_file_when_loading_without_fallback_then_key_untouched() {
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "");
    let mut engine = engine_for(&refused_base_url(), temp.path());

    let err = engine
        .load_credential(SECRET_FILE, temp.path(), false)
        .unwrap_err();

    assert!(matches!(err, ApiError::EmptySecretFile { .. }));
    assert!(engine.api_key().is_empty());
    assert_eq!(engine.status(), AuthenticationStatus::Fail);
}

#[test]
fn given_secret_file_with_key_when_loading_then_trimmed_key_marked_changed() {
    let temp = TempDir::new().unwrap();
    write_secret(temp.path(), "  mykey123\n");
    let mut engine = engine_for(&refused_base_url(), temp.path());

    engine
        .load_credential(SECRET_FILE, temp.path(), true)
        .unwrap();

    assert_eq!(engine.api_key(), "mykey123");
    assert_eq!(engine.status(), AuthenticationStatus::ApiChanged);
}
