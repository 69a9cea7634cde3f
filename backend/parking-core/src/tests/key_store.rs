use crate::api::{AuthenticationStatus, KeyStore};

use common::RedactedCredential;

#[test]
fn given_new_key_store_when_created_then_status_is_fail_with_empty_key() {
    let store = KeyStore::new();

    assert_eq!(store.status(), AuthenticationStatus::Fail);
    assert!(store.credential().is_empty());
}

/// **VALUE**: A 200 validates a personal key but never promotes the default key.
///
/// **BUG THIS CATCHES**: Would catch if `mark_valid` unconditionally set `Success`,
/// which would tell users on the shared fallback key that their own key works.
#[test]
fn given_each_status_when_marked_valid_then_default_is_kept() {
    let cases = [
        (AuthenticationStatus::Fail, AuthenticationStatus::Success),
        (AuthenticationStatus::Success, AuthenticationStatus::Success),
        (AuthenticationStatus::ApiChanged, AuthenticationStatus::Success),
        (AuthenticationStatus::Default, AuthenticationStatus::Default),
    ];

    for (before, after) in cases {
        let mut store = KeyStore::new();
        store.set_status(before);

        store.mark_valid();

        assert_eq!(store.status(), after, "mark_valid from {before:?}");
    }
}

#[test]
fn given_each_status_when_marked_rejected_then_default_is_kept() {
    let cases = [
        (AuthenticationStatus::Fail, AuthenticationStatus::Fail),
        (AuthenticationStatus::Success, AuthenticationStatus::Fail),
        (AuthenticationStatus::ApiChanged, AuthenticationStatus::Fail),
        (AuthenticationStatus::Default, AuthenticationStatus::Default),
    ];

    for (before, after) in cases {
        let mut store = KeyStore::new();
        store.set_status(before);

        store.mark_rejected();

        assert_eq!(store.status(), after, "mark_rejected from {before:?}");
    }
}

#[test]
fn given_replaced_credential_when_swapped_then_previous_is_returned_and_status_untouched() {
    let mut store = KeyStore::new();
    store.install(RedactedCredential::from("first"), AuthenticationStatus::Success);

    let previous = store.replace_credential(RedactedCredential::from("second"));

    assert_eq!(previous.as_str(), "first");
    assert_eq!(store.credential().as_str(), "second");
    assert_eq!(store.status(), AuthenticationStatus::Success);
}

#[test]
fn given_fail_status_when_messaged_then_shows_key() {
    let mut store = KeyStore::new();
    store.install(RedactedCredential::from("abc123"), AuthenticationStatus::Fail);

    assert_eq!(
        store.status_message(),
        "You have not authenticated your API key. Your API key is abc123"
    );
}

#[test]
fn given_success_status_when_messaged_then_confirms_key() {
    let mut store = KeyStore::new();
    store.install(RedactedCredential::from("abc123"), AuthenticationStatus::Success);

    assert_eq!(
        store.status_message(),
        "You have authenticated your API key successfully. Your API key is abc123"
    );
}

#[test]
fn given_api_changed_status_when_messaged_then_suggests_update() {
    let mut store = KeyStore::new();
    store.install(RedactedCredential::from("abc123"), AuthenticationStatus::ApiChanged);

    let message = store.status_message();

    assert!(message.contains("(abc123)"));
    assert!(message.contains("Use `update` command to authenticate."));
}

#[test]
fn given_default_status_when_messaged_then_does_not_leak_default_key() {
    let mut store = KeyStore::new();
    store.install(RedactedCredential::from(crate::DEFAULT_API_KEY), AuthenticationStatus::Default);

    let message = store.status_message();

    assert!(message.contains("default key"));
    assert!(!message.contains(crate::DEFAULT_API_KEY));
}
