use parking::session::Session;

use parking_core::DEFAULT_API_KEY;
use parking_core::api::AuthenticationStatus;
use parking_core::config::AppConfig;
use parking_core::parser::parse_command;

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// End-to-end console flows: session + fetch engine + files on disk,
// against a mock availability API
// ============================================================================

const DATA_PATH: &str = "/ltaodataservice/CarParkAvailabilityv2";
const BODY: &str = r#"{"value":[{"CarParkID":"1","Area":"Marina","Development":"Suntec City","Location":"1.29375 103.85718","AvailableLots":442,"LotType":"C","Agency":"LTA"}]}"#;
const NEWER_BODY: &str = r#"{"value":[{"CarParkID":"1","Area":"Marina","Development":"Suntec City","Location":"1.29375 103.85718","AvailableLots":7,"LotType":"C","Agency":"LTA"},{"CarParkID":"2","Area":"Marina","Development":"Marina Square","Location":"1.29115 103.85728","AvailableLots":1001,"LotType":"C","Agency":"LTA"}]}"#;

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = format!("{}{DATA_PATH}", server.uri());
    config.api.timeout_ms = 300;
    config
}

async fn answer_key(server: &MockServer, key: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .and(header("AccountKey", key))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap()
}

/// **VALUE**: First run with no files at all still ends with usable data.
///
/// **WHY THIS MATTERS**: A new user has no secret file. The session must create it,
/// fall back to the shared key, fetch, and load carparks without any manual step.
///
/// **BUG THIS CATCHES**: Would catch if a missing secret file aborted startup or left
/// the engine with an empty key that the API rejects.
#[tokio::test]
async fn given_first_run_when_starting_then_default_key_fetches_and_loads_data() {
    // GIVEN: Empty data dir, API accepts the default key
    let server = MockServer::start().await;
    answer_key(&server, DEFAULT_API_KEY, 200, BODY).await;
    let temp = TempDir::new().unwrap();
    let mut session = Session::new(&config_for(&server), temp.path()).unwrap();

    // WHEN
    let notes = session.start().await;

    // THEN: Secret file created empty, default key active, data loaded and backed up
    assert!(notes.iter().any(|n| n.starts_with("API key file is missing!")));
    assert_eq!(read(temp.path(), "secret.txt"), "");
    assert_eq!(session.engine().status(), AuthenticationStatus::Default);
    assert_eq!(session.carparks().len(), 1);
    assert_eq!(read(temp.path(), "ltaDataBackup.json"), BODY);
}

#[tokio::test]
async fn given_saved_key_when_starting_then_key_is_validated_by_startup_fetch() {
    let server = MockServer::start().await;
    answer_key(&server, "mykey", 200, BODY).await;
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("secret.txt"), "mykey\n").unwrap();
    fs::write(temp.path().join("favourite.txt"), "1\n\n1\n").unwrap();
    let mut session = Session::new(&config_for(&server), temp.path()).unwrap();

    let notes = session.start().await;

    assert_eq!(session.engine().status(), AuthenticationStatus::Success);
    assert_eq!(session.favourites().ids(), ["1"]);
    assert!(notes.last().unwrap().contains("successfully"));
}

/// **VALUE**: A successful `auth` saves the key and swaps in the freshly fetched data.
///
/// **BUG THIS CATCHES**: Would catch if the new key were only held in memory and lost on
/// the next start, or if carparks were not reloaded after the fetch.
#[tokio::test]
async fn given_new_valid_key_when_auth_command_then_key_saved_and_data_reloaded() {
    // GIVEN: A started session on the default key
    let server = MockServer::start().await;
    answer_key(&server, DEFAULT_API_KEY, 200, BODY).await;
    answer_key(&server, "personal", 200, NEWER_BODY).await;
    let temp = TempDir::new().unwrap();
    let mut session = Session::new(&config_for(&server), temp.path()).unwrap();
    session.start().await;

    // WHEN
    let outcome = session.execute(parse_command("auth personal")).await;

    // THEN
    assert!(outcome.message.contains("authenticated your API key successfully"));
    assert_eq!(read(temp.path(), "secret.txt"), "personal");
    assert_eq!(session.carparks().len(), 2);
    assert_eq!(read(temp.path(), "ltaData.json"), NEWER_BODY);
}

#[tokio::test]
async fn given_rejected_key_when_auth_command_then_previous_key_and_data_kept() {
    let server = MockServer::start().await;
    answer_key(&server, DEFAULT_API_KEY, 200, BODY).await;
    answer_key(&server, "typo", 401, "").await;
    let temp = TempDir::new().unwrap();
    let mut session = Session::new(&config_for(&server), temp.path()).unwrap();
    session.start().await;

    let outcome = session.execute(parse_command("auth typo")).await;

    assert!(outcome.message.starts_with("Your API key is not authorised"));
    assert_eq!(session.engine().api_key(), DEFAULT_API_KEY);
    assert_eq!(read(temp.path(), "secret.txt"), "");
    assert_eq!(session.carparks().len(), 1);
}

#[tokio::test]
async fn given_server_down_when_update_command_then_diagnostic_and_old_data_kept() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("ltaData.json"), BODY).unwrap();
    fs::write(temp.path().join("secret.txt"), "mykey").unwrap();
    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let mut session = Session::new(&config_for(&server), temp.path()).unwrap();
    session.start().await;

    let outcome = session.execute(parse_command("update")).await;

    assert!(!outcome.exit);
    assert_eq!(
        outcome.message,
        "Unable to fetch data from the API. Please check your internet connection."
    );
    assert_eq!(session.carparks().len(), 1);
    assert_eq!(session.engine().status(), AuthenticationStatus::ApiChanged);
}

#[tokio::test]
async fn given_server_recovers_when_update_command_then_reports_count() {
    let server = MockServer::start().await;
    answer_key(&server, "mykey", 200, NEWER_BODY).await;
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("secret.txt"), "mykey").unwrap();
    let mut session = Session::new(&config_for(&server), temp.path()).unwrap();
    session.start().await;

    let outcome = session.execute(parse_command("update")).await;

    assert_eq!(outcome.message, "Data updated: 2 carparks loaded.");
}
